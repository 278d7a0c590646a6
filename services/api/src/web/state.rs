//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::ProviderChain;
use crate::config::Config;
use oracle_core::ports::AssessmentGenerator;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. Everything inside is immutable or internally synchronized, so
/// handlers can run concurrently without further locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// The ordered chart source chain; its mock tail makes resolution
    /// infallible.
    pub chart_chain: Arc<ProviderChain>,
    /// The text-model assessment path, present only when configured and
    /// enabled. `None` means every request uses the rule-based engine.
    pub llm_adapter: Option<Arc<dyn AssessmentGenerator>>,
}
