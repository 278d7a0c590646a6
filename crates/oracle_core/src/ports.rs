//! crates/oracle_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete astrology data sources and of the
//! optional text-model assessment path.

use crate::domain::{AssessmentBundle, BirthChart, BirthInput};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (network,
/// OAuth, payload shape) behind the failure categories the chain cares about.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The service is not configured (e.g. missing credentials) and should be
    /// skipped silently.
    #[error("Service not configured")]
    Unavailable,
    /// The upstream call failed: network error, timeout, or non-2xx status.
    #[error("Upstream failure: {0}")]
    Upstream(String),
    /// The upstream answered but the payload could not be understood.
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// One astrology data source: resolve a chart for a birth input, or report
/// why it cannot. Implementations are tried in preference order by the
/// provider chain; any error falls through to the next source.
#[async_trait]
pub trait ChartProvider: Send + Sync {
    /// Short stable name, used for logging and to report which source won.
    fn name(&self) -> &'static str;

    async fn resolve_chart(&self, input: &BirthInput) -> PortResult<BirthChart>;
}

/// An alternate generator producing the full nine-framework bundle from a
/// chart (e.g. via a text model). Any failure means the caller falls back to
/// the rule-based engine; partial bundles are never returned.
#[async_trait]
pub trait AssessmentGenerator: Send + Sync {
    async fn generate_assessment(
        &self,
        input: &BirthInput,
        chart: &BirthChart,
    ) -> PortResult<AssessmentBundle>;
}
