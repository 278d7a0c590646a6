//! services/api/src/adapters/chain.rs
//!
//! The provider chain: an ordered list of `ChartProvider` strategies tried
//! strictly in preference order, short-circuiting on the first success.
//! With the mock adapter registered last, resolution as a whole never fails.

use oracle_core::domain::{BirthChart, BirthInput};
use oracle_core::ports::{ChartProvider, PortError};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::mock::default_chart;

/// A resolved chart plus the name of the source that produced it.
#[derive(Debug, Clone)]
pub struct ChartResolution {
    pub chart: BirthChart,
    pub source: &'static str,
}

/// Tries each registered provider in order; new sources are added by
/// registering another implementation, not by branching.
pub struct ProviderChain {
    providers: Vec<Arc<dyn ChartProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn ChartProvider>>) -> Self {
        Self { providers }
    }

    /// Resolves a chart for the given input. Unconfigured providers are
    /// skipped silently; failing ones are logged and fallen through. Never
    /// raises to the caller.
    pub async fn resolve(&self, input: &BirthInput) -> ChartResolution {
        for provider in &self.providers {
            match provider.resolve_chart(input).await {
                Ok(chart) => {
                    info!(provider = provider.name(), "resolved birth chart");
                    return ChartResolution {
                        chart,
                        source: provider.name(),
                    };
                }
                Err(PortError::Unavailable) => {
                    debug!(provider = provider.name(), "provider not configured, skipping");
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, falling through"
                    );
                }
            }
        }

        // Unreachable while the mock adapter terminates the chain; kept so an
        // empty or misconfigured chain still produces a chart.
        ChartResolution {
            chart: default_chart(),
            source: "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use oracle_core::domain::ZodiacSign;
    use oracle_core::ports::PortResult;

    struct FailingProvider;

    #[async_trait]
    impl ChartProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn resolve_chart(&self, _input: &BirthInput) -> PortResult<BirthChart> {
            Err(PortError::Upstream("boom".to_string()))
        }
    }

    struct UnconfiguredProvider;

    #[async_trait]
    impl ChartProvider for UnconfiguredProvider {
        fn name(&self) -> &'static str {
            "unconfigured"
        }
        async fn resolve_chart(&self, _input: &BirthInput) -> PortResult<BirthChart> {
            Err(PortError::Unavailable)
        }
    }

    fn input() -> BirthInput {
        BirthInput {
            name: "Test".to_string(),
            birth_date: "2000-01-01".to_string(),
            birth_time: "12:00".to_string(),
            birth_place: "Nowhere".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            timezone: "UTC".to_string(),
        }
    }

    #[tokio::test]
    async fn failures_fall_through_to_the_mock_tail() {
        let chain = ProviderChain::new(vec![
            Arc::new(UnconfiguredProvider),
            Arc::new(FailingProvider),
            Arc::new(super::super::mock::MockChartAdapter),
        ]);
        let resolution = chain.resolve(&input()).await;
        assert_eq!(resolution.source, "mock");
        assert_eq!(resolution.chart.sun_sign, ZodiacSign::Leo);
        assert_eq!(resolution.chart.moon_sign, ZodiacSign::Scorpio);
        assert_eq!(resolution.chart.rising_sign, ZodiacSign::Cancer);
    }

    #[tokio::test]
    async fn empty_chain_still_yields_the_default_chart() {
        let chain = ProviderChain::new(vec![]);
        let resolution = chain.resolve(&input()).await;
        assert_eq!(resolution.source, "fallback");
        assert_eq!(resolution.chart.sun_sign, ZodiacSign::Leo);
    }
}
