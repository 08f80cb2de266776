//! Shared application state

use std::sync::Arc;

use nexus_emission::EmissionCalculator;

use crate::cache::TimeBucketCache;
use crate::clock::{Clock, SystemClock};
use crate::config::ExplorerConfig;
use crate::metrics::ExplorerMetrics;

/// Application state
pub struct AppState {
    pub config: ExplorerConfig,
    pub calculator: EmissionCalculator,
    pub clock: Arc<dyn Clock>,
    pub metrics: ExplorerMetrics,
    /// Cached `data` payload of the network endpoint
    pub network_cache: TimeBucketCache<serde_json::Value>,
    /// Cached `data` payload of the emission endpoint
    pub emission_cache: TimeBucketCache<serde_json::Value>,
}

impl AppState {
    /// State reading the system clock
    pub fn new(config: ExplorerConfig) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ExplorerConfig, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        config.validate()?;
        let calculator = EmissionCalculator::new(config.emission.clone())?;
        let ttl_secs = config.cache.ttl_secs;

        Ok(Self {
            calculator,
            clock,
            metrics: ExplorerMetrics::new()?,
            network_cache: TimeBucketCache::new(ttl_secs),
            emission_cache: TimeBucketCache::new(ttl_secs),
            config,
        })
    }
}
