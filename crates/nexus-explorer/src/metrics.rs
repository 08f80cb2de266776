//! Prometheus metrics

use prometheus::{
    Encoder, Gauge, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

/// Explorer metrics registry
#[derive(Clone)]
pub struct ExplorerMetrics {
    registry: Registry,
    /// Requests served, by endpoint
    pub requests_total: IntCounterVec,
    pub cache_hits_total: IntCounter,
    pub cache_misses_total: IntCounter,
    /// Height estimated at the last snapshot computation
    pub estimated_block_height: IntGauge,
    /// Supply in KAS at the last snapshot computation
    pub total_supply_kas: Gauge,
}

impl ExplorerMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("nexus_requests_total", "API requests served"),
            &["endpoint"],
        )?;
        let cache_hits_total = IntCounter::new("nexus_cache_hits_total", "Response cache hits")?;
        let cache_misses_total =
            IntCounter::new("nexus_cache_misses_total", "Response cache misses")?;
        let estimated_block_height = IntGauge::new(
            "nexus_estimated_block_height",
            "Block height estimated from wall-clock time",
        )?;
        let total_supply_kas =
            Gauge::new("nexus_total_supply_kas", "Cumulative emitted supply in KAS")?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(cache_hits_total.clone()))?;
        registry.register(Box::new(cache_misses_total.clone()))?;
        registry.register(Box::new(estimated_block_height.clone()))?;
        registry.register(Box::new(total_supply_kas.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            cache_hits_total,
            cache_misses_total,
            estimated_block_height,
            total_supply_kas,
        })
    }

    /// Text exposition format
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
