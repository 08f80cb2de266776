//! HTTP routes
//!
//! Every JSON response uses the envelope
//! `{"success": bool, "data": ..., "timestamp": RFC3339}`. Amounts are
//! reported as KAS numbers, rounded from the exact `Decimal` values only at
//! this boundary.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use nexus_emission::{
    units::kas_to_f64, EmissionDataPoint, EmissionError, HalvingEvent, NetworkSnapshot,
    MAX_HALVINGS, SOMPI_PER_KAS,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::cache::CacheStatus;
use crate::state::AppState;

/// Error surfaced to API clients as a 500 response
#[derive(Debug)]
pub struct ApiError {
    /// Endpoint-level description
    pub context: &'static str,
    pub message: String,
    pub code: u32,
}

impl ApiError {
    fn emission(context: &'static str, err: EmissionError) -> Self {
        Self {
            context,
            message: err.to_string(),
            code: err.code(),
        }
    }

    fn internal(context: &'static str, err: anyhow::Error) -> Self {
        Self {
            context,
            message: err.to_string(),
            code: 9999,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("{}: {}", self.context, self.message);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": self.context,
                "code": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}

/// Build the explorer router
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/kaspa/network", get(network_stats))
        .route("/api/kaspa/emission", get(emission_schedule));

    if state.config.metrics.enabled {
        app = app.route("/metrics", get(metrics));
    }

    if state.config.server.cors_allow_any {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.with_state(state)
}

/// RFC3339 rendering of a unix timestamp
pub fn rfc3339(unix_secs: i64) -> String {
    chrono::DateTime::from_timestamp(unix_secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

fn envelope(data: &Value, now: i64) -> Value {
    json!({
        "success": true,
        "data": data,
        "timestamp": rfc3339(now),
    })
}

fn record_cache(state: &AppState, status: CacheStatus) {
    match status {
        CacheStatus::Hit => state.metrics.cache_hits_total.inc(),
        CacheStatus::Miss => state.metrics.cache_misses_total.inc(),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    let metrics_route = state.config.metrics.enabled.then_some("/metrics");
    Json(json!({
        "name": "KASPA-NEXUS Explorer API",
        "version": env!("CARGO_PKG_VERSION"),
        "chain": "Kaspa",
        "endpoints": {
            "health": "/health",
            "network": "/api/kaspa/network",
            "emission": "/api/kaspa/emission",
            "metrics": metrics_route,
        }
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": state.clock.now(),
    }))
}

/// Estimated network statistics
pub async fn network_stats(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.metrics.requests_total.with_label_values(&["network"]).inc();
    let now = state.clock.now();

    let (data, status) = state
        .network_cache
        .get_or_try_insert_with(now, || Ok::<_, ApiError>(build_network_stats(&state, now)))
        .await?;
    record_cache(&state, status);

    Ok(Json(envelope(&data, now)))
}

/// Emission schedule, halving events and current stats
pub async fn emission_schedule(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    state.metrics.requests_total.with_label_values(&["emission"]).inc();
    let now = state.clock.now();

    let (data, status) = state
        .emission_cache
        .get_or_try_insert_with(now, || {
            build_emission_report(&state, now)
                .map_err(|e| ApiError::emission("Failed to generate emission schedule", e))
        })
        .await?;
    record_cache(&state, status);

    Ok(Json(envelope(&data, now)))
}

async fn metrics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let body = state
        .metrics
        .render()
        .map_err(|e| ApiError::internal("Failed to render metrics", e))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}

// ============================================================================
// Payload Builders
// ============================================================================

/// `data` payload of the network endpoint
pub fn build_network_stats(state: &AppState, now: i64) -> Value {
    let params = state.calculator.params();
    let network = &state.config.network;
    let snapshot = state
        .calculator
        .current_snapshot(now, params.genesis_timestamp);

    let total_supply = kas_to_f64(snapshot.current_total_supply);
    state
        .metrics
        .estimated_block_height
        .set(snapshot.estimated_block_height.min(i64::MAX as u64) as i64);
    state.metrics.total_supply_kas.set(total_supply);

    json!({
        "blockHeight": snapshot.estimated_block_height,
        "hashrate": network.hashrate_ths,
        "totalSupply": total_supply,
        // No lock-ups: everything emitted is circulating
        "circulatingSupply": total_supply,
        "currentBlockReward": kas_to_f64(snapshot.current_block_reward),
        "difficulty": network.difficulty,
        "blockTime": network.block_time_secs,
        "blocksPerDay": params.blocks_per_day,
        "percentOfMaxSupply": snapshot.percent_of_max,
        "currentHalvingNumber": snapshot.current_halving_number,
        "nextHalvingBlock": snapshot.next_halving_block,
        "blocksUntilNextHalving": snapshot.blocks_until_next_halving,
        "daysUntilNextHalving": snapshot.days_until_next_halving,
        "lastUpdated": rfc3339(now),
        "metricSources": {
            "blockHeight": "estimated",
            "totalSupply": "emission-model",
            "currentBlockReward": "emission-model",
            "hashrate": network.source,
            "difficulty": network.source,
        },
    })
}

/// `data` payload of the emission endpoint
pub fn build_emission_report(state: &AppState, now: i64) -> Result<Value, EmissionError> {
    let calc = &state.calculator;
    let params = calc.params();
    let query = &state.config.query;

    let schedule: Vec<Value> = calc
        .generate_schedule(query.years_to_project, query.samples_per_year)?
        .map(|point| data_point_json(&point))
        .collect();

    let halving_events: Vec<Value> = calc
        .list_halving_events(query.max_halving_events, query.years_to_project)
        .iter()
        .map(halving_event_json)
        .collect();

    let snapshot = calc.current_snapshot(now, params.genesis_timestamp);

    Ok(json!({
        "emissionSchedule": schedule,
        "halvingEvents": halving_events,
        "currentStats": current_stats_json(&snapshot),
        "constants": {
            "initialBlockReward": kas_to_f64(params.initial_block_reward),
            "halvingInterval": params.halving_interval,
            "maxSupply": kas_to_f64(params.max_supply),
            "blocksPerDay": params.blocks_per_day,
            "blocksPerMonth": params.blocks_per_month,
            "blocksPerYear": params.blocks_per_year,
            "blockPeriodSecs": params.block_period_secs,
            "decayFactor": params.decay_factor.as_f64(),
            "genesisTimestamp": params.genesis_timestamp,
            "maxHalvings": MAX_HALVINGS,
            "sompiPerKas": SOMPI_PER_KAS,
        },
    }))
}

fn data_point_json(point: &EmissionDataPoint) -> Value {
    json!({
        "year": point.year,
        "month": point.month,
        "blockHeight": point.block_height,
        "blockReward": kas_to_f64(point.block_reward),
        "totalSupply": kas_to_f64(point.total_supply),
        "percentOfMax": point.percent_of_max,
        "isHalvingPoint": point.is_halving_point,
    })
}

fn halving_event_json(event: &HalvingEvent) -> Value {
    json!({
        "halvingNumber": event.halving_number,
        "blockHeight": event.block_height,
        "year": event.year,
        "month": event.month,
        "rewardBefore": kas_to_f64(event.reward_before),
        "rewardAfter": kas_to_f64(event.reward_after),
        "reductionPercent": event.reduction_percent,
        "totalSupply": kas_to_f64(event.total_supply),
        "percentOfMaxSupply": event.percent_of_max,
    })
}

fn current_stats_json(snapshot: &NetworkSnapshot) -> Value {
    json!({
        "blockHeight": snapshot.estimated_block_height,
        "currentBlockReward": kas_to_f64(snapshot.current_block_reward),
        "totalSupply": kas_to_f64(snapshot.current_total_supply),
        "percentOfMaxSupply": snapshot.percent_of_max,
        "currentHalvingNumber": snapshot.current_halving_number,
        "nextHalvingBlock": snapshot.next_halving_block,
        "blocksUntilNextHalving": snapshot.blocks_until_next_halving,
        "daysUntilNextHalving": snapshot.days_until_next_halving,
    })
}

// ============================================================================
// Tests
// ============================================================================
