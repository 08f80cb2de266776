//! KASPA-NEXUS Explorer
//!
//! HTTP query service over the emission calculator:
//! - `/api/kaspa/network`: estimated network snapshot
//! - `/api/kaspa/emission`: projected schedule, halving events, constants
//! - `/metrics`: Prometheus exposition

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod state;

pub use api::router;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ExplorerConfig;
pub use state::AppState;
