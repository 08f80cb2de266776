//! # Nexus Emission - Kaspa Emission Schedule Calculator
//!
//! Pure, deterministic model of the Kaspa block-reward curve.
//!
//! ## Key Features
//!
//! - **Step decay**: the block reward is multiplied by a fixed decay factor
//!   (1/2 by default) every `halving_interval` blocks
//! - **Exact supply integration**: rewards and supply are `Decimal` KAS, so
//!   repeated decay keeps sub-sompi precision; supply is summed epoch by
//!   epoch and clamped to the maximum supply
//! - **Halving events**: enumerable boundaries with rewards and supply
//! - **Network snapshot**: estimated chain state from an injected wall clock
//!
//! ## Default Schedule
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KAS EMISSION (1 block / second)                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Halving interval:   31,104,000 blocks (12 × 30 days)                   │
//! │  Max supply:         28,700,000,000 KAS                                 │
//! │  Genesis:            2021-11-07 00:00:00 UTC                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Epoch | Block Reward | Epoch Emission | Supply at End |
//! |-------|--------------|----------------|---------------|
//! | 0 | 500 KAS | 15.552B KAS | 15.552B KAS |
//! | 1 | 250 KAS | 7.776B KAS | 23.328B KAS |
//! | 2 | 125 KAS | 3.888B KAS | 27.216B KAS |
//! | 3 | 62.5 KAS | capped | 28.7B KAS |
//! | ... | (decay continues) | 0 | 28.7B KAS |
//!
//! ## Example
//!
//! ```
//! use nexus_emission::{EmissionCalculator, EmissionParams};
//! use rust_decimal::Decimal;
//!
//! let calc = EmissionCalculator::new(EmissionParams::kaspa()).unwrap();
//! assert_eq!(calc.block_reward(31_104_000), Decimal::from(250));
//! ```

pub mod emission;
pub mod error;
pub mod halving;
pub mod params;
pub mod schedule;
pub mod snapshot;
pub mod units;

// Re-exports
pub use emission::EmissionCalculator;
pub use error::{EmissionError, Result};
pub use halving::HalvingEvent;
pub use params::{DecayFactor, EmissionParams};
pub use schedule::{EmissionDataPoint, Schedule};
pub use snapshot::NetworkSnapshot;

/// Kaspa emission constants
pub mod constants {
    use rust_decimal::Decimal;

    /// Token symbol
    pub const SYMBOL: &str = "KAS";

    /// Base units per KAS
    pub const SOMPI_PER_KAS: u64 = 100_000_000;

    /// Smallest non-zero block reward: one sompi (1e-8 KAS)
    pub const REWARD_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 8);

    /// Initial block reward: 500 KAS
    pub const INITIAL_BLOCK_REWARD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

    /// Seconds per block
    pub const BLOCK_PERIOD_SECS: u64 = 1;

    /// Blocks per day at one block per second
    pub const BLOCKS_PER_DAY: u64 = 86_400;

    /// Blocks per 30-day month
    pub const BLOCKS_PER_MONTH: u64 = 2_592_000;

    /// Blocks per 365-day year
    pub const BLOCKS_PER_YEAR: u64 = 31_536_000;

    /// Halving interval: 12 months of blocks
    pub const HALVING_INTERVAL: u64 = BLOCKS_PER_MONTH * 12; // 31,104,000 blocks

    /// Maximum supply: 28.7 billion KAS
    // 6 × 2^32 + 2_930_196_224
    pub const MAX_SUPPLY: Decimal = Decimal::from_parts(2_930_196_224, 6, 0, false, 0);

    /// Genesis: 2021-11-07T00:00:00Z
    pub const GENESIS_TIMESTAMP: i64 = 1_636_243_200;

    /// Upper bound on halving epochs walked by supply integration
    pub const MAX_HALVINGS: u64 = 50;

    /// Default projection horizon in years
    pub const DEFAULT_YEARS_TO_PROJECT: u32 = 20;

    /// Default samples per projected year (monthly)
    pub const DEFAULT_SAMPLES_PER_YEAR: u32 = 12;

    /// Default number of halving events to enumerate
    pub const DEFAULT_MAX_HALVING_EVENTS: u32 = 15;
}

pub use constants::*;
