//! Emission curve parameters
//!
//! `EmissionParams` is the single configuration value passed into every
//! calculation. Amounts are `Decimal` KAS; durations in blocks unless noted.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{EmissionError, Result};

/// Reward multiplier applied at each halving boundary, `0 < f <= 1`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecayFactor(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Default for DecayFactor {
    fn default() -> Self {
        Self::HALF
    }
}

impl DecayFactor {
    /// Classic halving
    pub const HALF: Self = Self(Decimal::from_parts(5, 0, 0, false, 1));

    /// No decay; only meaningful for testing the safety bound
    pub const NONE: Self = Self(Decimal::ONE);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Apply one decay step
    pub fn apply(&self, amount: Decimal) -> Decimal {
        // f <= 1 after validation, so the product never exceeds `amount`
        amount * self.0
    }

    /// True when applying the factor leaves amounts unchanged
    pub fn is_identity(&self) -> bool {
        self.0 == Decimal::ONE
    }

    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Percentage removed from the reward at each halving
    pub fn reduction_percent(&self) -> f64 {
        ((Decimal::ONE - self.0) * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        if self.0 <= Decimal::ZERO {
            return Err(EmissionError::InvalidConfiguration(
                "decay factor must be greater than zero".into(),
            ));
        }
        if self.0 > Decimal::ONE {
            return Err(EmissionError::InvalidConfiguration(format!(
                "decay factor {} exceeds 1, emission would not converge",
                self.0
            )));
        }
        Ok(())
    }
}

/// Emission curve constants
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionParams {
    /// Reward of every block in the first epoch (KAS)
    #[serde(
        default = "default_initial_block_reward",
        with = "rust_decimal::serde::float"
    )]
    pub initial_block_reward: Decimal,

    /// Blocks between two halvings
    #[serde(default = "default_halving_interval")]
    pub halving_interval: u64,

    /// Hard cap on cumulative supply (KAS)
    #[serde(default = "default_max_supply", with = "rust_decimal::serde::float")]
    pub max_supply: Decimal,

    #[serde(default = "default_blocks_per_day")]
    pub blocks_per_day: u64,

    #[serde(default = "default_blocks_per_month")]
    pub blocks_per_month: u64,

    #[serde(default = "default_blocks_per_year")]
    pub blocks_per_year: u64,

    /// Assumed constant block period in seconds
    #[serde(default = "default_block_period_secs")]
    pub block_period_secs: u64,

    /// Chain genesis (unix seconds)
    #[serde(default = "default_genesis_timestamp")]
    pub genesis_timestamp: i64,

    #[serde(default)]
    pub decay_factor: DecayFactor,
}

fn default_initial_block_reward() -> Decimal {
    INITIAL_BLOCK_REWARD
}

fn default_halving_interval() -> u64 {
    HALVING_INTERVAL
}

fn default_max_supply() -> Decimal {
    MAX_SUPPLY
}

fn default_blocks_per_day() -> u64 {
    BLOCKS_PER_DAY
}

fn default_blocks_per_month() -> u64 {
    BLOCKS_PER_MONTH
}

fn default_blocks_per_year() -> u64 {
    BLOCKS_PER_YEAR
}

fn default_block_period_secs() -> u64 {
    BLOCK_PERIOD_SECS
}

fn default_genesis_timestamp() -> i64 {
    GENESIS_TIMESTAMP
}

impl Default for EmissionParams {
    fn default() -> Self {
        Self::kaspa()
    }
}

impl EmissionParams {
    /// Mainnet Kaspa parameters
    pub fn kaspa() -> Self {
        Self {
            initial_block_reward: default_initial_block_reward(),
            halving_interval: default_halving_interval(),
            max_supply: default_max_supply(),
            blocks_per_day: default_blocks_per_day(),
            blocks_per_month: default_blocks_per_month(),
            blocks_per_year: default_blocks_per_year(),
            block_period_secs: default_block_period_secs(),
            genesis_timestamp: default_genesis_timestamp(),
            decay_factor: DecayFactor::HALF,
        }
    }

    pub fn with_decay_factor(mut self, decay_factor: DecayFactor) -> Self {
        self.decay_factor = decay_factor;
        self
    }

    pub fn with_halving_interval(mut self, halving_interval: u64) -> Self {
        self.halving_interval = halving_interval;
        self
    }

    pub fn with_max_supply(mut self, max_supply: Decimal) -> Self {
        self.max_supply = max_supply;
        self
    }

    pub fn with_initial_block_reward(mut self, initial_block_reward: Decimal) -> Self {
        self.initial_block_reward = initial_block_reward;
        self
    }

    /// Reject configurations that cannot produce a well-formed schedule
    pub fn validate(&self) -> Result<()> {
        if self.halving_interval == 0 {
            return Err(EmissionError::InvalidConfiguration(
                "halving interval must be positive".into(),
            ));
        }
        if self.initial_block_reward < REWARD_EPSILON {
            return Err(EmissionError::InvalidConfiguration(
                "initial block reward must be at least one sompi".into(),
            ));
        }
        if self.max_supply <= Decimal::ZERO {
            return Err(EmissionError::InvalidConfiguration(
                "max supply must be positive".into(),
            ));
        }
        if self.block_period_secs == 0 {
            return Err(EmissionError::InvalidConfiguration(
                "block period must be positive".into(),
            ));
        }
        if self.blocks_per_day == 0 || self.blocks_per_month == 0 || self.blocks_per_year == 0 {
            return Err(EmissionError::InvalidConfiguration(
                "blocks per day, month and year must be positive".into(),
            ));
        }
        self.decay_factor.validate()
    }
}
