//! Halving event enumeration

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::emission::EmissionCalculator;

/// A reward reduction at an epoch boundary
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalvingEvent {
    /// 1-based halving index
    pub halving_number: u64,
    pub block_height: u64,
    /// Years since genesis
    pub year: u64,
    /// Month within the year (0-11)
    pub month: u64,
    /// Reward of the last block before the boundary (KAS)
    #[serde(with = "rust_decimal::serde::float")]
    pub reward_before: Decimal,
    /// Reward of the boundary block (KAS)
    #[serde(with = "rust_decimal::serde::float")]
    pub reward_after: Decimal,
    pub reduction_percent: f64,
    /// Supply emitted before the boundary block (KAS)
    #[serde(with = "rust_decimal::serde::float")]
    pub total_supply: Decimal,
    pub percent_of_max: f64,
}

impl EmissionCalculator {
    /// Halving events `1..=max_events`, stopping past `years_horizon` or once
    /// the reward has decayed to nothing
    pub fn list_halving_events(&self, max_events: u32, years_horizon: u32) -> Vec<HalvingEvent> {
        let params = self.params();
        let mut events = Vec::new();

        for i in 1..=max_events as u64 {
            let Some(height) = i.checked_mul(params.halving_interval) else {
                break;
            };
            let months = height / params.blocks_per_month;
            let year = months / 12;
            if year > years_horizon as u64 {
                break;
            }

            let reward_before = self.block_reward(height - 1);
            if reward_before.is_zero() {
                break;
            }
            let reward_after = self.block_reward(height);
            let total_supply = self.total_supply(height);

            events.push(HalvingEvent {
                halving_number: i,
                block_height: height,
                year,
                month: months % 12,
                reward_before,
                reward_after,
                reduction_percent: params.decay_factor.reduction_percent(),
                total_supply,
                percent_of_max: self.percent_of_max(total_supply),
            });
        }

        events
    }
}
