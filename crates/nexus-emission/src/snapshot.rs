//! Network snapshot estimated from wall-clock time
//!
//! The chain height is not observed; it is derived from the time elapsed
//! since genesis under a constant block period. Callers inject `now` so the
//! estimate is reproducible.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::emission::EmissionCalculator;

/// Estimated network state at a point in time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSnapshot {
    /// Unix seconds the snapshot was taken at
    pub timestamp: i64,
    pub estimated_block_height: u64,
    /// KAS
    #[serde(with = "rust_decimal::serde::float")]
    pub current_block_reward: Decimal,
    /// KAS
    #[serde(with = "rust_decimal::serde::float")]
    pub current_total_supply: Decimal,
    pub percent_of_max: f64,
    pub current_halving_number: u64,
    pub next_halving_block: u64,
    pub blocks_until_next_halving: u64,
    pub days_until_next_halving: u64,
}

impl EmissionCalculator {
    /// Height estimate for `now`; zero before genesis
    pub fn estimated_block_height(&self, now: i64, genesis_timestamp: i64) -> u64 {
        let elapsed = now.saturating_sub(genesis_timestamp).max(0) as u64;
        elapsed / self.params().block_period_secs
    }

    /// Snapshot at `now` for a chain started at `genesis_timestamp`
    pub fn current_snapshot(&self, now: i64, genesis_timestamp: i64) -> NetworkSnapshot {
        let height = self.estimated_block_height(now, genesis_timestamp);
        self.snapshot_at_height(height, now)
    }

    /// Snapshot for a known height
    pub fn snapshot_at_height(&self, height: u64, timestamp: i64) -> NetworkSnapshot {
        let total_supply = self.total_supply(height);
        let next_halving_block = self.next_halving_block(height);
        let blocks_until_next_halving = next_halving_block.saturating_sub(height);

        NetworkSnapshot {
            timestamp,
            estimated_block_height: height,
            current_block_reward: self.block_reward(height),
            current_total_supply: total_supply,
            percent_of_max: self.percent_of_max(total_supply),
            current_halving_number: self.halving_number(height),
            next_halving_block,
            blocks_until_next_halving,
            days_until_next_halving: blocks_until_next_halving / self.params().blocks_per_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::params::EmissionParams;

    #[test]
    fn test_snapshot_at_genesis() {
        let calc = EmissionCalculator::kaspa();
        let snapshot = calc.current_snapshot(GENESIS_TIMESTAMP, GENESIS_TIMESTAMP);

        assert_eq!(snapshot.estimated_block_height, 0);
        assert_eq!(snapshot.current_block_reward, INITIAL_BLOCK_REWARD);
        assert_eq!(snapshot.current_total_supply, Decimal::ZERO);
        assert_eq!(snapshot.current_halving_number, 0);
        assert_eq!(snapshot.next_halving_block, HALVING_INTERVAL);
        assert_eq!(snapshot.blocks_until_next_halving, HALVING_INTERVAL);
        assert_eq!(snapshot.days_until_next_halving, 360);
    }

    #[test]
    fn test_before_genesis_clamps_to_zero() {
        let calc = EmissionCalculator::kaspa();
        let snapshot = calc.current_snapshot(GENESIS_TIMESTAMP - 1_000, GENESIS_TIMESTAMP);
        assert_eq!(snapshot.estimated_block_height, 0);
        assert_eq!(snapshot.current_total_supply, Decimal::ZERO);
    }

    #[test]
    fn test_snapshot_mid_epoch() {
        let calc = EmissionCalculator::kaspa();
        let now = GENESIS_TIMESTAMP + HALVING_INTERVAL as i64 + 86_400;
        let snapshot = calc.current_snapshot(now, GENESIS_TIMESTAMP);

        assert_eq!(snapshot.timestamp, now);
        assert_eq!(snapshot.estimated_block_height, HALVING_INTERVAL + 86_400);
        assert_eq!(snapshot.current_halving_number, 1);
        assert_eq!(snapshot.current_block_reward, Decimal::from(250));
        assert_eq!(snapshot.next_halving_block, 2 * HALVING_INTERVAL);
        assert_eq!(snapshot.days_until_next_halving, 359);
        assert_eq!(
            snapshot.current_total_supply,
            Decimal::from(15_552_000_000u64 + 250 * 86_400)
        );
    }

    #[test]
    fn test_snapshot_at_last_height() {
        let params = EmissionParams::kaspa().with_halving_interval(1);
        let calc = EmissionCalculator::new(params).unwrap();
        let snapshot = calc.snapshot_at_height(u64::MAX, 0);

        assert_eq!(snapshot.current_halving_number, u64::MAX);
        assert_eq!(snapshot.next_halving_block, u64::MAX);
        assert_eq!(snapshot.blocks_until_next_halving, 0);
        assert_eq!(snapshot.days_until_next_halving, 0);
        assert!(snapshot.current_block_reward.is_zero());
        // 500 × (2 - 2^-35): every one-block epoch until the reward drops below a sompi
        assert!(snapshot.current_total_supply < Decimal::from(1_000));
        assert!(snapshot.current_total_supply > Decimal::from(999));
    }

    #[test]
    fn test_height_monotonic_in_time() {
        let calc = EmissionCalculator::kaspa();
        let mut last = 0;
        for offset in (0..10_000_000i64).step_by(999_983) {
            let height = calc.estimated_block_height(GENESIS_TIMESTAMP + offset, GENESIS_TIMESTAMP);
            assert!(height >= last);
            last = height;
        }
    }
}
