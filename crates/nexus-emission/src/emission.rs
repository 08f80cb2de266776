//! # Emission Calculator
//!
//! Block reward and cumulative supply as functions of block height.
//!
//! ## Reward Curve
//!
//! ```text
//! reward(h)  = initial × decay^⌊h / halving_interval⌋   (0 once below one sompi)
//! supply(h)  = Σ epochs  reward_k × blocks of epoch k below h,  clamped to max_supply
//! ```
//!
//! Amounts are `Decimal` KAS, so a reward keeps its fractional sompi across
//! halvings. Supply is integrated epoch by epoch rather than through a
//! geometric series so it matches the reward step function exactly. The
//! walk stops after `MAX_HALVINGS` epochs regardless of configuration.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::{MAX_HALVINGS, REWARD_EPSILON};
use crate::error::Result;
use crate::params::EmissionParams;

/// Emission schedule calculator over a validated parameter set
#[derive(Clone, Debug)]
pub struct EmissionCalculator {
    params: EmissionParams,
}

impl Default for EmissionCalculator {
    fn default() -> Self {
        Self::kaspa()
    }
}

/// Result of walking the supply curve up to a height
#[derive(Clone, Copy)]
struct SupplyWalk {
    supply: Decimal,
    /// Blocks below the height were left uncounted at the halving bound
    bounded: bool,
}

impl EmissionCalculator {
    /// Create a calculator, rejecting invalid parameters
    pub fn new(params: EmissionParams) -> Result<Self> {
        params.validate()?;
        let calculator = Self { params };
        if calculator.hits_safety_bound() {
            tracing::warn!(
                max_halvings = MAX_HALVINGS,
                decay_factor = %calculator.params.decay_factor.value(),
                "Emission does not converge within the halving bound, supply will be truncated"
            );
        }
        Ok(calculator)
    }

    /// Calculator for mainnet Kaspa parameters
    pub fn kaspa() -> Self {
        Self {
            params: EmissionParams::kaspa(),
        }
    }

    pub fn params(&self) -> &EmissionParams {
        &self.params
    }

    /// Number of halvings that have occurred at `height`
    pub fn halving_number(&self, height: u64) -> u64 {
        height / self.params.halving_interval
    }

    /// First block of the epoch after the one containing `height`, saturating at `u64::MAX`
    pub fn next_halving_block(&self, height: u64) -> u64 {
        self.halving_number(height)
            .saturating_add(1)
            .saturating_mul(self.params.halving_interval)
    }

    /// Block reward after `halvings` decay steps
    pub fn reward_for_halving(&self, halvings: u64) -> Decimal {
        let mut reward = self.params.initial_block_reward;
        if self.params.decay_factor.is_identity() {
            return reward;
        }
        for _ in 0..halvings {
            let next = self.decay_step(reward);
            // Zero, or rounding has pinned the reward at a fixed point
            if next == reward {
                break;
            }
            reward = next;
        }
        reward
    }

    /// Reward of the block at `height` (KAS)
    pub fn block_reward(&self, height: u64) -> Decimal {
        self.reward_for_halving(self.halving_number(height))
    }

    /// Cumulative supply emitted by blocks `0..height` (KAS)
    pub fn total_supply(&self, height: u64) -> Decimal {
        let walk = self.walk_supply(height);
        if walk.bounded {
            tracing::debug!(height, "Supply walk stopped at the halving bound");
        }
        walk.supply
    }

    /// True when some height leaves blocks uncounted because the decay
    /// has not reached zero or the cap within `MAX_HALVINGS` epochs
    pub fn hits_safety_bound(&self) -> bool {
        self.walk_supply(u64::MAX).bounded
    }

    /// Share of max supply, in percent
    pub fn percent_of_max(&self, supply: Decimal) -> f64 {
        (supply / self.params.max_supply * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or_default()
    }

    /// True when `height` is the first block of a new epoch
    pub fn is_halving_point(&self, height: u64) -> bool {
        height > 0 && height % self.params.halving_interval == 0
    }

    /// One decay step, flushing rewards below one sompi to zero
    fn decay_step(&self, reward: Decimal) -> Decimal {
        let next = self.params.decay_factor.apply(reward);
        if next < REWARD_EPSILON {
            Decimal::ZERO
        } else {
            next
        }
    }

    fn walk_supply(&self, height: u64) -> SupplyWalk {
        let interval = self.params.halving_interval;
        let max_supply = self.params.max_supply;
        let capped = SupplyWalk {
            supply: max_supply,
            bounded: false,
        };

        let mut supply = Decimal::ZERO;
        let mut current_block = 0u64;
        let mut halving = 0u64;
        let mut reward = self.params.initial_block_reward;

        while current_block < height {
            if halving > MAX_HALVINGS {
                return SupplyWalk {
                    supply: supply.min(max_supply),
                    bounded: true,
                };
            }

            let epoch_end = halving
                .saturating_add(1)
                .saturating_mul(interval)
                .min(height);
            let blocks = Decimal::from(epoch_end - current_block);

            // Overflow only happens far beyond any sane cap
            let Some(next_supply) = blocks
                .checked_mul(reward)
                .and_then(|minted| supply.checked_add(minted))
            else {
                return capped;
            };
            if next_supply >= max_supply {
                return capped;
            }
            supply = next_supply;

            current_block = epoch_end;
            halving += 1;
            reward = self.decay_step(reward);
            if reward.is_zero() {
                break;
            }
        }

        SupplyWalk {
            supply,
            bounded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::error::EmissionError;
    use crate::params::DecayFactor;

    fn kas(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_halving_schedule() {
        let calc = EmissionCalculator::kaspa();

        // Epoch 0: 500 KAS
        assert_eq!(calc.block_reward(0), kas(500));
        assert_eq!(calc.block_reward(HALVING_INTERVAL - 1), kas(500));

        // Epoch 1: 250 KAS (halved)
        assert_eq!(calc.block_reward(31_104_000), kas(250));

        // Epoch 2: 125 KAS (halved again)
        assert_eq!(calc.block_reward(62_208_000), kas(125));

        // Epoch 3: 62.5 KAS
        assert_eq!(calc.block_reward(3 * HALVING_INTERVAL), Decimal::new(625, 1));
    }

    #[test]
    fn test_halving_ratio_exact_past_whole_sompi() {
        let calc = EmissionCalculator::kaspa();
        // 500 / 2^11 = 0.244140625 KAS, half a sompi below what integer sompi can hold
        for i in 1..=15u64 {
            let before = calc.block_reward((i - 1) * HALVING_INTERVAL);
            let after = calc.block_reward(i * HALVING_INTERVAL);
            assert_eq!(after * Decimal::from(2), before, "halving {}", i);
            assert_eq!(after, kas(500) / Decimal::from(1u64 << i), "halving {}", i);
        }
        assert_eq!(calc.block_reward(11 * HALVING_INTERVAL), Decimal::new(244_140_625, 9));
    }

    #[test]
    fn test_reward_underflows_to_zero() {
        let calc = EmissionCalculator::kaspa();
        // 500 KAS needs 36 halvings to fall below one sompi
        assert!(calc.reward_for_halving(35) >= REWARD_EPSILON);
        assert!(calc.reward_for_halving(36).is_zero());
        assert!(calc.reward_for_halving(10_000).is_zero());
        assert!(calc.block_reward(u64::MAX).is_zero());
    }

    #[test]
    fn test_genesis_supply() {
        let calc = EmissionCalculator::kaspa();
        assert_eq!(calc.total_supply(0), Decimal::ZERO);
        assert_eq!(calc.total_supply(1), kas(500));
    }

    #[test]
    fn test_first_epoch_supply() {
        let calc = EmissionCalculator::kaspa();
        assert_eq!(calc.total_supply(31_104_000), kas(15_552_000_000));
        assert_eq!(calc.total_supply(2 * HALVING_INTERVAL), kas(23_328_000_000));
    }

    #[test]
    fn test_supply_clamped_to_max() {
        let calc = EmissionCalculator::kaspa();
        // Epoch 3 would push the total to 29.16B, above the cap
        assert_eq!(calc.total_supply(4 * HALVING_INTERVAL), MAX_SUPPLY);
        assert_eq!(calc.total_supply(u64::MAX), MAX_SUPPLY);
        assert!(!calc.hits_safety_bound());
    }

    #[test]
    fn test_safety_bound_without_decay() {
        let params = EmissionParams::kaspa()
            .with_decay_factor(DecayFactor::NONE)
            .with_halving_interval(10)
            .with_initial_block_reward(REWARD_EPSILON)
            .with_max_supply(Decimal::from(u64::MAX));
        let calc = EmissionCalculator::new(params).unwrap();

        // 51 epochs of 10 blocks at one sompi, then the bound stops the walk
        assert_eq!(calc.total_supply(1_000_000_000_000), Decimal::new(510, 8));
        assert!(calc.hits_safety_bound());
    }

    #[test]
    fn test_no_decay_clamps_to_max() {
        let params = EmissionParams::kaspa()
            .with_decay_factor(DecayFactor::NONE)
            .with_max_supply(kas(1_000));
        let calc = EmissionCalculator::new(params).unwrap();

        assert_eq!(calc.total_supply(u64::MAX), kas(1_000));
        assert_eq!(calc.block_reward(u64::MAX), INITIAL_BLOCK_REWARD);
        assert!(!calc.hits_safety_bound());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = EmissionParams::kaspa().with_halving_interval(0);
        assert!(matches!(
            EmissionCalculator::new(params),
            Err(EmissionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_halving_helpers() {
        let calc = EmissionCalculator::kaspa();
        assert_eq!(calc.halving_number(HALVING_INTERVAL - 1), 0);
        assert_eq!(calc.halving_number(HALVING_INTERVAL), 1);
        assert_eq!(calc.next_halving_block(0), HALVING_INTERVAL);
        assert_eq!(calc.next_halving_block(HALVING_INTERVAL), 2 * HALVING_INTERVAL);
        assert!(!calc.is_halving_point(0));
        assert!(calc.is_halving_point(HALVING_INTERVAL));
        assert!(!calc.is_halving_point(HALVING_INTERVAL + 1));
    }

    #[test]
    fn test_next_halving_block_saturates() {
        let params = EmissionParams::kaspa().with_halving_interval(1);
        let calc = EmissionCalculator::new(params).unwrap();

        assert_eq!(calc.halving_number(u64::MAX), u64::MAX);
        assert_eq!(calc.next_halving_block(u64::MAX), u64::MAX);
        assert_eq!(calc.next_halving_block(u64::MAX - 1), u64::MAX);
        assert_eq!(EmissionCalculator::kaspa().next_halving_block(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_percent_of_max() {
        let calc = EmissionCalculator::kaspa();
        assert_eq!(calc.percent_of_max(MAX_SUPPLY), 100.0);
        assert_eq!(calc.percent_of_max(Decimal::ZERO), 0.0);
    }
}
