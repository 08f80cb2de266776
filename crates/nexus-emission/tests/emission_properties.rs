//! Integration tests for the emission calculator
//!
//! Verifies the reward curve, supply integration and derived views against
//! the mainnet parameters and randomized configurations.

use nexus_emission::{
    DecayFactor, EmissionCalculator, EmissionParams, GENESIS_TIMESTAMP, HALVING_INTERVAL,
    INITIAL_BLOCK_REWARD, MAX_SUPPLY, REWARD_EPSILON,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn arb_params() -> impl Strategy<Value = EmissionParams> {
    (
        1i64..=100,
        1u64..1_000_000,
        1i64..1_000_000_000_000,
        1u64..=u64::MAX,
    )
        .prop_map(|(decay_percent, interval, reward_sompi, max_supply)| {
            EmissionParams::kaspa()
                .with_decay_factor(DecayFactor::new(Decimal::new(decay_percent, 2)))
                .with_halving_interval(interval)
                .with_initial_block_reward(Decimal::new(reward_sompi, 8))
                .with_max_supply(Decimal::from(max_supply))
        })
}

mod mainnet_scenarios {
    use super::*;

    #[test]
    fn test_reward_halves_at_each_boundary() {
        let calc = EmissionCalculator::kaspa();
        let mut expected = INITIAL_BLOCK_REWARD;
        for i in 0..20u64 {
            assert_eq!(calc.block_reward(i * HALVING_INTERVAL), expected, "epoch {}", i);
            expected /= Decimal::from(2);
        }
    }

    #[test]
    fn test_concrete_supply_points() {
        let calc = EmissionCalculator::kaspa();
        assert_eq!(calc.block_reward(0), INITIAL_BLOCK_REWARD);
        assert_eq!(calc.block_reward(31_104_000), Decimal::from(250));
        assert_eq!(calc.block_reward(62_208_000), Decimal::from(125));
        assert_eq!(calc.total_supply(0), Decimal::ZERO);
        assert_eq!(
            calc.total_supply(31_104_000),
            Decimal::from(500u64 * 31_104_000)
        );
    }

    #[test]
    fn test_uncapped_supply_matches_geometric_sum() {
        let params = EmissionParams::kaspa().with_max_supply(Decimal::from(u64::MAX));
        let calc = EmissionCalculator::new(params).unwrap();

        // H × 500 × (2 - 2^-19) = 31_104_000_000 - 29_663.0859375
        let expected = Decimal::from(31_104_000_000u64) - Decimal::new(296_630_859_375, 7);
        assert_eq!(calc.total_supply(20 * HALVING_INTERVAL), expected);
    }

    #[test]
    fn test_twenty_year_projection() {
        let calc = EmissionCalculator::kaspa();
        let points: Vec<_> = calc.generate_schedule(20, 12).unwrap().collect();

        assert_eq!(points.len(), 21 * 12);
        assert_eq!(points.iter().filter(|p| p.is_halving_point).count(), 20);
        assert_eq!(points.last().map(|p| p.total_supply), Some(MAX_SUPPLY));

        for pair in points.windows(2) {
            assert!(pair[1].block_height > pair[0].block_height);
            assert!(pair[1].block_reward <= pair[0].block_reward);
            assert!(pair[1].total_supply >= pair[0].total_supply);
        }
    }

    #[test]
    fn test_snapshot_agrees_with_schedule() {
        let calc = EmissionCalculator::kaspa();
        let now = GENESIS_TIMESTAMP + 2 * HALVING_INTERVAL as i64;
        let snapshot = calc.current_snapshot(now, GENESIS_TIMESTAMP);
        let events = calc.list_halving_events(15, 20);

        assert_eq!(snapshot.current_halving_number, 2);
        assert_eq!(snapshot.current_block_reward, events[1].reward_after);
        assert_eq!(snapshot.current_total_supply, events[1].total_supply);
    }
}

mod safety_bound {
    use super::*;

    #[test]
    fn test_no_decay_terminates_and_clamps() {
        let params = EmissionParams::kaspa().with_decay_factor(DecayFactor::NONE);
        let calc = EmissionCalculator::new(params).unwrap();

        assert_eq!(calc.total_supply(u64::MAX), MAX_SUPPLY);
        assert!(calc.generate_schedule(20, 12).unwrap().all(|p| p.total_supply <= MAX_SUPPLY));
    }

    #[test]
    fn test_no_decay_tiny_reward_stops_at_bound() {
        let params = EmissionParams::kaspa()
            .with_decay_factor(DecayFactor::NONE)
            .with_initial_block_reward(REWARD_EPSILON)
            .with_halving_interval(1);
        let calc = EmissionCalculator::new(params).unwrap();

        // 51 single-block epochs before the walk gives up
        assert_eq!(calc.total_supply(u64::MAX), Decimal::new(51, 8));
        assert!(calc.hits_safety_bound());
    }
}

proptest! {
    #[test]
    fn prop_supply_never_exceeds_max(params in arb_params(), height in any::<u64>()) {
        let max = params.max_supply;
        let calc = EmissionCalculator::new(params).unwrap();
        prop_assert!(calc.total_supply(height) <= max);
    }

    #[test]
    fn prop_reward_non_increasing(
        params in arb_params(),
        a in 0u64..1_000_000_000_000,
        b in 0u64..1_000_000_000_000,
    ) {
        let calc = EmissionCalculator::new(params).unwrap();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calc.block_reward(high) <= calc.block_reward(low));
    }

    #[test]
    fn prop_supply_non_decreasing(
        params in arb_params(),
        a in 0u64..1_000_000_000_000,
        b in 0u64..1_000_000_000_000,
    ) {
        let calc = EmissionCalculator::new(params).unwrap();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calc.total_supply(high) >= calc.total_supply(low));
    }

    #[test]
    fn prop_exact_ratio_at_boundaries(params in arb_params(), i in 1u64..60) {
        let decay = params.decay_factor.value();
        let interval = params.halving_interval;
        let calc = EmissionCalculator::new(params).unwrap();

        let before = calc.block_reward((i - 1) * interval);
        let after = calc.block_reward(i * interval);
        if after.is_zero() {
            prop_assert!(before * decay < REWARD_EPSILON);
        } else {
            prop_assert_eq!(after, before * decay);
        }
    }

    #[test]
    fn prop_halving_keeps_sub_sompi_precision(
        reward_sompi in 1i64..1_000_000_000_000,
        i in 1u64..20,
    ) {
        let params =
            EmissionParams::kaspa().with_initial_block_reward(Decimal::new(reward_sompi, 8));
        let calc = EmissionCalculator::new(params).unwrap();

        let before = calc.block_reward((i - 1) * HALVING_INTERVAL);
        let after = calc.block_reward(i * HALVING_INTERVAL);
        if !after.is_zero() {
            prop_assert_eq!(after * Decimal::from(2), before);
        }
    }

    #[test]
    fn prop_schedule_idempotent(years in 0u32..5, samples in 1u32..24) {
        let calc = EmissionCalculator::kaspa();
        let first: Vec<_> = calc.generate_schedule(years, samples).unwrap().collect();
        let second: Vec<_> = calc.generate_schedule(years, samples).unwrap().collect();
        prop_assert_eq!(first.len(), (years as usize + 1) * samples as usize);
        prop_assert_eq!(first, second);
    }
}
