//! Emission schedule sampling
//!
//! A [`Schedule`] walks calendar time in evenly spaced samples and
//! evaluates reward and supply at each one. It borrows the calculator, is
//! computed lazily, and can be restarted by cloning.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::emission::EmissionCalculator;
use crate::error::{EmissionError, Result};

/// One sample of the emission curve
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionDataPoint {
    /// Years since genesis
    pub year: u32,
    /// Month within the year (0-11)
    pub month: u32,
    pub block_height: u64,
    /// Block reward at this height (KAS)
    #[serde(with = "rust_decimal::serde::float")]
    pub block_reward: Decimal,
    /// Cumulative supply at this height (KAS)
    #[serde(with = "rust_decimal::serde::float")]
    pub total_supply: Decimal,
    pub percent_of_max: f64,
    /// First block of a new epoch
    pub is_halving_point: bool,
}

/// Lazy iterator over [`EmissionDataPoint`]s
#[derive(Clone, Debug)]
pub struct Schedule<'a> {
    calculator: &'a EmissionCalculator,
    samples_per_year: u32,
    next_index: u64,
    total: u64,
}

impl Schedule<'_> {
    fn point_at(&self, index: u64) -> EmissionDataPoint {
        let params = self.calculator.params();
        let samples = self.samples_per_year as u64;
        let sample = index % samples;

        // A projected year is 12 months of `blocks_per_month`
        let blocks_per_sample_year = params.blocks_per_month as u128 * 12;
        let height = (index as u128 * blocks_per_sample_year / samples as u128)
            .min(u64::MAX as u128) as u64;

        let block_reward = self.calculator.block_reward(height);
        let total_supply = self.calculator.total_supply(height);

        EmissionDataPoint {
            year: (index / samples) as u32,
            month: (sample * 12 / samples) as u32,
            block_height: height,
            block_reward,
            total_supply,
            percent_of_max: self.calculator.percent_of_max(total_supply),
            is_halving_point: self.calculator.is_halving_point(height),
        }
    }
}

impl Iterator for Schedule<'_> {
    type Item = EmissionDataPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.total {
            return None;
        }
        let point = self.point_at(self.next_index);
        self.next_index += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next_index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Schedule<'_> {}

impl EmissionCalculator {
    /// Sample the curve for years `0..=years_to_project`
    pub fn generate_schedule(
        &self,
        years_to_project: u32,
        samples_per_year: u32,
    ) -> Result<Schedule<'_>> {
        if samples_per_year == 0 {
            return Err(EmissionError::InvalidArgument(
                "samples per year must be positive".into(),
            ));
        }
        Ok(Schedule {
            calculator: self,
            samples_per_year,
            next_index: 0,
            total: (years_to_project as u64 + 1) * samples_per_year as u64,
        })
    }
}
