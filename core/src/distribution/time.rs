//! Transaction timestamps with weekly and daily seasonality.
//!
//! A draw picks:
//!   1. a date uniformly in [start, end] (both inclusive),
//!   2. an hour by weighted choice over that weekday's 24-hour profile,
//!   3. minute and second uniformly in [0, 60).
//!
//! Weekdays peak late morning through lunch; weekends start later and
//! spread the peak across the afternoon.

use crate::{
    distribution::Distribution,
    error::{DistError, DistResult},
    rng::RandomSource,
    types::{HourlyWeights, HOURS_PER_DAY},
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use rand::Rng;
use std::collections::HashMap;

const NAME: &str = "TransactionTime";

pub const WEEKDAY_PROFILE: HourlyWeights = [
    0.2, 0.1, 0.1, 0.1, 0.2, 0.5, 1.0, 2.0, // 00:00–08:00
    3.0, 3.5, 4.0, 4.5, 5.0, 4.5, 4.0, 3.5, // 08:00–16:00
    3.0, 3.0, 2.5, 2.0, 1.5, 1.0, 0.5, 0.3, // 16:00–24:00
];

pub const WEEKEND_PROFILE: HourlyWeights = [
    0.3, 0.2, 0.1, 0.1, 0.1, 0.2, 0.5, 1.0, // 00:00–08:00
    1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.0, 3.5, // 08:00–16:00
    3.0, 2.5, 2.0, 1.5, 1.0, 0.8, 0.5, 0.4, // 16:00–24:00
];

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug)]
pub struct TransactionTimeDistribution {
    start: NaiveDate,
    end: NaiveDate,
    hourly_weights: HashMap<Weekday, HourlyWeights>,
    rng: RandomSource,
}

impl TransactionTimeDistribution {
    pub fn new(start: NaiveDate, end: NaiveDate, rng: RandomSource) -> DistResult<Self> {
        if end < start {
            return Err(DistError::invalid(format!(
                "time range end {end} is before start {start}"
            )));
        }
        let hourly_weights = ALL_DAYS
            .iter()
            .map(|&day| (day, default_profile(day)))
            .collect();
        Ok(Self { start, end, hourly_weights, rng })
    }

    /// Replace one weekday's profile. Must be exactly 24 finite,
    /// non-negative weights with a positive sum.
    pub fn set_hourly_weights(&mut self, day: Weekday, weights: &[f64]) -> DistResult<&mut Self> {
        let profile: HourlyWeights = weights.try_into().map_err(|_| {
            DistError::invalid(format!(
                "hourly weights must have exactly {HOURS_PER_DAY} values, got {}",
                weights.len()
            ))
        })?;
        if profile.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DistError::invalid("hourly weights must be finite and non-negative"));
        }
        if profile.iter().sum::<f64>() <= 0.0 {
            return Err(DistError::invalid(format!("hourly weights for {day} are all zero")));
        }
        log::debug!("hourly profile for {day} replaced");
        self.hourly_weights.insert(day, profile);
        Ok(self)
    }

    pub fn hourly_weights(&self, day: Weekday) -> HourlyWeights {
        self.hourly_weights
            .get(&day)
            .copied()
            .unwrap_or_else(|| default_profile(day))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days_in_range(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    fn sample_date(&mut self) -> NaiveDate {
        let days = self.days_in_range();
        let offset = self.rng.gen_range(0..days);
        self.start + Duration::days(offset)
    }
}

impl Distribution<NaiveDateTime> for TransactionTimeDistribution {
    fn sample(&mut self) -> DistResult<NaiveDateTime> {
        let date = self.sample_date();
        let weights = self.hourly_weights(date.weekday());
        let hour = pick_hour(&weights, self.rng.next_f64());
        let minute = self.rng.gen_range(0..60);
        let second = self.rng.gen_range(0..60);

        date.and_hms_opt(hour, minute, second).ok_or_else(|| {
            DistError::invalid(format!("{hour:02}:{minute:02}:{second:02} is not a valid time"))
        })
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> String {
        format!(
            "Time distribution from {} to {} with daily patterns",
            self.start, self.end
        )
    }
}

pub fn default_profile(day: Weekday) -> HourlyWeights {
    match day {
        Weekday::Sat | Weekday::Sun => WEEKEND_PROFILE,
        _ => WEEKDAY_PROFILE,
    }
}

/// Inverse-CDF walk over a 24-hour profile. `unit` is a draw in [0, 1).
fn pick_hour(weights: &HourlyWeights, unit: f64) -> u32 {
    let total: f64 = weights.iter().sum();
    let target = unit * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (hour, weight) in weights.iter().enumerate() {
        if *weight > 0.0 {
            last_positive = hour;
        }
        cumulative += weight;
        if target < cumulative {
            return hour as u32;
        }
    }
    // Accumulated rounding can leave target == total.
    last_positive as u32
}
