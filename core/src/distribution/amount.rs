//! Transaction amounts conditioned on merchant category.
//!
//! Each draw:
//!   1. Looks up the merchant's MCC; unknown codes use the default distribution.
//!   2. Samples a raw amount from that continuous distribution.
//!   3. Applies psychological pricing: 70% of amounts are floored and end
//!      in .99 (80% of those) or .95 (the rest); 30% keep the raw value.
//!   4. Scales to the currency's minor unit, rounding half up.
//!
//! The pricing overlay runs after truncation, so an amount can end up to
//! 0.99 above its category's configured maximum.

use crate::{
    distribution::{Distribution, LogNormalDistribution, NormalDistribution, NumericDistribution},
    error::DistResult,
    model::{Currency, Merchant, Money},
    rng::RandomSource,
    types::Mcc,
};
use std::collections::HashMap;

pub const PRICE_PATTERN_PROBABILITY: f64 = 0.70;
pub const NINETY_NINE_ENDING_PROBABILITY: f64 = 0.80;

const NAME: &str = "TransactionAmount";

#[derive(Debug)]
pub struct TransactionAmountDistribution {
    currency: Currency,
    default_distribution: Box<dyn NumericDistribution>,
    categories: HashMap<Mcc, Box<dyn NumericDistribution>>,
    rng: RandomSource,
}

impl TransactionAmountDistribution {
    /// General spending default: log-normal, mean 50, stddev 75, within [1, 5000].
    pub fn new(currency: Currency, mut rng: RandomSource) -> DistResult<Self> {
        let default = LogNormalDistribution::from_mean_and_stddev(50.0, 75.0, 1.0, 5000.0, rng.fork())?;
        Self::with_default_distribution(currency, Box::new(default), rng)
    }

    pub fn with_default_distribution(
        currency: Currency,
        default_distribution: Box<dyn NumericDistribution>,
        mut rng: RandomSource,
    ) -> DistResult<Self> {
        let categories = default_categories(&mut rng)?;
        log::debug!(
            "amount distribution for {currency}: default {}, {} categories",
            default_distribution.summary(),
            categories.len()
        );
        Ok(Self {
            currency,
            default_distribution,
            categories,
            rng,
        })
    }

    /// Register or replace the distribution for one merchant category.
    /// Do this during setup, before samplers are handed to workers.
    pub fn set_category_distribution(
        &mut self,
        mcc: impl Into<Mcc>,
        distribution: Box<dyn NumericDistribution>,
    ) -> &mut Self {
        let mcc = mcc.into();
        log::debug!("amount category {mcc} -> {}", distribution.summary());
        self.categories.insert(mcc, distribution);
        self
    }

    pub fn category_distribution(&self, mcc: &str) -> Option<&dyn NumericDistribution> {
        self.categories.get(mcc).map(|d| &**d)
    }

    pub fn default_distribution(&self) -> &dyn NumericDistribution {
        &*self.default_distribution
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn sample_for(&mut self, merchant: &Merchant) -> DistResult<Money> {
        self.sample_for_category(&merchant.mcc)
    }

    pub fn sample_for_category(&mut self, mcc: &str) -> DistResult<Money> {
        let raw = match self.categories.get_mut(mcc) {
            Some(distribution) => distribution.sample()?,
            None => self.default_distribution.sample()?,
        };
        self.finish(raw)
    }

    fn finish(&mut self, raw: f64) -> DistResult<Money> {
        let amount = apply_price_pattern(raw, &mut self.rng);
        Money::from_f64(amount, self.currency)
    }
}

impl Distribution<Money> for TransactionAmountDistribution {
    /// Draws from the default distribution only.
    fn sample(&mut self) -> DistResult<Money> {
        let raw = self.default_distribution.sample()?;
        self.finish(raw)
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> String {
        format!(
            "Transaction amount distribution in {} with {} merchant categories",
            self.currency,
            self.categories.len()
        )
    }
}

/// Round most amounts to retail-style .99 / .95 endings.
pub fn apply_price_pattern(amount: f64, rng: &mut RandomSource) -> f64 {
    if !rng.chance(PRICE_PATTERN_PROBABILITY) {
        return amount;
    }
    let ending = if rng.chance(NINETY_NINE_ENDING_PROBABILITY) { 0.99 } else { 0.95 };
    amount.floor() + ending
}

fn default_categories(
    rng: &mut RandomSource,
) -> DistResult<HashMap<Mcc, Box<dyn NumericDistribution>>> {
    let mut table: HashMap<Mcc, Box<dyn NumericDistribution>> = HashMap::new();

    // Grocery: clustered around smaller baskets
    table.insert(
        "5411".into(),
        Box::new(LogNormalDistribution::from_mean_and_stddev(65.0, 40.0, 5.0, 500.0, rng.fork())?),
    );
    // Restaurants
    table.insert(
        "5812".into(),
        Box::new(LogNormalDistribution::from_mean_and_stddev(35.0, 25.0, 5.0, 300.0, rng.fork())?),
    );
    // Gas stations: tight, roughly symmetric
    table.insert(
        "5541".into(),
        Box::new(NormalDistribution::new(45.0, 15.0, 10.0, 150.0, rng.fork())?),
    );
    // Department stores
    table.insert(
        "5311".into(),
        Box::new(LogNormalDistribution::from_mean_and_stddev(85.0, 100.0, 10.0, 1000.0, rng.fork())?),
    );
    // Electronics
    table.insert(
        "5732".into(),
        Box::new(LogNormalDistribution::from_mean_and_stddev(250.0, 300.0, 20.0, 5000.0, rng.fork())?),
    );
    // Utilities
    table.insert(
        "4900".into(),
        Box::new(NormalDistribution::new(120.0, 50.0, 20.0, 500.0, rng.fork())?),
    );
    // Travel: high amounts, high variance
    table.insert(
        "4722".into(),
        Box::new(LogNormalDistribution::from_mean_and_stddev(500.0, 700.0, 50.0, 10000.0, rng.fork())?),
    );
    // Healthcare
    table.insert(
        "8099".into(),
        Box::new(LogNormalDistribution::from_mean_and_stddev(150.0, 200.0, 20.0, 3000.0, rng.fork())?),
    );

    Ok(table)
}
