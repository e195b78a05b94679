//! Prebuilt distributions for the common transaction attributes.
//!
//! Weights reflect rough market shares; callers wanting other mixes build
//! a DiscreteDistribution directly.

use crate::{
    distribution::{
        DiscreteDistribution, ExponentialDistribution, LogNormalDistribution, NormalDistribution,
        ParetoDistribution, TransactionAmountDistribution, TransactionTimeDistribution,
    },
    error::DistResult,
    model::{CardTransaction, CardType, Currency, TransactionType, TransferTransaction},
    rng::RandomSource,
};
use chrono::NaiveDate;

pub const CARD_NETWORK_WEIGHTS: [(&str, f64); 6] = [
    ("VISA", 0.35),
    ("MASTERCARD", 0.30),
    ("AMEX", 0.15),
    ("DISCOVER", 0.10),
    ("JCB", 0.05),
    ("UNIONPAY", 0.05),
];

/// 80% card, 20% transfer.
pub fn transaction_type_distribution(
    rng: RandomSource,
) -> DistResult<DiscreteDistribution<TransactionType>> {
    let weights: Vec<(TransactionType, f64)> = vec![
        (CardTransaction::ecommerce("VISA").into(), 0.30),
        (CardTransaction::contactless("VISA").into(), 0.30),
        (CardTransaction::standard("VISA").into(), 0.20),
        (TransferTransaction::ach("").into(), 0.15),
        (TransferTransaction::wire(false, "PAYMENT").into(), 0.05),
    ];
    DiscreteDistribution::new("TransactionType", weights, rng)
}

pub fn card_network_distribution(rng: RandomSource) -> DistResult<DiscreteDistribution<String>> {
    DiscreteDistribution::new(
        "CardNetwork",
        CARD_NETWORK_WEIGHTS.iter().map(|(network, w)| (network.to_string(), *w)),
        rng,
    )
}

pub fn card_type_distribution(rng: RandomSource) -> DistResult<DiscreteDistribution<CardType>> {
    DiscreteDistribution::new(
        "CardType",
        [
            (CardType::Credit, 0.50),
            (CardType::Debit, 0.40),
            (CardType::Prepaid, 0.08),
            (CardType::Gift, 0.02),
        ],
        rng,
    )
}

pub fn amount_distribution(
    currency: Currency,
    rng: RandomSource,
) -> DistResult<TransactionAmountDistribution> {
    TransactionAmountDistribution::new(currency, rng)
}

pub fn time_distribution(
    start: NaiveDate,
    end: NaiveDate,
    rng: RandomSource,
) -> DistResult<TransactionTimeDistribution> {
    TransactionTimeDistribution::new(start, end, rng)
}

pub fn log_normal(
    mean: f64,
    stddev: f64,
    minimum: f64,
    maximum: f64,
    rng: RandomSource,
) -> DistResult<LogNormalDistribution> {
    LogNormalDistribution::from_mean_and_stddev(mean, stddev, minimum, maximum, rng)
}

pub fn normal(
    mean: f64,
    stddev: f64,
    minimum: f64,
    maximum: f64,
    rng: RandomSource,
) -> DistResult<NormalDistribution> {
    NormalDistribution::new(mean, stddev, minimum, maximum, rng)
}

pub fn exponential(mean: f64, minimum: f64, rng: RandomSource) -> DistResult<ExponentialDistribution> {
    ExponentialDistribution::with_minimum(mean, minimum, rng)
}

pub fn pareto(
    minimum: f64,
    shape: f64,
    maximum: f64,
    rng: RandomSource,
) -> DistResult<ParetoDistribution> {
    ParetoDistribution::new(minimum, shape, maximum, rng)
}
