//! Generator configuration, loaded from JSON.
//!
//! Every field has a default, so an empty object `{}` is a valid config
//! and `GeneratorConfig::default()` runs without any file at all.
//! Truncation bounds are optional numbers: JSON has no infinity, so an
//! omitted bound means "unbounded".

use crate::{
    distribution::{
        ExponentialDistribution, LogNormalDistribution, NormalDistribution, NumericDistribution,
        ParetoDistribution,
    },
    error::DistResult,
    factory::CARD_NETWORK_WEIGHTS,
    model::Currency,
    rng::RandomSource,
};
use anyhow::Context;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed:             u64,
    pub currency:         Currency,
    pub start_date:       NaiveDate,
    pub end_date:         NaiveDate,
    pub record_count:     usize,
    pub category_amounts: Vec<CategoryAmountConfig>,
    pub hourly_overrides: Vec<HourlyWeightsConfig>,
    pub card_networks:    Vec<WeightConfig>,
    pub merchants:        Vec<MerchantConfig>,
}

/// Replaces (or adds) the amount distribution for one merchant category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAmountConfig {
    pub mcc:          String,
    pub distribution: NumericDistributionSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyWeightsConfig {
    pub day:     Weekday,
    pub weights: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightConfig {
    pub value:  String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantConfig {
    pub name:   String,
    pub mcc:    String,
    pub weight: f64,
}

/// A continuous distribution described as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum NumericDistributionSpec {
    Normal {
        mean:    f64,
        stddev:  f64,
        #[serde(default)]
        minimum: Option<f64>,
        #[serde(default)]
        maximum: Option<f64>,
    },
    /// Log-normal from the desired arithmetic mean and stddev.
    LogNormal {
        mean:    f64,
        stddev:  f64,
        #[serde(default)]
        minimum: Option<f64>,
        #[serde(default)]
        maximum: Option<f64>,
    },
    /// Log-normal from the underlying normal's μ and σ.
    LogNormalParams {
        scale:   f64,
        shape:   f64,
        #[serde(default)]
        minimum: Option<f64>,
        #[serde(default)]
        maximum: Option<f64>,
    },
    Exponential {
        mean:    f64,
        #[serde(default)]
        minimum: Option<f64>,
        #[serde(default)]
        maximum: Option<f64>,
    },
    Pareto {
        scale:   f64,
        shape:   f64,
        #[serde(default)]
        maximum: Option<f64>,
    },
}

fn lower(bound: Option<f64>) -> f64 {
    bound.unwrap_or(f64::NEG_INFINITY)
}

fn upper(bound: Option<f64>) -> f64 {
    bound.unwrap_or(f64::INFINITY)
}

impl NumericDistributionSpec {
    pub fn build(&self, rng: RandomSource) -> DistResult<Box<dyn NumericDistribution>> {
        let built: Box<dyn NumericDistribution> = match *self {
            Self::Normal { mean, stddev, minimum, maximum } => Box::new(NormalDistribution::new(
                mean,
                stddev,
                lower(minimum),
                upper(maximum),
                rng,
            )?),
            Self::LogNormal { mean, stddev, minimum, maximum } => {
                Box::new(LogNormalDistribution::from_mean_and_stddev(
                    mean,
                    stddev,
                    lower(minimum),
                    upper(maximum),
                    rng,
                )?)
            }
            Self::LogNormalParams { scale, shape, minimum, maximum } => Box::new(
                LogNormalDistribution::new(scale, shape, lower(minimum), upper(maximum), rng)?,
            ),
            Self::Exponential { mean, minimum, maximum } => Box::new(ExponentialDistribution::new(
                mean,
                minimum.unwrap_or(0.0),
                upper(maximum),
                rng,
            )?),
            Self::Pareto { scale, shape, maximum } => {
                Box::new(ParetoDistribution::new(scale, shape, upper(maximum), rng)?)
            }
        };
        Ok(built)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let merchants = [
            ("Corner Grocery", "5411", 0.25),
            ("Main Street Diner", "5812", 0.20),
            ("Highway Fuel", "5541", 0.15),
            ("Metro Department Store", "5311", 0.10),
            ("Circuit Electronics", "5732", 0.05),
            ("City Power & Water", "4900", 0.08),
            ("Global Travel Agency", "4722", 0.04),
            ("Valley Health Clinic", "8099", 0.05),
            ("Online Marketplace", "5999", 0.08),
        ]
        .into_iter()
        .map(|(name, mcc, weight)| MerchantConfig {
            name: name.into(),
            mcc: mcc.into(),
            weight,
        })
        .collect();

        let card_networks = CARD_NETWORK_WEIGHTS
            .iter()
            .map(|(value, weight)| WeightConfig {
                value: value.to_string(),
                weight: *weight,
            })
            .collect();

        Self {
            seed:             42,
            currency:         Currency::Usd,
            start_date:       NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date:         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default(),
            record_count:     100,
            category_amounts: Vec::new(),
            hourly_overrides: Vec::new(),
            card_networks,
            merchants,
        }
    }
}

impl GeneratorConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> DistResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> DistResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.merchants.len(), 9);
        assert_eq!(config.card_networks.len(), 6);
    }

    #[test]
    fn omitted_bounds_are_unbounded() {
        let spec: NumericDistributionSpec =
            serde_json::from_str(r#"{"family": "normal", "mean": 5.0, "stddev": 1.0}"#).unwrap();
        let dist = spec.build(RandomSource::seeded(1)).unwrap();
        assert_eq!(dist.minimum(), f64::NEG_INFINITY);
        assert_eq!(dist.maximum(), f64::INFINITY);
    }

    #[test]
    fn every_family_builds() {
        let json = r#"[
            {"family": "normal", "mean": 45.0, "stddev": 15.0, "minimum": 10.0, "maximum": 150.0},
            {"family": "log_normal", "mean": 65.0, "stddev": 40.0, "minimum": 5.0, "maximum": 500.0},
            {"family": "log_normal_params", "scale": 3.0, "shape": 0.5},
            {"family": "exponential", "mean": 30.0},
            {"family": "pareto", "scale": 10.0, "shape": 1.5, "maximum": 2000.0}
        ]"#;
        let specs: Vec<NumericDistributionSpec> = serde_json::from_str(json).unwrap();
        let names: Vec<String> = specs
            .iter()
            .map(|s| s.build(RandomSource::seeded(1)).unwrap().name().to_string())
            .collect();
        assert_eq!(names, ["Normal", "LogNormal", "LogNormal", "Exponential", "Pareto"]);
    }

    #[test]
    fn invalid_spec_fails_at_build() {
        let spec = NumericDistributionSpec::Pareto { scale: 1.0, shape: -2.0, maximum: None };
        assert!(spec.build(RandomSource::seeded(1)).is_err());
    }

    #[test]
    fn unknown_family_is_a_parse_error() {
        let result = GeneratorConfig::from_json(
            r#"{"category_amounts": [{"mcc": "1", "distribution": {"family": "cauchy"}}]}"#,
        );
        assert!(result.is_err());
    }
}
