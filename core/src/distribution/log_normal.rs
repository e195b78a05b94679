//! Log-normal distribution, the workhorse for transaction amounts.
//!
//! Amounts are right-skewed: most purchases are small, a long tail is not.
//! Parameters are the underlying normal's μ (scale) and σ (shape); callers
//! usually think in arithmetic mean and stddev, so `from_mean_and_stddev`
//! derives μ and σ from those:
//!   σ = sqrt(ln(variance / mean² + 1))
//!   μ = ln(mean) − σ² / 2

use crate::{
    distribution::{require_positive, sample_truncated, Bounds, Distribution, NumericDistribution},
    error::{DistError, DistResult},
    rng::RandomSource,
};
use rand_distr::{Distribution as _, LogNormal};
use std::f64::consts::PI;

const NAME: &str = "LogNormal";

#[derive(Debug)]
pub struct LogNormalDistribution {
    inner: LogNormal<f64>,
    scale: f64,
    shape: f64,
    mean: f64,
    stddev: f64,
    bounds: Bounds,
    rng: RandomSource,
}

impl LogNormalDistribution {
    pub fn new(
        scale: f64,
        shape: f64,
        minimum: f64,
        maximum: f64,
        rng: RandomSource,
    ) -> DistResult<Self> {
        if !scale.is_finite() {
            return Err(DistError::invalid(format!("log-normal scale must be finite, got {scale}")));
        }
        require_positive("log-normal shape", shape)?;
        let bounds = Bounds::new(minimum, maximum)?;
        let inner = LogNormal::new(scale, shape).map_err(|e| DistError::invalid(e.to_string()))?;

        let variance_factor = shape * shape;
        let mean = (scale + variance_factor / 2.0).exp();
        let stddev = ((variance_factor.exp() - 1.0) * (2.0 * scale + variance_factor).exp()).sqrt();

        Ok(Self { inner, scale, shape, mean, stddev, bounds, rng })
    }

    pub fn unbounded(scale: f64, shape: f64, rng: RandomSource) -> DistResult<Self> {
        Self::new(scale, shape, f64::NEG_INFINITY, f64::INFINITY, rng)
    }

    /// Build from the desired arithmetic mean and standard deviation.
    pub fn from_mean_and_stddev(
        mean: f64,
        stddev: f64,
        minimum: f64,
        maximum: f64,
        rng: RandomSource,
    ) -> DistResult<Self> {
        require_positive("log-normal mean", mean)?;
        require_positive("log-normal stddev", stddev)?;
        let variance = stddev * stddev;
        let shape = (variance / (mean * mean) + 1.0).ln().sqrt();
        let scale = mean.ln() - shape * shape / 2.0;
        Self::new(scale, shape, minimum, maximum, rng)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }
}

impl Distribution<f64> for LogNormalDistribution {
    fn sample(&mut self) -> DistResult<f64> {
        sample_truncated(NAME, self.bounds, || self.inner.sample(&mut self.rng))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> String {
        format!(
            "scale={:.2}, shape={:.2}, mean={:.2}, stdDev={:.2}, min={:.2}, max={:.2}",
            self.scale,
            self.shape,
            self.mean,
            self.stddev,
            self.bounds.minimum(),
            self.bounds.maximum()
        )
    }
}

impl NumericDistribution for LogNormalDistribution {
    fn mean(&self) -> f64 {
        self.mean
    }

    fn stddev(&self) -> f64 {
        self.stddev
    }

    fn minimum(&self) -> f64 {
        self.bounds.minimum()
    }

    fn maximum(&self) -> f64 {
        self.bounds.maximum()
    }

    fn density(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let z = (x.ln() - self.scale) / self.shape;
        (-0.5 * z * z).exp() / (x * self.shape * (2.0 * PI).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_form_moments() {
        let dist = LogNormalDistribution::unbounded(0.0, 1.0, RandomSource::seeded(3)).unwrap();
        assert!((dist.mean() - 0.5f64.exp()).abs() < 1e-12);
        let expected_sd = ((1f64.exp() - 1.0) * 1f64.exp()).sqrt();
        assert!((dist.stddev() - expected_sd).abs() < 1e-12);
    }

    #[test]
    fn mean_and_stddev_round_trip_through_parameters() {
        let dist = LogNormalDistribution::from_mean_and_stddev(
            50.0,
            75.0,
            f64::NEG_INFINITY,
            f64::INFINITY,
            RandomSource::seeded(3),
        )
        .unwrap();
        assert!((dist.mean() - 50.0).abs() < 1e-9);
        assert!((dist.stddev() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn density_is_zero_off_support() {
        let dist = LogNormalDistribution::unbounded(0.0, 0.5, RandomSource::seeded(3)).unwrap();
        assert_eq!(dist.density(0.0), 0.0);
        assert_eq!(dist.density(-4.0), 0.0);
        assert!(dist.density(1.0) > 0.0);
    }

    #[test]
    fn rejects_non_positive_mean() {
        assert!(LogNormalDistribution::from_mean_and_stddev(
            0.0,
            1.0,
            0.0,
            10.0,
            RandomSource::seeded(3)
        )
        .is_err());
    }
}
