use crate::{
    distribution::{require_positive, sample_truncated, Bounds, Distribution, NumericDistribution},
    error::{DistError, DistResult},
    rng::RandomSource,
};
use rand_distr::{Distribution as _, Normal};
use std::f64::consts::PI;

const NAME: &str = "Normal";

/// Gaussian distribution truncated to [minimum, maximum].
/// Used for amounts that cluster tightly, like fuel purchases and utility bills.
#[derive(Debug)]
pub struct NormalDistribution {
    inner: Normal<f64>,
    mean: f64,
    stddev: f64,
    bounds: Bounds,
    rng: RandomSource,
}

impl NormalDistribution {
    pub fn new(
        mean: f64,
        stddev: f64,
        minimum: f64,
        maximum: f64,
        rng: RandomSource,
    ) -> DistResult<Self> {
        if !mean.is_finite() {
            return Err(DistError::invalid(format!("normal mean must be finite, got {mean}")));
        }
        require_positive("normal stddev", stddev)?;
        let bounds = Bounds::new(minimum, maximum)?;
        let inner = Normal::new(mean, stddev).map_err(|e| DistError::invalid(e.to_string()))?;
        Ok(Self { inner, mean, stddev, bounds, rng })
    }

    pub fn unbounded(mean: f64, stddev: f64, rng: RandomSource) -> DistResult<Self> {
        Self::new(mean, stddev, f64::NEG_INFINITY, f64::INFINITY, rng)
    }
}

impl Distribution<f64> for NormalDistribution {
    fn sample(&mut self) -> DistResult<f64> {
        sample_truncated(NAME, self.bounds, || self.inner.sample(&mut self.rng))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> String {
        format!(
            "mean={:.2}, stdDev={:.2}, min={:.2}, max={:.2}",
            self.mean,
            self.stddev,
            self.bounds.minimum(),
            self.bounds.maximum()
        )
    }
}

impl NumericDistribution for NormalDistribution {
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
        let z = (x - self.mean) / self.stddev;
        (-0.5 * z * z).exp() / (self.stddev * (2.0 * PI).sqrt())
    }
}
