use crate::{
    distribution::{require_positive, sample_truncated, Bounds, Distribution, NumericDistribution},
    error::{DistError, DistResult},
    rng::RandomSource,
};
use rand_distr::{Distribution as _, Exp};

const NAME: &str = "Exponential";

/// Exponential distribution with rate 1/mean, truncated to [minimum, maximum].
/// Models gaps between consecutive events.
#[derive(Debug)]
pub struct ExponentialDistribution {
    inner: Exp<f64>,
    mean: f64,
    bounds: Bounds,
    rng: RandomSource,
}

impl ExponentialDistribution {
    pub fn new(mean: f64, minimum: f64, maximum: f64, rng: RandomSource) -> DistResult<Self> {
        require_positive("exponential mean", mean)?;
        let bounds = Bounds::new(minimum, maximum)?;
        let inner = Exp::new(1.0 / mean).map_err(|e| DistError::invalid(e.to_string()))?;
        Ok(Self { inner, mean, bounds, rng })
    }

    /// No upper bound.
    pub fn with_minimum(mean: f64, minimum: f64, rng: RandomSource) -> DistResult<Self> {
        Self::new(mean, minimum, f64::INFINITY, rng)
    }

    pub fn rate(&self) -> f64 {
        1.0 / self.mean
    }
}

impl Distribution<f64> for ExponentialDistribution {
    fn sample(&mut self) -> DistResult<f64> {
        sample_truncated(NAME, self.bounds, || self.inner.sample(&mut self.rng))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> String {
        format!(
            "mean={:.2}, min={:.2}, max={:.2}",
            self.mean,
            self.bounds.minimum(),
            self.bounds.maximum()
        )
    }
}

impl NumericDistribution for ExponentialDistribution {
    fn mean(&self) -> f64 {
        self.mean
    }

    /// Equal to the mean for every exponential.
    fn stddev(&self) -> f64 {
        self.mean
    }

    fn minimum(&self) -> f64 {
        self.bounds.minimum()
    }

    fn maximum(&self) -> f64 {
        self.bounds.maximum()
    }

    fn density(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let rate = self.rate();
        rate * (-rate * x).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stddev_equals_mean() {
        let dist = ExponentialDistribution::with_minimum(30.0, 0.0, RandomSource::seeded(8)).unwrap();
        assert_eq!(dist.stddev(), 30.0);
        assert_eq!(dist.maximum(), f64::INFINITY);
    }

    #[test]
    fn density_at_zero_is_rate() {
        let dist = ExponentialDistribution::with_minimum(4.0, 0.0, RandomSource::seeded(8)).unwrap();
        assert!((dist.density(0.0) - 0.25).abs() < 1e-12);
        assert_eq!(dist.density(-1.0), 0.0);
    }

    #[test]
    fn minimum_shifts_every_sample() {
        let mut dist = ExponentialDistribution::new(10.0, 5.0, 40.0, RandomSource::seeded(8)).unwrap();
        for _ in 0..2_000 {
            let x = dist.sample().unwrap();
            assert!((5.0..=40.0).contains(&x), "{x} outside [5, 40]");
        }
    }
}
