use crate::{
    distribution::{require_positive, sample_truncated, Bounds, Distribution, NumericDistribution},
    error::{DistError, DistResult},
    rng::RandomSource,
};
use rand_distr::{Distribution as _, Pareto};

const NAME: &str = "Pareto";

/// Pareto distribution: the minimum is always the scale, the tail is
/// controlled by the shape. Good for "80-20" spend where a few
/// transactions carry most of the value.
#[derive(Debug)]
pub struct ParetoDistribution {
    inner: Pareto<f64>,
    scale: f64,
    shape: f64,
    bounds: Bounds,
    rng: RandomSource,
}

impl ParetoDistribution {
    pub fn new(scale: f64, shape: f64, maximum: f64, rng: RandomSource) -> DistResult<Self> {
        require_positive("pareto scale", scale)?;
        require_positive("pareto shape", shape)?;
        let bounds = Bounds::new(scale, maximum)?;
        let inner = Pareto::new(scale, shape).map_err(|e| DistError::invalid(e.to_string()))?;
        Ok(Self { inner, scale, shape, bounds, rng })
    }

    pub fn unbounded(scale: f64, shape: f64, rng: RandomSource) -> DistResult<Self> {
        Self::new(scale, shape, f64::INFINITY, rng)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }
}

impl Distribution<f64> for ParetoDistribution {
    fn sample(&mut self) -> DistResult<f64> {
        sample_truncated(NAME, self.bounds, || self.inner.sample(&mut self.rng))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> String {
        format!(
            "scale={:.2}, shape={:.2}, min={:.2}, max={:.2}",
            self.scale,
            self.shape,
            self.bounds.minimum(),
            self.bounds.maximum()
        )
    }
}

impl NumericDistribution for ParetoDistribution {
    /// +infinity when shape <= 1.
    fn mean(&self) -> f64 {
        if self.shape <= 1.0 {
            return f64::INFINITY;
        }
        self.shape * self.scale / (self.shape - 1.0)
    }

    /// +infinity when shape <= 2.
    fn stddev(&self) -> f64 {
        if self.shape <= 2.0 {
            return f64::INFINITY;
        }
        let variance =
            self.scale * self.scale * self.shape / ((self.shape - 1.0).powi(2) * (self.shape - 2.0));
        variance.sqrt()
    }

    fn minimum(&self) -> f64 {
        self.bounds.minimum()
    }

    fn maximum(&self) -> f64 {
        self.bounds.maximum()
    }

    fn density(&self, x: f64) -> f64 {
        if x < self.scale {
            return 0.0;
        }
        self.shape * self.scale.powf(self.shape) / x.powf(self.shape + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_is_scale() {
        let dist = ParetoDistribution::new(10.0, 1.5, 2000.0, RandomSource::seeded(2)).unwrap();
        assert_eq!(dist.minimum(), 10.0);
        assert_eq!(dist.maximum(), 2000.0);
    }

    #[test]
    fn finite_moments_for_heavy_shape() {
        let dist = ParetoDistribution::unbounded(1.0, 3.0, RandomSource::seeded(2)).unwrap();
        assert!((dist.mean() - 1.5).abs() < 1e-12);
        // variance = 3 / (4 * 1) = 0.75
        assert!((dist.stddev() - 0.75f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn density_vanishes_below_scale() {
        let dist = ParetoDistribution::unbounded(2.0, 2.0, RandomSource::seeded(2)).unwrap();
        assert_eq!(dist.density(1.9), 0.0);
        // α·xₘ^α / x^(α+1) at x = xₘ is α / xₘ
        assert!((dist.density(2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn maximum_below_scale_rejected() {
        assert!(ParetoDistribution::new(10.0, 2.0, 5.0, RandomSource::seeded(2)).is_err());
        assert!(ParetoDistribution::unbounded(0.0, 2.0, RandomSource::seeded(2)).is_err());
    }
}
