//! Distribution contracts and the shared truncation machinery.
//!
//! RULE: A distribution is stateless with respect to past samples.
//! The only thing a draw mutates is the distribution's RandomSource.
//!
//! Continuous families enforce their [minimum, maximum] bounds by
//! rejection: draw natively, discard anything outside, try again.
//! The retry loop is capped at MAX_REJECTION_ATTEMPTS and fails with
//! SamplingExhausted rather than spinning forever on bounds that hold
//! almost no probability mass.

pub mod amount;
pub mod discrete;
pub mod exponential;
pub mod log_normal;
pub mod normal;
pub mod pareto;
pub mod time;
pub mod weighted;

pub use amount::TransactionAmountDistribution;
pub use discrete::DiscreteDistribution;
pub use exponential::ExponentialDistribution;
pub use log_normal::LogNormalDistribution;
pub use normal::NormalDistribution;
pub use pareto::ParetoDistribution;
pub use time::TransactionTimeDistribution;
pub use weighted::WeightedEntityDistribution;

use crate::error::{DistError, DistResult};
use std::fmt;

pub const MAX_REJECTION_ATTEMPTS: u32 = 10_000;

/// Anything that produces independent samples of `T`.
pub trait Distribution<T> {
    fn sample(&mut self) -> DistResult<T>;

    /// Short diagnostic name, e.g. "LogNormal".
    fn name(&self) -> &str;

    fn description(&self) -> String;

    /// "<name> : <description>", the form used in logs.
    fn summary(&self) -> String {
        format!("{} : {}", self.name(), self.description())
    }
}

/// A continuous, real-valued distribution truncated to [minimum, maximum].
pub trait NumericDistribution: Distribution<f64> + Send + fmt::Debug {
    fn mean(&self) -> f64;

    /// May be +infinity when the variance is undefined.
    fn stddev(&self) -> f64;

    /// May be -infinity for distributions unbounded below.
    fn minimum(&self) -> f64;

    /// May be +infinity for distributions unbounded above.
    fn maximum(&self) -> f64;

    /// Density of the untruncated family at `x`.
    fn density(&self, x: f64) -> f64;
}

/// Inclusive truncation interval. Either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    minimum: f64,
    maximum: f64,
}

impl Bounds {
    pub fn new(minimum: f64, maximum: f64) -> DistResult<Self> {
        if minimum.is_nan() || maximum.is_nan() {
            return Err(DistError::invalid("bounds must not be NaN"));
        }
        if minimum > maximum {
            return Err(DistError::invalid(format!(
                "minimum {minimum} exceeds maximum {maximum}"
            )));
        }
        Ok(Self { minimum, maximum })
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.minimum && value <= self.maximum
    }
}

/// Draw until a value lands inside `bounds`, giving up after
/// MAX_REJECTION_ATTEMPTS.
pub(crate) fn sample_truncated<F>(name: &str, bounds: Bounds, mut draw: F) -> DistResult<f64>
where
    F: FnMut() -> f64,
{
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let value = draw();
        if bounds.contains(value) {
            return Ok(value);
        }
    }
    log::warn!(
        "{name}: no draw inside [{}, {}] after {MAX_REJECTION_ATTEMPTS} attempts",
        bounds.minimum,
        bounds.maximum
    );
    Err(DistError::SamplingExhausted {
        name: name.to_string(),
        attempts: MAX_REJECTION_ATTEMPTS,
    })
}

pub(crate) fn require_positive(label: &str, value: f64) -> DistResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DistError::invalid(format!("{label} must be positive and finite, got {value}")))
    }
}
