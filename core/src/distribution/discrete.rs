use crate::{
    distribution::Distribution,
    error::{DistError, DistResult},
    rng::RandomSource,
};
use rand::distributions::{Distribution as _, WeightedIndex};
use std::collections::HashMap;
use std::hash::Hash;

/// Categorical distribution over a finite set of values.
///
/// Weights need not sum to 1; each value is drawn with probability
/// `weight / Σ weights`. Values are keyed by structural equality, so two
/// independently built values that compare equal share one entry.
#[derive(Debug)]
pub struct DiscreteDistribution<T> {
    name: String,
    values: Vec<T>,
    probabilities: HashMap<T, f64>,
    index: WeightedIndex<f64>,
    rng: RandomSource,
}

impl<T> DiscreteDistribution<T>
where
    T: Clone + Eq + Hash,
{
    /// Build from `(value, weight)` pairs. Iteration order of the input
    /// fixes the sampling order, so pass an ordered collection when the
    /// sequence must be reproducible from a seed.
    pub fn new<I>(name: impl Into<String>, weights: I, rng: RandomSource) -> DistResult<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let name = name.into();
        let mut values = Vec::new();
        let mut raw_weights = Vec::new();
        let mut probabilities = HashMap::new();

        for (value, weight) in weights {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(DistError::invalid(format!(
                    "{name}: weights must be positive and finite, got {weight}"
                )));
            }
            if probabilities.insert(value.clone(), weight).is_some() {
                return Err(DistError::invalid(format!("{name}: duplicate value in weight table")));
            }
            values.push(value);
            raw_weights.push(weight);
        }

        if values.is_empty() {
            return Err(DistError::invalid(format!("{name}: weight table is empty")));
        }

        let index = WeightedIndex::new(&raw_weights)
            .map_err(|e| DistError::invalid(format!("{name}: {e}")))?;

        log::debug!("discrete distribution '{name}' built with {} values", values.len());

        Ok(Self { name, values, probabilities, index, rng })
    }

    /// The configured weight of `value`, or 0 when it is not in the table.
    pub fn probability_of(&self, value: &T) -> f64 {
        self.probabilities.get(value).copied().unwrap_or(0.0)
    }

    pub fn probabilities(&self) -> &HashMap<T, f64> {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> Distribution<T> for DiscreteDistribution<T>
where
    T: Clone + Eq + Hash,
{
    fn sample(&mut self) -> DistResult<T> {
        let i = self.index.sample(&mut self.rng);
        Ok(self.values[i].clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!("Discrete distribution with {} possible values", self.values.len())
    }
}
