//! Weighted entity selection by cumulative weight.
//!
//! At construction each entry's weight is prefix-summed into a threshold:
//!
//!   weights   [A: 3.0, B: 1.0, C: 6.0]
//!   index     [(3.0, A), (4.0, B), (10.0, C)]
//!
//! A draw u ∈ [0, total) selects the first entry whose threshold is
//! strictly greater than u, i.e. inverse-CDF sampling over a step function.
//! Thresholds keep the caller's order, so subtracting neighbours recovers
//! the per-entity weights for `detailed_description`.

use crate::{
    distribution::Distribution,
    error::{DistError, DistResult},
    rng::RandomSource,
};
use std::fmt::Write as _;

pub type LabelFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

pub struct WeightedEntityDistribution<T> {
    name: String,
    cumulative: Vec<(f64, T)>,
    total_weight: f64,
    label: LabelFn<T>,
    rng: RandomSource,
}

impl<T: Clone> WeightedEntityDistribution<T> {
    pub fn new<I, L>(
        name: impl Into<String>,
        weights: I,
        label: L,
        rng: RandomSource,
    ) -> DistResult<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
        L: Fn(&T) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        let mut cumulative = Vec::new();
        let mut running_sum = 0.0;

        for (entity, weight) in weights {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(DistError::invalid(format!(
                    "{name}: entity '{}' has weight {weight}; weights must be positive",
                    label(&entity)
                )));
            }
            let previous = running_sum;
            running_sum += weight;
            // A weight lost to rounding against the running total would
            // leave its entity a zero-width step that is never drawn.
            if running_sum <= previous || !running_sum.is_finite() {
                return Err(DistError::invalid(format!(
                    "{name}: entity '{}' with weight {weight} vanishes against total {previous}",
                    label(&entity)
                )));
            }
            cumulative.push((running_sum, entity));
        }

        if cumulative.is_empty() {
            return Err(DistError::invalid(format!("{name}: no entities to choose from")));
        }

        log::debug!(
            "weighted distribution '{name}' built: {} entities, total weight {running_sum:.2}",
            cumulative.len()
        );

        Ok(Self {
            name,
            cumulative,
            total_weight: running_sum,
            label: Box::new(label),
            rng,
        })
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Index of the first threshold strictly greater than `u`.
    fn position_for(&self, u: f64) -> usize {
        let i = self.cumulative.partition_point(|(threshold, _)| *threshold <= u);
        // u * total can round up to total itself.
        i.min(self.cumulative.len() - 1)
    }

    /// Description plus one line per entity with its weight and share.
    pub fn detailed_description(&self) -> String {
        let mut out = self.description();
        out.push_str(":\n");
        let mut previous = 0.0;
        for (threshold, entity) in &self.cumulative {
            let weight = threshold - previous;
            let percentage = weight / self.total_weight * 100.0;
            let _ = writeln!(
                out,
                "  - {}: {weight:.2} ({percentage:.2}%)",
                (self.label)(entity)
            );
            previous = *threshold;
        }
        out
    }
}

impl<T: Clone> Distribution<T> for WeightedEntityDistribution<T> {
    fn sample(&mut self) -> DistResult<T> {
        let u = self.rng.next_f64() * self.total_weight;
        let i = self.position_for(u);
        Ok(self.cumulative[i].1.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!("Weighted distribution with {} possible entities", self.cumulative.len())
    }
}

impl<T> std::fmt::Debug for WeightedEntityDistribution<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedEntityDistribution")
            .field("name", &self.name)
            .field("entities", &self.cumulative.len())
            .field("total_weight", &self.total_weight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> WeightedEntityDistribution<&'static str> {
        WeightedEntityDistribution::new(
            "Letters",
            vec![("A", 3.0), ("B", 1.0), ("C", 6.0)],
            |s: &&str| s.to_string(),
            RandomSource::seeded(4),
        )
        .unwrap()
    }

    #[test]
    fn thresholds_select_step_function() {
        let dist = abc();
        assert_eq!(dist.total_weight(), 10.0);
        assert_eq!(dist.cumulative[dist.position_for(0.0)].1, "A");
        assert_eq!(dist.cumulative[dist.position_for(2.999)].1, "A");
        // exactly on a threshold moves to the next entity
        assert_eq!(dist.cumulative[dist.position_for(3.0)].1, "B");
        assert_eq!(dist.cumulative[dist.position_for(3.5)].1, "B");
        assert_eq!(dist.cumulative[dist.position_for(4.0)].1, "C");
        assert_eq!(dist.cumulative[dist.position_for(10.0)].1, "C");
    }

    #[test]
    fn detailed_description_recovers_individual_weights() {
        let text = abc().detailed_description();
        assert_eq!(
            text,
            "Weighted distribution with 3 possible entities:\n\
             \x20 - A: 3.00 (30.00%)\n\
             \x20 - B: 1.00 (10.00%)\n\
             \x20 - C: 6.00 (60.00%)\n"
        );
    }

    #[test]
    fn empty_and_zero_weight_tables_rejected() {
        let empty: Vec<(u8, f64)> = Vec::new();
        let label = |v: &u8| v.to_string();
        assert!(matches!(
            WeightedEntityDistribution::new("Empty", empty, label, RandomSource::seeded(1)),
            Err(DistError::InvalidConfiguration { .. })
        ));
        assert!(WeightedEntityDistribution::new(
            "Zero",
            vec![(1u8, 1.0), (2u8, 0.0)],
            label,
            RandomSource::seeded(1)
        )
        .is_err());
    }

    #[test]
    fn weight_absorbed_by_running_total_rejected() {
        let err = WeightedEntityDistribution::new(
            "Skewed",
            vec![("big", 1e17), ("tiny", 1.0)],
            |v: &&str| v.to_string(),
            RandomSource::seeded(1),
        )
        .unwrap_err();
        match err {
            DistError::InvalidConfiguration { reason } => assert!(reason.contains("tiny"), "{reason}"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
