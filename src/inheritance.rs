use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::systems::{
    AboRhSystem, AboSystem, DuffySystem, InheritanceSystem, KellSystem, MnSystem, RhSystem,
};
use crate::types::{BloodGroupSystem, EngineError};

/// Tolerance for the sum-to-one invariant
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// One phenotype in a distribution, with its combination count and its
/// share of the total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<P> {
    pub phenotype: P,
    pub count: usize,
    pub probability: f64,
}

/// Normalized offspring phenotype distribution for one system. Only
/// phenotypes with a nonzero combination count are present; outcomes are
/// ordered by the phenotype's declaration order, so identical inputs yield
/// bit-identical distributions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution<P> {
    outcomes: Vec<Outcome<P>>,
    total_combinations: usize,
}

impl<P: Clone + PartialEq> Distribution<P> {
    fn from_counts(counts: BTreeMap<P, usize>, total_combinations: usize) -> Self
    where
        P: Ord,
    {
        let outcomes = counts
            .into_iter()
            .map(|(phenotype, count)| Outcome {
                phenotype,
                count,
                probability: count as f64 / total_combinations as f64,
            })
            .collect();
        Self {
            outcomes,
            total_combinations,
        }
    }

    pub fn outcomes(&self) -> &[Outcome<P>] {
        &self.outcomes
    }

    pub fn total_combinations(&self) -> usize {
        self.total_combinations
    }

    pub fn probability_of(&self, phenotype: &P) -> f64 {
        self.outcomes
            .iter()
            .find(|o| o.phenotype == *phenotype)
            .map(|o| o.probability)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, phenotype: &P) -> bool {
        self.outcomes.iter().any(|o| o.phenotype == *phenotype)
    }

    /// True if any phenotype in the support satisfies the predicate
    pub fn any<F: Fn(&P) -> bool>(&self, predicate: F) -> bool {
        self.outcomes.iter().any(|o| predicate(&o.phenotype))
    }

    /// Verify the aggregation invariants. A failure here means the gamete
    /// tables and the aggregator disagree, which is a defect, so it maps to
    /// `InternalConsistency` rather than a user-facing error.
    pub fn check_invariants(&self, system: BloodGroupSystem) -> Result<(), EngineError> {
        if self.outcomes.is_empty() {
            return Err(EngineError::InternalConsistency {
                system,
                detail: "empty distribution".to_string(),
            });
        }

        let count_sum: usize = self.outcomes.iter().map(|o| o.count).sum();
        if count_sum != self.total_combinations {
            return Err(EngineError::InternalConsistency {
                system,
                detail: format!(
                    "combination counts sum to {} but {} were enumerated",
                    count_sum, self.total_combinations
                ),
            });
        }

        let probability_sum: f64 = self.outcomes.iter().map(|o| o.probability).sum();
        if (probability_sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(EngineError::InternalConsistency {
                system,
                detail: format!("probabilities sum to {}", probability_sum),
            });
        }

        Ok(())
    }

    /// Re-key the distribution by display label, preserving order
    pub fn into_labeled(self) -> Distribution<String>
    where
        P: fmt::Display,
    {
        Distribution {
            outcomes: self
                .outcomes
                .into_iter()
                .map(|o| Outcome {
                    phenotype: o.phenotype.to_string(),
                    count: o.count,
                    probability: o.probability,
                })
                .collect(),
            total_combinations: self.total_combinations,
        }
    }
}

/// Cross two parental phenotypes under one system: enumerate the full
/// Cartesian product of the parents' gamete sets, resolve every pair and
/// count occurrences. Every pair is equally weighted.
pub fn cross<S: InheritanceSystem>(
    father: S::Phenotype,
    mother: S::Phenotype,
) -> Distribution<S::Phenotype> {
    let paternal = S::gametes(father);
    let maternal = S::gametes(mother);
    let total_combinations = paternal.len() * maternal.len();

    let mut counts: BTreeMap<S::Phenotype, usize> = BTreeMap::new();
    for f in &paternal {
        for m in &maternal {
            *counts.entry(S::resolve(*f, *m)).or_insert(0) += 1;
        }
    }

    Distribution::from_counts(counts, total_combinations)
}

/// Punnett grid for one system: `(father_gametes, mother_gametes, cells)`
/// with rows indexed by the mother's gametes and columns by the father's
#[allow(clippy::type_complexity)]
pub fn punnett_grid<S: InheritanceSystem>(
    father: S::Phenotype,
    mother: S::Phenotype,
) -> (Vec<S::Allele>, Vec<S::Allele>, Vec<Vec<S::Phenotype>>) {
    let paternal = S::gametes(father);
    let maternal = S::gametes(mother);
    let cells = maternal
        .iter()
        .map(|m| paternal.iter().map(|f| S::resolve(*f, *m)).collect())
        .collect();
    (paternal, maternal, cells)
}

fn labeled_cross<S>(
    father: &str,
    mother: &str,
) -> Result<Distribution<String>, EngineError>
where
    S: InheritanceSystem,
    S::Phenotype: FromStr<Err = EngineError> + fmt::Display,
{
    let father = father.parse::<S::Phenotype>()?;
    let mother = mother.parse::<S::Phenotype>()?;
    let distribution = cross::<S>(father, mother);
    distribution.check_invariants(S::SYSTEM)?;
    Ok(distribution.into_labeled())
}

/// String-boundary entry point for the presentation shell: parse the two
/// parental labels in the given system's enumerated set and return the
/// offspring distribution keyed by display label. Fails with
/// `UnknownPhenotype` if either label is not in the set.
pub fn compute_distribution(
    system: BloodGroupSystem,
    father: &str,
    mother: &str,
) -> Result<Distribution<String>, EngineError> {
    match system {
        BloodGroupSystem::Abo => labeled_cross::<AboSystem>(father, mother),
        BloodGroupSystem::Rh => labeled_cross::<RhSystem>(father, mother),
        BloodGroupSystem::AboRh => labeled_cross::<AboRhSystem>(father, mother),
        BloodGroupSystem::Kell => labeled_cross::<KellSystem>(father, mother),
        BloodGroupSystem::Mn => labeled_cross::<MnSystem>(father, mother),
        BloodGroupSystem::Duffy => labeled_cross::<DuffySystem>(father, mother),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AboRh, AboType};

    #[test]
    fn ab_cross_ab_pins_the_codominant_multiplicities() {
        let dist = cross::<AboSystem>(AboType::Ab, AboType::Ab);
        assert_eq!(dist.total_combinations(), 4);
        assert_eq!(dist.probability_of(&AboType::A), 0.25);
        assert_eq!(dist.probability_of(&AboType::B), 0.25);
        assert_eq!(dist.probability_of(&AboType::Ab), 0.5);
        assert!(!dist.contains(&AboType::O));
    }

    #[test]
    fn homozygous_negative_parents_give_a_certain_outcome() {
        let o_neg: AboRh = "O-".parse().unwrap();
        let dist = cross::<AboRhSystem>(o_neg, o_neg);
        assert_eq!(dist.total_combinations(), 1);
        assert_eq!(dist.outcomes().len(), 1);
        assert_eq!(dist.probability_of(&o_neg), 1.0);
    }

    #[test]
    fn combined_panel_enumerates_all_sixteen_pairs() {
        let a_pos: AboRh = "A+".parse().unwrap();
        let dist = cross::<AboRhSystem>(a_pos, a_pos);
        assert_eq!(dist.total_combinations(), 16);
        dist.check_invariants(BloodGroupSystem::AboRh).unwrap();
    }

    #[test]
    fn cross_is_symmetric_in_the_parents() {
        for father in AboRh::ALL {
            for mother in AboRh::ALL {
                let forward = cross::<AboRhSystem>(father, mother);
                let swapped = cross::<AboRhSystem>(mother, father);
                assert_eq!(forward, swapped, "{} x {}", father, mother);
            }
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let first = compute_distribution(BloodGroupSystem::AboRh, "A+", "B-").unwrap();
        let second = compute_distribution(BloodGroupSystem::AboRh, "A+", "B-").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_labels_surface_as_errors() {
        let err = compute_distribution(BloodGroupSystem::Kell, "K?", "K-").unwrap_err();
        assert!(matches!(err, EngineError::UnknownPhenotype { .. }));
    }

    #[test]
    fn labeled_output_uses_display_labels() {
        let dist = compute_distribution(BloodGroupSystem::Duffy, "Fy(a+b-)", "Fy(a-b+)").unwrap();
        assert!(dist.contains(&"Fy(a-b-)".to_string()));
        assert_eq!(dist.probability_of(&"Fy(a+b+)".to_string()), 0.25);
    }
}
