use crate::systems::InheritanceSystem;
use crate::types::{BloodGroupSystem, KellAllele, KellPhenotype};

/// Kell system. K dominates k, so K+ individuals are modeled as K/k
/// carriers and K- individuals as k/k.
pub struct KellSystem;

impl InheritanceSystem for KellSystem {
    type Allele = KellAllele;
    type Phenotype = KellPhenotype;

    const SYSTEM: BloodGroupSystem = BloodGroupSystem::Kell;

    fn gametes(phenotype: KellPhenotype) -> Vec<KellAllele> {
        match phenotype {
            KellPhenotype::Positive => vec![KellAllele::BigK, KellAllele::SmallK],
            KellPhenotype::Negative => vec![KellAllele::SmallK, KellAllele::SmallK],
        }
    }

    fn resolve(paternal: KellAllele, maternal: KellAllele) -> KellPhenotype {
        if paternal == KellAllele::BigK || maternal == KellAllele::BigK {
            KellPhenotype::Positive
        } else {
            KellPhenotype::Negative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inheritance::cross;

    #[test]
    fn kell_negative_parents_only_produce_negative_children() {
        let dist = cross::<KellSystem>(KellPhenotype::Negative, KellPhenotype::Negative);
        assert_eq!(dist.outcomes().len(), 1);
        assert_eq!(dist.probability_of(&KellPhenotype::Negative), 1.0);
    }

    #[test]
    fn kell_positive_father_negative_mother_splits_evenly() {
        let dist = cross::<KellSystem>(KellPhenotype::Positive, KellPhenotype::Negative);
        assert_eq!(dist.total_combinations(), 4);
        assert_eq!(dist.probability_of(&KellPhenotype::Positive), 0.5);
        assert_eq!(dist.probability_of(&KellPhenotype::Negative), 0.5);
    }
}
