use crate::systems::InheritanceSystem;
use crate::types::{BloodGroupSystem, DuffyAllele, DuffyPhenotype};

/// Duffy system. Fya (A) and Fyb (B) are codominant; O is the silent
/// allele, and O/O is the malaria-protective null phenotype.
pub struct DuffySystem;

impl InheritanceSystem for DuffySystem {
    type Allele = DuffyAllele;
    type Phenotype = DuffyPhenotype;

    const SYSTEM: BloodGroupSystem = BloodGroupSystem::Duffy;

    fn gametes(phenotype: DuffyPhenotype) -> Vec<DuffyAllele> {
        match phenotype {
            DuffyPhenotype::FyAPosBNeg => vec![DuffyAllele::A, DuffyAllele::O],
            DuffyPhenotype::FyANegBPos => vec![DuffyAllele::B, DuffyAllele::O],
            DuffyPhenotype::FyAPosBPos => vec![DuffyAllele::A, DuffyAllele::B],
            DuffyPhenotype::FyANegBNeg => vec![DuffyAllele::O, DuffyAllele::O],
        }
    }

    fn resolve(paternal: DuffyAllele, maternal: DuffyAllele) -> DuffyPhenotype {
        let has_a = paternal == DuffyAllele::A || maternal == DuffyAllele::A;
        let has_b = paternal == DuffyAllele::B || maternal == DuffyAllele::B;
        match (has_a, has_b) {
            (true, true) => DuffyPhenotype::FyAPosBPos,
            (true, false) => DuffyPhenotype::FyAPosBNeg,
            (false, true) => DuffyPhenotype::FyANegBPos,
            (false, false) => DuffyPhenotype::FyANegBNeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inheritance::cross;

    #[test]
    fn carriers_can_produce_the_null_phenotype() {
        let dist = cross::<DuffySystem>(DuffyPhenotype::FyAPosBNeg, DuffyPhenotype::FyANegBPos);
        assert_eq!(dist.probability_of(&DuffyPhenotype::FyAPosBPos), 0.25);
        assert_eq!(dist.probability_of(&DuffyPhenotype::FyAPosBNeg), 0.25);
        assert_eq!(dist.probability_of(&DuffyPhenotype::FyANegBPos), 0.25);
        assert_eq!(dist.probability_of(&DuffyPhenotype::FyANegBNeg), 0.25);
    }

    #[test]
    fn double_heterozygotes_never_produce_the_null_phenotype() {
        let dist = cross::<DuffySystem>(DuffyPhenotype::FyAPosBPos, DuffyPhenotype::FyAPosBPos);
        assert!(!dist.contains(&DuffyPhenotype::FyANegBNeg));
        assert_eq!(dist.probability_of(&DuffyPhenotype::FyAPosBPos), 0.5);
    }
}
