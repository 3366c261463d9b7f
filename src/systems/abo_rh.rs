use crate::systems::InheritanceSystem;
use crate::types::{AboAllele, AboRh, AboType, BloodGroupSystem, RhAllele, RhFactor};

/// ABO sub-system. A and B dominate O; A with B is codominant (AB).
pub struct AboSystem;

impl InheritanceSystem for AboSystem {
    type Allele = AboAllele;
    type Phenotype = AboType;

    const SYSTEM: BloodGroupSystem = BloodGroupSystem::Abo;

    fn gametes(phenotype: AboType) -> Vec<AboAllele> {
        match phenotype {
            AboType::A => vec![AboAllele::A, AboAllele::O],
            AboType::B => vec![AboAllele::B, AboAllele::O],
            AboType::Ab => vec![AboAllele::A, AboAllele::B],
            AboType::O => vec![AboAllele::O],
        }
    }

    fn resolve(paternal: AboAllele, maternal: AboAllele) -> AboType {
        use AboAllele::{A, B, O};
        match (paternal, maternal) {
            (A, A) | (A, O) | (O, A) => AboType::A,
            (B, B) | (B, O) | (O, B) => AboType::B,
            (A, B) | (B, A) => AboType::Ab,
            (O, O) => AboType::O,
        }
    }
}

/// Rh sub-system. A single D allele makes the phenotype positive.
pub struct RhSystem;

impl InheritanceSystem for RhSystem {
    type Allele = RhAllele;
    type Phenotype = RhFactor;

    const SYSTEM: BloodGroupSystem = BloodGroupSystem::Rh;

    fn gametes(phenotype: RhFactor) -> Vec<RhAllele> {
        match phenotype {
            RhFactor::Positive => vec![RhAllele::D, RhAllele::NoD],
            RhFactor::Negative => vec![RhAllele::NoD],
        }
    }

    fn resolve(paternal: RhAllele, maternal: RhAllele) -> RhFactor {
        if paternal == RhAllele::D || maternal == RhAllele::D {
            RhFactor::Positive
        } else {
            RhFactor::Negative
        }
    }
}

/// The primary panel: ABO and Rh inherited independently, so a gamete is an
/// (ABO allele, Rh allele) pair and the gamete set is the product of the two
/// sub-system tables (1, 2 or 4 gametes per phenotype).
pub struct AboRhSystem;

impl InheritanceSystem for AboRhSystem {
    type Allele = (AboAllele, RhAllele);
    type Phenotype = AboRh;

    const SYSTEM: BloodGroupSystem = BloodGroupSystem::AboRh;

    fn gametes(phenotype: AboRh) -> Vec<(AboAllele, RhAllele)> {
        let abo = AboSystem::gametes(phenotype.abo);
        let rh = RhSystem::gametes(phenotype.rh);
        abo.iter()
            .flat_map(|a| rh.iter().map(move |r| (*a, *r)))
            .collect()
    }

    fn resolve(paternal: (AboAllele, RhAllele), maternal: (AboAllele, RhAllele)) -> AboRh {
        AboRh {
            abo: AboSystem::resolve(paternal.0, maternal.0),
            rh: RhSystem::resolve(paternal.1, maternal.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abo_resolution_covers_dominance_and_codominance() {
        assert_eq!(AboSystem::resolve(AboAllele::A, AboAllele::O), AboType::A);
        assert_eq!(AboSystem::resolve(AboAllele::O, AboAllele::B), AboType::B);
        assert_eq!(AboSystem::resolve(AboAllele::A, AboAllele::B), AboType::Ab);
        assert_eq!(AboSystem::resolve(AboAllele::O, AboAllele::O), AboType::O);
    }

    #[test]
    fn rh_positive_is_dominant() {
        assert_eq!(
            RhSystem::resolve(RhAllele::D, RhAllele::NoD),
            RhFactor::Positive
        );
        assert_eq!(
            RhSystem::resolve(RhAllele::NoD, RhAllele::NoD),
            RhFactor::Negative
        );
    }

    #[test]
    fn combined_gamete_set_is_the_sub_system_product() {
        let a_pos: AboRh = "A+".parse().unwrap();
        assert_eq!(AboRhSystem::gametes(a_pos).len(), 4);

        let o_neg: AboRh = "O-".parse().unwrap();
        assert_eq!(
            AboRhSystem::gametes(o_neg),
            vec![(AboAllele::O, RhAllele::NoD)]
        );
    }
}
