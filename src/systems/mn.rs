use crate::systems::InheritanceSystem;
use crate::types::{BloodGroupSystem, MnAllele, MnPhenotype};

/// MN system. M and N are codominant; the heterozygote expresses both.
pub struct MnSystem;

impl InheritanceSystem for MnSystem {
    type Allele = MnAllele;
    type Phenotype = MnPhenotype;

    const SYSTEM: BloodGroupSystem = BloodGroupSystem::Mn;

    fn gametes(phenotype: MnPhenotype) -> Vec<MnAllele> {
        match phenotype {
            MnPhenotype::M => vec![MnAllele::M, MnAllele::M],
            MnPhenotype::N => vec![MnAllele::N, MnAllele::N],
            MnPhenotype::Mn => vec![MnAllele::M, MnAllele::N],
        }
    }

    fn resolve(paternal: MnAllele, maternal: MnAllele) -> MnPhenotype {
        match (paternal, maternal) {
            (MnAllele::M, MnAllele::M) => MnPhenotype::M,
            (MnAllele::N, MnAllele::N) => MnPhenotype::N,
            _ => MnPhenotype::Mn,
        }
    }
}
