use crate::types::BloodGroupSystem;

pub mod abo_rh;
pub mod duffy;
pub mod kell;
pub mod mn;

pub use abo_rh::{AboRhSystem, AboSystem, RhSystem};
pub use duffy::DuffySystem;
pub use kell::KellSystem;
pub use mn::MnSystem;

/// One Mendelian blood-group system: a fixed gamete table plus a total
/// allele-pair -> phenotype reduction rule.
///
/// Every allele within a gamete set is treated as equally likely to be
/// transmitted. That uniform prior is a deliberate simplification carried
/// over from the source model; population allele frequencies are out of
/// scope.
pub trait InheritanceSystem {
    type Allele: Copy + Eq;
    type Phenotype: Copy + Eq + Ord;

    const SYSTEM: BloodGroupSystem;

    /// The gametes an individual with this phenotype can transmit. The set
    /// is an ordered multiset; repeats (e.g. K- -> {k, k}) keep the
    /// combination counts of the source tables.
    fn gametes(phenotype: Self::Phenotype) -> Vec<Self::Allele>;

    /// Reduce one paternal and one maternal allele to the offspring
    /// phenotype. Closed allele enums make the match exhaustive, so the
    /// rule cannot be reached with a symbol outside the system's alphabet.
    fn resolve(paternal: Self::Allele, maternal: Self::Allele) -> Self::Phenotype;
}
