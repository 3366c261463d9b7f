//! # Blood Group Inheritance Calculator
//!
//! Computes, for a pair of parental blood-type phenotypes, the full
//! probability distribution of offspring phenotypes across several
//! independent blood-group systems, plus derived clinical advisories.
//!
//! ## Features
//!
//! - ABO/Rh primary panel with Punnett-square enumeration
//! - Kell, MN and Duffy extra systems
//! - Hemolytic-disease advisories (Rh, ABO, Kell) and the Duffy
//!   malaria-protection note
//! - Donor/recipient compatibility over the 8-valued ABO/Rh universe
//! - English and Bangla display text
//! - Text, HTML, JSON and CSV reports

pub mod analysis;
pub mod i18n;
pub mod inheritance;
pub mod output;
pub mod systems;
pub mod types;

// Re-export key types
pub use analysis::{
    AnalysisResults, BloodGroupAnalyzer, CompatibilityChecker, CompatibilityEntry, ParentPair,
    ParentPhenotypes, RiskEvaluator,
};
pub use i18n::{Lang, Text};
pub use inheritance::{compute_distribution, cross, punnett_grid, Distribution, Outcome};
pub use output::{ReportFormat, ReportGenerator};
pub use systems::InheritanceSystem;
pub use types::*;
