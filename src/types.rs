use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::i18n::{Lang, Text};

/// Blood group systems handled by the engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodGroupSystem {
    Abo,
    Rh,
    AboRh,
    Kell,
    Mn,
    Duffy,
}

impl fmt::Display for BloodGroupSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BloodGroupSystem::Abo => "ABO",
            BloodGroupSystem::Rh => "Rh",
            BloodGroupSystem::AboRh => "ABO/Rh",
            BloodGroupSystem::Kell => "Kell",
            BloodGroupSystem::Mn => "MN",
            BloodGroupSystem::Duffy => "Duffy",
        };
        write!(f, "{}", name)
    }
}

/// Engine errors. Everything else the engine does is total over its inputs.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The label is not a member of the system's enumerated phenotype set
    #[error("unknown {system} phenotype: {label:?}")]
    UnknownPhenotype {
        system: BloodGroupSystem,
        label: String,
    },

    /// A registry/aggregator invariant was breached; this is a defect in the
    /// engine, never a user input problem
    #[error("internal consistency failure in {system} cross: {detail}")]
    InternalConsistency {
        system: BloodGroupSystem,
        detail: String,
    },
}

/// Labels coming from the original option lists may carry a typographic
/// minus or en dash; fold both into ASCII before matching.
pub(crate) fn normalize_label(s: &str) -> String {
    s.trim().replace(['\u{2212}', '\u{2013}'], "-")
}

/* ---------- ABO ---------- */

/// ABO phenotype (antigen presence on the red cell)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AboType {
    A,
    B,
    #[serde(rename = "AB")]
    Ab,
    O,
}

/// ABO allele carried on one chromosome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AboAllele {
    A,
    B,
    O,
}

impl fmt::Display for AboType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AboType::A => "A",
            AboType::B => "B",
            AboType::Ab => "AB",
            AboType::O => "O",
        };
        write!(f, "{}", label)
    }
}

impl fmt::Display for AboAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            AboAllele::A => "A",
            AboAllele::B => "B",
            AboAllele::O => "O",
        };
        write!(f, "{}", symbol)
    }
}

impl FromStr for AboType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "A" => Ok(AboType::A),
            "B" => Ok(AboType::B),
            "AB" => Ok(AboType::Ab),
            "O" => Ok(AboType::O),
            _ => Err(EngineError::UnknownPhenotype {
                system: BloodGroupSystem::Abo,
                label: s.to_string(),
            }),
        }
    }
}

/* ---------- Rh ---------- */

/// Rh factor phenotype; '+' is dominant over '-'
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RhFactor {
    #[serde(rename = "+")]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

/// Rh allele (D antigen present or absent)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RhAllele {
    D,
    NoD,
}

impl fmt::Display for RhFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            RhFactor::Positive => "+",
            RhFactor::Negative => "-",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for RhAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            RhAllele::D => "+",
            RhAllele::NoD => "-",
        };
        write!(f, "{}", symbol)
    }
}

impl FromStr for RhFactor {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "+" => Ok(RhFactor::Positive),
            "-" => Ok(RhFactor::Negative),
            _ => Err(EngineError::UnknownPhenotype {
                system: BloodGroupSystem::Rh,
                label: s.to_string(),
            }),
        }
    }
}

/* ---------- combined ABO/Rh panel ---------- */

/// Combined ABO + Rh phenotype, the label a donor card would show ("A+")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AboRh {
    pub abo: AboType,
    pub rh: RhFactor,
}

impl AboRh {
    pub const fn new(abo: AboType, rh: RhFactor) -> Self {
        Self { abo, rh }
    }

    /// The 8-valued universe of the primary panel, in display order
    pub const ALL: [AboRh; 8] = [
        AboRh::new(AboType::A, RhFactor::Positive),
        AboRh::new(AboType::A, RhFactor::Negative),
        AboRh::new(AboType::B, RhFactor::Positive),
        AboRh::new(AboType::B, RhFactor::Negative),
        AboRh::new(AboType::Ab, RhFactor::Positive),
        AboRh::new(AboType::Ab, RhFactor::Negative),
        AboRh::new(AboType::O, RhFactor::Positive),
        AboRh::new(AboType::O, RhFactor::Negative),
    ];
}

impl fmt::Display for AboRh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.abo, self.rh)
    }
}

impl FromStr for AboRh {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = normalize_label(s);
        let parsed = match label.as_str() {
            "A+" => AboRh::new(AboType::A, RhFactor::Positive),
            "A-" => AboRh::new(AboType::A, RhFactor::Negative),
            "B+" => AboRh::new(AboType::B, RhFactor::Positive),
            "B-" => AboRh::new(AboType::B, RhFactor::Negative),
            "AB+" => AboRh::new(AboType::Ab, RhFactor::Positive),
            "AB-" => AboRh::new(AboType::Ab, RhFactor::Negative),
            "O+" => AboRh::new(AboType::O, RhFactor::Positive),
            "O-" => AboRh::new(AboType::O, RhFactor::Negative),
            _ => {
                return Err(EngineError::UnknownPhenotype {
                    system: BloodGroupSystem::AboRh,
                    label: s.to_string(),
                })
            }
        };
        Ok(parsed)
    }
}

impl Serialize for AboRh {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AboRh {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/* ---------- Kell ---------- */

/// Kell phenotype; the K antigen is dominant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KellPhenotype {
    #[serde(rename = "K+")]
    Positive,
    #[serde(rename = "K-")]
    Negative,
}

/// Kell allele: K (dominant) or k (cellano, recessive)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KellAllele {
    BigK,
    SmallK,
}

impl KellPhenotype {
    pub const ALL: [KellPhenotype; 2] = [KellPhenotype::Positive, KellPhenotype::Negative];
}

impl fmt::Display for KellPhenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KellPhenotype::Positive => "K+",
            KellPhenotype::Negative => "K-",
        };
        write!(f, "{}", label)
    }
}

impl fmt::Display for KellAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            KellAllele::BigK => "K",
            KellAllele::SmallK => "k",
        };
        write!(f, "{}", symbol)
    }
}

impl FromStr for KellPhenotype {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "K+" => Ok(KellPhenotype::Positive),
            "K-" => Ok(KellPhenotype::Negative),
            _ => Err(EngineError::UnknownPhenotype {
                system: BloodGroupSystem::Kell,
                label: s.to_string(),
            }),
        }
    }
}

/* ---------- MN ---------- */

/// MN phenotype; M and N are codominant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MnPhenotype {
    M,
    N,
    #[serde(rename = "MN")]
    Mn,
}

/// MN allele
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MnAllele {
    M,
    N,
}

impl MnPhenotype {
    pub const ALL: [MnPhenotype; 3] = [MnPhenotype::M, MnPhenotype::N, MnPhenotype::Mn];
}

impl fmt::Display for MnPhenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MnPhenotype::M => "M",
            MnPhenotype::N => "N",
            MnPhenotype::Mn => "MN",
        };
        write!(f, "{}", label)
    }
}

impl fmt::Display for MnAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            MnAllele::M => "M",
            MnAllele::N => "N",
        };
        write!(f, "{}", symbol)
    }
}

impl FromStr for MnPhenotype {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "M" => Ok(MnPhenotype::M),
            "N" => Ok(MnPhenotype::N),
            "MN" => Ok(MnPhenotype::Mn),
            _ => Err(EngineError::UnknownPhenotype {
                system: BloodGroupSystem::Mn,
                label: s.to_string(),
            }),
        }
    }
}

/* ---------- Duffy ---------- */

/// Duffy phenotype over the Fya/Fyb antigens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DuffyPhenotype {
    #[serde(rename = "Fy(a+b-)")]
    FyAPosBNeg,
    #[serde(rename = "Fy(a-b+)")]
    FyANegBPos,
    #[serde(rename = "Fy(a+b+)")]
    FyAPosBPos,
    #[serde(rename = "Fy(a-b-)")]
    FyANegBNeg,
}

/// Duffy allele. The A/B/O symbols are Duffy-local (Fya, Fyb, silent) and
/// unrelated to the ABO system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DuffyAllele {
    A,
    B,
    O,
}

impl DuffyPhenotype {
    pub const ALL: [DuffyPhenotype; 4] = [
        DuffyPhenotype::FyAPosBNeg,
        DuffyPhenotype::FyANegBPos,
        DuffyPhenotype::FyAPosBPos,
        DuffyPhenotype::FyANegBNeg,
    ];
}

impl fmt::Display for DuffyPhenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DuffyPhenotype::FyAPosBNeg => "Fy(a+b-)",
            DuffyPhenotype::FyANegBPos => "Fy(a-b+)",
            DuffyPhenotype::FyAPosBPos => "Fy(a+b+)",
            DuffyPhenotype::FyANegBNeg => "Fy(a-b-)",
        };
        write!(f, "{}", label)
    }
}

impl fmt::Display for DuffyAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            DuffyAllele::A => "A",
            DuffyAllele::B => "B",
            DuffyAllele::O => "O",
        };
        write!(f, "{}", symbol)
    }
}

impl FromStr for DuffyPhenotype {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "Fy(a+b-)" => Ok(DuffyPhenotype::FyAPosBNeg),
            "Fy(a-b+)" => Ok(DuffyPhenotype::FyANegBPos),
            "Fy(a+b+)" => Ok(DuffyPhenotype::FyAPosBPos),
            "Fy(a-b-)" => Ok(DuffyPhenotype::FyANegBNeg),
            _ => Err(EngineError::UnknownPhenotype {
                system: BloodGroupSystem::Duffy,
                label: s.to_string(),
            }),
        }
    }
}

/* ---------- risk findings ---------- */

/// Advisory rules the risk evaluator can trigger, in evaluation order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskKind {
    RhIncompatibility,
    AboHemolyticDisease,
    KellIncompatibility,
    DuffyMalariaProtection,
}

/// A triggered advisory, localized for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskFinding {
    pub title: String,
    pub description: String,
}

impl RiskKind {
    pub fn title_key(&self) -> Text {
        match self {
            RiskKind::RhIncompatibility => Text::RiskRhTitle,
            RiskKind::AboHemolyticDisease => Text::RiskAboTitle,
            RiskKind::KellIncompatibility => Text::RiskKellTitle,
            RiskKind::DuffyMalariaProtection => Text::RiskDuffyTitle,
        }
    }

    pub fn description_key(&self) -> Text {
        match self {
            RiskKind::RhIncompatibility => Text::RiskRhDesc,
            RiskKind::AboHemolyticDisease => Text::RiskAboDesc,
            RiskKind::KellIncompatibility => Text::RiskKellDesc,
            RiskKind::DuffyMalariaProtection => Text::RiskDuffyDesc,
        }
    }

    pub fn finding(&self, lang: Lang) -> RiskFinding {
        RiskFinding {
            title: lang.text(self.title_key()).to_string(),
            description: lang.text(self.description_key()).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abo_rh_labels_round_trip() {
        for phenotype in AboRh::ALL {
            let parsed: AboRh = phenotype.to_string().parse().unwrap();
            assert_eq!(parsed, phenotype);
        }
    }

    #[test]
    fn typographic_minus_is_accepted() {
        let parsed: AboRh = "O\u{2212}".parse().unwrap();
        assert_eq!(parsed, AboRh::new(AboType::O, RhFactor::Negative));

        let kell: KellPhenotype = "K\u{2212}".parse().unwrap();
        assert_eq!(kell, KellPhenotype::Negative);

        let duffy: DuffyPhenotype = "Fy(a\u{2212}b\u{2212})".parse().unwrap();
        assert_eq!(duffy, DuffyPhenotype::FyANegBNeg);
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let err = "C+".parse::<AboRh>().unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownPhenotype {
                system: BloodGroupSystem::AboRh,
                ..
            }
        ));
    }
}
