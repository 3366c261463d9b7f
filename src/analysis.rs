use serde::Serialize;

use crate::i18n::Lang;
use crate::inheritance::{cross, Distribution};
use crate::systems::{AboRhSystem, DuffySystem, KellSystem, MnSystem};
use crate::types::*;

/// One father/mother selection for a single system
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ParentPair<P> {
    pub father: P,
    pub mother: P,
}

impl<P> ParentPair<P> {
    pub fn new(father: P, mother: P) -> Self {
        Self { father, mother }
    }
}

/// Everything the caller selected. The primary ABO/Rh panel is mandatory;
/// each extra system is analyzed only when its pair is given.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ParentPhenotypes {
    pub abo_rh: ParentPair<AboRh>,
    pub kell: Option<ParentPair<KellPhenotype>>,
    pub mn: Option<ParentPair<MnPhenotype>>,
    pub duffy: Option<ParentPair<DuffyPhenotype>>,
}

impl ParentPhenotypes {
    pub fn new(father: AboRh, mother: AboRh) -> Self {
        Self {
            abo_rh: ParentPair::new(father, mother),
            kell: None,
            mn: None,
            duffy: None,
        }
    }
}

/// Transfusion options for one phenotype, drawn from the 8-valued ABO/Rh
/// universe
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompatibilityEntry {
    pub phenotype: AboRh,
    pub can_receive_from: Vec<AboRh>,
    pub can_donate_to: Vec<AboRh>,
}

/// Container for all analysis results of one parental selection
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResults {
    pub parents: ParentPhenotypes,
    pub abo_rh: Distribution<AboRh>,
    pub kell: Option<Distribution<KellPhenotype>>,
    pub mn: Option<Distribution<MnPhenotype>>,
    pub duffy: Option<Distribution<DuffyPhenotype>>,
    pub compatibility: Vec<CompatibilityEntry>,
    pub risks: Vec<RiskKind>,
}

impl AnalysisResults {
    /// Triggered advisories localized for display; empty means the risk
    /// panel is suppressed entirely
    pub fn findings(&self, lang: Lang) -> Vec<RiskFinding> {
        self.risks.iter().map(|r| r.finding(lang)).collect()
    }
}

/// Donor/recipient compatibility over ABO/Rh phenotypes
pub struct CompatibilityChecker;

impl CompatibilityChecker {
    pub fn new() -> Self {
        Self
    }

    /// ABO rule: AB accepts anything, A accepts A/O, B accepts B/O, O only
    /// O. Rh rule: a '+' donor may not give to a '-' recipient. Both must
    /// hold.
    pub fn can_donate(&self, donor: AboRh, recipient: AboRh) -> bool {
        let abo_ok = match recipient.abo {
            AboType::Ab => true,
            AboType::A => matches!(donor.abo, AboType::A | AboType::O),
            AboType::B => matches!(donor.abo, AboType::B | AboType::O),
            AboType::O => donor.abo == AboType::O,
        };
        let rh_ok = !(donor.rh == RhFactor::Positive && recipient.rh == RhFactor::Negative);
        abo_ok && rh_ok
    }

    /// Compatibility entry for every phenotype in the offspring
    /// distribution, querying all 8x8 ordered pairs of the universe
    pub fn entries_for(&self, offspring: &Distribution<AboRh>) -> Vec<CompatibilityEntry> {
        offspring
            .outcomes()
            .iter()
            .map(|outcome| {
                let phenotype = outcome.phenotype;
                CompatibilityEntry {
                    phenotype,
                    can_receive_from: AboRh::ALL
                        .iter()
                        .copied()
                        .filter(|donor| self.can_donate(*donor, phenotype))
                        .collect(),
                    can_donate_to: AboRh::ALL
                        .iter()
                        .copied()
                        .filter(|recipient| self.can_donate(phenotype, *recipient))
                        .collect(),
                }
            })
            .collect()
    }
}

/// Stateless advisory rules over parental phenotypes and offspring
/// distributions. Rules are independent; several may fire at once.
pub struct RiskEvaluator;

impl RiskEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Primary-panel rules, in declaration order: Rh incompatibility, then
    /// ABO haemolytic disease
    pub fn evaluate(
        &self,
        _father: AboRh,
        mother: AboRh,
        offspring: &Distribution<AboRh>,
    ) -> Vec<RiskKind> {
        let mut triggered = Vec::new();

        if mother.rh == RhFactor::Negative && offspring.any(|p| p.rh == RhFactor::Positive) {
            triggered.push(RiskKind::RhIncompatibility);
        }

        if mother.abo == AboType::O
            && offspring.any(|p| matches!(p.abo, AboType::A | AboType::B))
        {
            triggered.push(RiskKind::AboHemolyticDisease);
        }

        triggered
    }

    pub fn evaluate_kell(
        &self,
        father: KellPhenotype,
        mother: KellPhenotype,
        offspring: &Distribution<KellPhenotype>,
    ) -> Option<RiskKind> {
        (mother == KellPhenotype::Negative
            && father == KellPhenotype::Positive
            && offspring.contains(&KellPhenotype::Positive))
        .then_some(RiskKind::KellIncompatibility)
    }

    /// Informational, not a disease risk: the null phenotype protects
    /// against Plasmodium vivax
    pub fn evaluate_duffy(&self, offspring: &Distribution<DuffyPhenotype>) -> Option<RiskKind> {
        offspring
            .contains(&DuffyPhenotype::FyANegBNeg)
            .then_some(RiskKind::DuffyMalariaProtection)
    }
}

/// Runs the full pipeline for one parental selection: cross each selected
/// system, verify the aggregation invariants, then derive the advisory and
/// compatibility views.
pub struct BloodGroupAnalyzer;

impl BloodGroupAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, parents: &ParentPhenotypes) -> Result<AnalysisResults, EngineError> {
        let abo_rh = cross::<AboRhSystem>(parents.abo_rh.father, parents.abo_rh.mother);
        abo_rh.check_invariants(BloodGroupSystem::AboRh)?;

        let kell = parents
            .kell
            .map(|pair| cross::<KellSystem>(pair.father, pair.mother));
        if let Some(dist) = &kell {
            dist.check_invariants(BloodGroupSystem::Kell)?;
        }

        let mn = parents
            .mn
            .map(|pair| cross::<MnSystem>(pair.father, pair.mother));
        if let Some(dist) = &mn {
            dist.check_invariants(BloodGroupSystem::Mn)?;
        }

        let duffy = parents
            .duffy
            .map(|pair| cross::<DuffySystem>(pair.father, pair.mother));
        if let Some(dist) = &duffy {
            dist.check_invariants(BloodGroupSystem::Duffy)?;
        }

        let evaluator = RiskEvaluator::new();
        let mut risks =
            evaluator.evaluate(parents.abo_rh.father, parents.abo_rh.mother, &abo_rh);
        if let (Some(pair), Some(dist)) = (parents.kell, &kell) {
            risks.extend(evaluator.evaluate_kell(pair.father, pair.mother, dist));
        }
        if let Some(dist) = &duffy {
            risks.extend(evaluator.evaluate_duffy(dist));
        }

        let compatibility = CompatibilityChecker::new().entries_for(&abo_rh);

        Ok(AnalysisResults {
            parents: *parents,
            abo_rh,
            kell,
            mn,
            duffy,
            compatibility,
            risks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abo_rh(label: &str) -> AboRh {
        label.parse().unwrap()
    }

    #[test]
    fn universal_donor_and_recipient() {
        let checker = CompatibilityChecker::new();
        assert!(checker.can_donate(abo_rh("O-"), abo_rh("AB+")));
        assert!(!checker.can_donate(abo_rh("A+"), abo_rh("O-")));

        // O- can give to everyone, AB+ can receive from everyone
        for recipient in AboRh::ALL {
            assert!(checker.can_donate(abo_rh("O-"), recipient));
        }
        for donor in AboRh::ALL {
            assert!(checker.can_donate(donor, abo_rh("AB+")));
        }
    }

    #[test]
    fn rh_mismatch_blocks_donation() {
        let checker = CompatibilityChecker::new();
        assert!(!checker.can_donate(abo_rh("O+"), abo_rh("O-")));
        assert!(checker.can_donate(abo_rh("O-"), abo_rh("O+")));
    }

    #[test]
    fn rh_risk_fires_only_for_rh_negative_mothers() {
        let evaluator = RiskEvaluator::new();

        let father = abo_rh("A+");
        let mother = abo_rh("O-");
        let offspring = cross::<AboRhSystem>(father, mother);
        let risks = evaluator.evaluate(father, mother, &offspring);
        assert!(risks.contains(&RiskKind::RhIncompatibility));
        assert!(risks.contains(&RiskKind::AboHemolyticDisease));

        let father = abo_rh("O+");
        let mother = abo_rh("A+");
        let offspring = cross::<AboRhSystem>(father, mother);
        let risks = evaluator.evaluate(father, mother, &offspring);
        assert!(risks.is_empty());
    }

    #[test]
    fn rh_rule_precedes_abo_rule() {
        let evaluator = RiskEvaluator::new();
        let father = abo_rh("AB+");
        let mother = abo_rh("O-");
        let offspring = cross::<AboRhSystem>(father, mother);
        let risks = evaluator.evaluate(father, mother, &offspring);
        assert_eq!(
            risks,
            vec![RiskKind::RhIncompatibility, RiskKind::AboHemolyticDisease]
        );
    }

    #[test]
    fn kell_risk_needs_negative_mother_and_positive_father() {
        let evaluator = RiskEvaluator::new();

        let offspring = cross::<KellSystem>(KellPhenotype::Positive, KellPhenotype::Negative);
        assert_eq!(
            evaluator.evaluate_kell(
                KellPhenotype::Positive,
                KellPhenotype::Negative,
                &offspring
            ),
            Some(RiskKind::KellIncompatibility)
        );

        // swapped parents: mother carries the antigen herself
        let offspring = cross::<KellSystem>(KellPhenotype::Negative, KellPhenotype::Positive);
        assert_eq!(
            evaluator.evaluate_kell(
                KellPhenotype::Negative,
                KellPhenotype::Positive,
                &offspring
            ),
            None
        );
    }

    #[test]
    fn duffy_note_is_informational_and_distribution_driven() {
        let evaluator = RiskEvaluator::new();

        let offspring =
            cross::<DuffySystem>(DuffyPhenotype::FyAPosBNeg, DuffyPhenotype::FyANegBPos);
        assert_eq!(
            evaluator.evaluate_duffy(&offspring),
            Some(RiskKind::DuffyMalariaProtection)
        );

        let offspring =
            cross::<DuffySystem>(DuffyPhenotype::FyAPosBPos, DuffyPhenotype::FyAPosBPos);
        assert_eq!(evaluator.evaluate_duffy(&offspring), None);
    }

    #[test]
    fn analyzer_collects_risks_in_rule_order() {
        let mut parents = ParentPhenotypes::new(abo_rh("A+"), abo_rh("O-"));
        parents.kell = Some(ParentPair::new(
            KellPhenotype::Positive,
            KellPhenotype::Negative,
        ));
        parents.duffy = Some(ParentPair::new(
            DuffyPhenotype::FyAPosBNeg,
            DuffyPhenotype::FyANegBPos,
        ));

        let results = BloodGroupAnalyzer::new().analyze(&parents).unwrap();
        assert_eq!(
            results.risks,
            vec![
                RiskKind::RhIncompatibility,
                RiskKind::AboHemolyticDisease,
                RiskKind::KellIncompatibility,
                RiskKind::DuffyMalariaProtection,
            ]
        );

        // every possible baby type has a compatibility entry
        assert_eq!(
            results.compatibility.len(),
            results.abo_rh.outcomes().len()
        );
    }
}
