use blood_inheritance::{
    compute_distribution, AboRh, BloodGroupAnalyzer, BloodGroupSystem, CompatibilityChecker,
    DuffyPhenotype, EngineError, KellPhenotype, Lang, MnPhenotype, ParentPair, ParentPhenotypes,
    RiskKind,
};

const TOLERANCE: f64 = 1e-9;

fn universe(system: BloodGroupSystem) -> Vec<String> {
    match system {
        BloodGroupSystem::Abo => ["A", "B", "AB", "O"].iter().map(|s| s.to_string()).collect(),
        BloodGroupSystem::Rh => ["+", "-"].iter().map(|s| s.to_string()).collect(),
        BloodGroupSystem::AboRh => AboRh::ALL.iter().map(|p| p.to_string()).collect(),
        BloodGroupSystem::Kell => KellPhenotype::ALL.iter().map(|p| p.to_string()).collect(),
        BloodGroupSystem::Mn => MnPhenotype::ALL.iter().map(|p| p.to_string()).collect(),
        BloodGroupSystem::Duffy => DuffyPhenotype::ALL.iter().map(|p| p.to_string()).collect(),
    }
}

const ALL_SYSTEMS: [BloodGroupSystem; 6] = [
    BloodGroupSystem::Abo,
    BloodGroupSystem::Rh,
    BloodGroupSystem::AboRh,
    BloodGroupSystem::Kell,
    BloodGroupSystem::Mn,
    BloodGroupSystem::Duffy,
];

#[test]
fn every_distribution_is_normalized() {
    for system in ALL_SYSTEMS {
        for father in universe(system) {
            for mother in universe(system) {
                let dist = compute_distribution(system, &father, &mother).unwrap();
                let sum: f64 = dist.outcomes().iter().map(|o| o.probability).sum();
                assert!(
                    (sum - 1.0).abs() < TOLERANCE,
                    "{} {} x {} sums to {}",
                    system,
                    father,
                    mother,
                    sum
                );
                for outcome in dist.outcomes() {
                    assert!(
                        outcome.probability > 0.0 && outcome.probability <= 1.0,
                        "{} {} x {} has out-of-range probability {}",
                        system,
                        father,
                        mother,
                        outcome.probability
                    );
                    assert!(outcome.count > 0);
                }
            }
        }
    }
}

#[test]
fn every_system_is_symmetric_in_the_parents() {
    for system in ALL_SYSTEMS {
        for father in universe(system) {
            for mother in universe(system) {
                let forward = compute_distribution(system, &father, &mother).unwrap();
                let swapped = compute_distribution(system, &mother, &father).unwrap();
                assert_eq!(forward, swapped, "{} {} x {}", system, father, mother);
            }
        }
    }
}

#[test]
fn identical_inputs_return_identical_distributions() {
    for _ in 0..3 {
        let first = compute_distribution(BloodGroupSystem::AboRh, "AB+", "O-").unwrap();
        let second = compute_distribution(BloodGroupSystem::AboRh, "AB+", "O-").unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn ab_cross_ab_multiplicities() {
    let dist = compute_distribution(BloodGroupSystem::Abo, "AB", "AB").unwrap();
    assert_eq!(dist.probability_of(&"A".to_string()), 0.25);
    assert_eq!(dist.probability_of(&"B".to_string()), 0.25);
    assert_eq!(dist.probability_of(&"AB".to_string()), 0.5);
    assert!(!dist.contains(&"O".to_string()));
}

#[test]
fn rh_positive_father_negative_mother_splits_evenly() {
    let dist = compute_distribution(BloodGroupSystem::Rh, "+", "-").unwrap();
    assert_eq!(dist.total_combinations(), 2);
    assert_eq!(dist.probability_of(&"+".to_string()), 0.5);
    assert_eq!(dist.probability_of(&"-".to_string()), 0.5);
}

#[test]
fn o_negative_parents_are_deterministic() {
    let dist = compute_distribution(BloodGroupSystem::AboRh, "O-", "O-").unwrap();
    assert_eq!(dist.outcomes().len(), 1);
    assert_eq!(dist.probability_of(&"O-".to_string()), 1.0);
}

#[test]
fn kell_cross_and_risk() {
    let dist = compute_distribution(BloodGroupSystem::Kell, "K+", "K-").unwrap();
    assert_eq!(dist.probability_of(&"K+".to_string()), 0.5);
    assert_eq!(dist.probability_of(&"K-".to_string()), 0.5);

    let mut parents = ParentPhenotypes::new("A+".parse().unwrap(), "A+".parse().unwrap());
    parents.kell = Some(ParentPair::new(
        KellPhenotype::Positive,
        KellPhenotype::Negative,
    ));
    let results = BloodGroupAnalyzer::new().analyze(&parents).unwrap();
    assert!(results.risks.contains(&RiskKind::KellIncompatibility));
}

#[test]
fn rh_risk_fires_for_negative_mothers_only() {
    let results = BloodGroupAnalyzer::new()
        .analyze(&ParentPhenotypes::new(
            "A+".parse().unwrap(),
            "O-".parse().unwrap(),
        ))
        .unwrap();
    assert!(results.risks.contains(&RiskKind::RhIncompatibility));
    assert!(results.risks.contains(&RiskKind::AboHemolyticDisease));

    let results = BloodGroupAnalyzer::new()
        .analyze(&ParentPhenotypes::new(
            "O+".parse().unwrap(),
            "A+".parse().unwrap(),
        ))
        .unwrap();
    assert!(results.risks.is_empty());
    assert!(results.findings(Lang::En).is_empty());
}

#[test]
fn donation_rules() {
    let checker = CompatibilityChecker::new();
    assert!(checker.can_donate("O-".parse().unwrap(), "AB+".parse().unwrap()));
    assert!(!checker.can_donate("A+".parse().unwrap(), "O-".parse().unwrap()));
}

#[test]
fn compatibility_report_covers_every_possible_baby_type() {
    let results = BloodGroupAnalyzer::new()
        .analyze(&ParentPhenotypes::new(
            "AB+".parse().unwrap(),
            "O-".parse().unwrap(),
        ))
        .unwrap();

    assert_eq!(
        results.compatibility.len(),
        results.abo_rh.outcomes().len()
    );
    for entry in &results.compatibility {
        assert!(!entry.can_receive_from.is_empty());
        assert!(!entry.can_donate_to.is_empty());
        // everyone can at least receive from O- and donate to AB+
        assert!(entry.can_receive_from.contains(&"O-".parse().unwrap()));
        assert!(entry.can_donate_to.contains(&"AB+".parse().unwrap()));
    }
}

#[test]
fn findings_are_localized() {
    let mut parents = ParentPhenotypes::new("A+".parse().unwrap(), "O-".parse().unwrap());
    parents.duffy = Some(ParentPair::new(
        DuffyPhenotype::FyAPosBNeg,
        DuffyPhenotype::FyANegBPos,
    ));
    let results = BloodGroupAnalyzer::new().analyze(&parents).unwrap();

    let english = results.findings(Lang::En);
    let bangla = results.findings(Lang::Bn);
    assert_eq!(english.len(), bangla.len());
    assert_eq!(english.len(), results.risks.len());
    assert_ne!(english[0].title, bangla[0].title);
}

#[test]
fn unknown_phenotypes_are_surfaced() {
    let err = compute_distribution(BloodGroupSystem::AboRh, "Z+", "O-").unwrap_err();
    assert!(matches!(
        err,
        EngineError::UnknownPhenotype {
            system: BloodGroupSystem::AboRh,
            ..
        }
    ));

    let err = compute_distribution(BloodGroupSystem::Duffy, "Fy(a+b-)", "Fy(c)").unwrap_err();
    assert!(matches!(err, EngineError::UnknownPhenotype { .. }));
}
