use super::common::*;
use crate::matching::profile::Locality;
use crate::matching::scoring::{match_consultants_to_needs, score_consultant};
use crate::matching::MatchWeights;

fn energy_auditors() -> Vec<String> {
    vec!["Energy Auditors".to_string()]
}

#[test]
fn exact_specialty_outranks_unrelated_specialty() {
    let weights = MatchWeights::default();
    let auditor = consultant("c-energy", "Energy Auditors", "London", false);
    let waste = consultant("c-waste", "Waste Management Consultants", "London", false);

    let auditor_score = score_consultant(&auditor, &energy_auditors(), None, &weights);
    let waste_score = score_consultant(&waste, &energy_auditors(), None, &weights);

    assert_eq!(auditor_score.match_score, 80);
    assert_eq!(waste_score.match_score, 20);
    assert!(auditor_score.match_score > waste_score.match_score);
    assert_eq!(
        auditor_score.match_reasons,
        vec!["Specialises in Energy Auditors".to_string()]
    );
    assert!(waste_score.match_reasons.is_empty());
}

#[test]
fn ranks_exact_then_partial_and_adds_region() {
    let ranked = match_consultants_to_needs(
        &consultant_catalogue(),
        &energy_auditors(),
        Some("Derby"),
        &MatchWeights::default(),
    );

    assert_eq!(
        consultant_ids(&ranked),
        vec!["c-energy", "c-efficiency", "c-waste", "c-general"]
    );

    assert_eq!(ranked[0].match_score, 100);
    assert_eq!(
        ranked[0].match_reasons,
        vec![
            "Specialises in Energy Auditors".to_string(),
            "Covers East Midlands".to_string(),
        ]
    );

    // National consultants cover every locality.
    assert_eq!(ranked[1].match_score, 75);
    assert_eq!(
        ranked[1].match_reasons,
        vec![
            "Related to Energy Auditors".to_string(),
            "Covers UK".to_string(),
        ]
    );

    assert_eq!(ranked[2].match_score, 20);
    assert_eq!(ranked[3].match_score, 20);
}

#[test]
fn empty_recommendations_fall_back_to_default_pair() {
    let ranked = match_consultants_to_needs(
        &consultant_catalogue(),
        &[],
        None,
        &MatchWeights::default(),
    );

    let scores: Vec<(&str, u8)> = ranked
        .iter()
        .map(|entry| (entry.record.id.0.as_str(), entry.match_score))
        .collect();
    assert_eq!(
        scores,
        vec![
            ("c-energy", 80),
            ("c-general", 80),
            ("c-efficiency", 55),
            ("c-waste", 20),
        ]
    );
}

#[test]
fn shared_consultants_suffix_is_not_a_related_specialty() {
    let weights = MatchWeights::default();
    let recommended = vec!["Sustainability Consultants".to_string()];

    for specialty in ["IT Consultants", "Fleet Consultants", "Waste Management Consultants"] {
        let scored = score_consultant(
            &consultant("c-other", specialty, "", false),
            &recommended,
            None,
            &weights,
        );
        assert_eq!(scored.match_score, 20, "{specialty}");
        assert!(scored.match_reasons.is_empty(), "{specialty}");
    }
}

#[test]
fn verified_bonus_applies_only_when_weighted() {
    let auditor = consultant("c-energy", "Energy Auditors", "", true);
    let locality = Locality::parse("Leeds");

    let unweighted = score_consultant(
        &auditor,
        &energy_auditors(),
        locality.as_ref(),
        &MatchWeights::default(),
    );
    assert_eq!(unweighted.match_score, 80);
    assert!(!unweighted
        .match_reasons
        .contains(&"Verified consultant".to_string()));

    let weighted = score_consultant(
        &auditor,
        &energy_auditors(),
        locality.as_ref(),
        &MatchWeights {
            consultant_verified: 10,
            ..MatchWeights::default()
        },
    );
    assert_eq!(weighted.match_score, 90);
    assert_eq!(
        weighted.match_reasons.last().map(String::as_str),
        Some("Verified consultant")
    );
}

#[test]
fn consultant_scores_clamp_at_one_hundred() {
    let weights = MatchWeights {
        consultant_baseline: 50,
        consultant_verified: 50,
        ..MatchWeights::default()
    };

    let ranked = match_consultants_to_needs(
        &consultant_catalogue(),
        &energy_auditors(),
        Some("Derby"),
        &weights,
    );
    assert_eq!(ranked[0].match_score, 100);
    assert!(ranked.iter().all(|entry| entry.match_score <= 100));
}
