use super::super::domain::{Grant, MatchedGrant};
use super::super::profile::NormalizedProfile;
use super::super::regions::word_form;
use super::super::weights::MatchWeights;
use super::{phrases_overlap, score_and_rank, ScoreCard};

/// Sector entries meaning the grant is not sector-restricted.
const OPEN_SECTORS: &[&str] = &[
    "all",
    "all sectors",
    "any",
    "any sector",
    "all industries",
    "cross sector",
];

/// What a grant has to cover for a stated barrier to count as addressed.
const BARRIER_HINTS: &[(&str, &[&str])] = &[
    (
        "cost",
        &["capital", "equipment", "installation", "investment", "funding"],
    ),
    (
        "funding",
        &["capital", "equipment", "installation", "investment", "funding"],
    ),
    (
        "finance",
        &["capital", "equipment", "installation", "investment", "funding"],
    ),
    (
        "budget",
        &["capital", "equipment", "installation", "investment", "funding"],
    ),
    ("knowledge", &["advice", "audit", "consultancy", "training"]),
    ("expertise", &["advice", "audit", "consultancy", "training"]),
    ("skills", &["training", "skills"]),
    ("time", &["consultancy", "advice", "support"]),
];

fn is_open_sector(entry: &str) -> bool {
    OPEN_SECTORS.contains(&word_form(entry).as_str())
}

fn grant_targets(grant: &Grant) -> Vec<&str> {
    std::iter::once(grant.grant_type.as_str())
        .chain(grant.whats_covered.iter().map(String::as_str))
        .filter(|target| !target.trim().is_empty())
        .collect()
}

fn barrier_addressed(tag: &str, targets: &[&str]) -> bool {
    if targets.iter().any(|target| phrases_overlap(tag, target)) {
        return true;
    }

    word_form(tag).split(' ').any(|word| {
        BARRIER_HINTS
            .iter()
            .filter(|(barrier, _)| *barrier == word)
            .flat_map(|(_, hints)| hints.iter())
            .any(|hint| targets.iter().any(|target| phrases_overlap(hint, target)))
    })
}

/// Scores one grant. Criteria are evaluated sector, location, interests, barriers, and
/// reasons keep that order.
pub fn score_grant(
    grant: &Grant,
    profile: &NormalizedProfile,
    weights: &MatchWeights,
) -> MatchedGrant {
    let mut card = ScoreCard::new(weights.baseline);

    if let Some(sector) = &profile.sector {
        let specific = grant
            .sectors
            .iter()
            .filter(|entry| !is_open_sector(entry))
            .find(|entry| phrases_overlap(sector, entry));

        if let Some(entry) = specific {
            card.award(
                weights.grant_sector,
                format!("Matches your {} sector", entry.trim()),
            );
        } else if grant.sectors.iter().any(|entry| is_open_sector(entry)) {
            card.award(weights.open_sector, "Open to all sectors");
        }
    }

    if let Some(locality) = &profile.location {
        if let Some(entry) = grant
            .location_scope
            .iter()
            .find(|entry| locality.covered_by(entry))
        {
            card.award(
                weights.grant_location,
                format!("Available in {}", entry.trim()),
            );
        }
    }

    let targets = grant_targets(grant);

    if let Some(tag) = profile
        .strong_interests(weights.interest_threshold)
        .find(|tag| targets.iter().any(|target| phrases_overlap(tag, target)))
    {
        card.award(
            weights.grant_interest,
            format!("Supports your interest in {tag}"),
        );
    }

    if let Some(tag) = profile
        .barrier_tags
        .iter()
        .find(|tag| barrier_addressed(tag, &targets))
    {
        card.award(weights.grant_barrier, format!("Helps with {tag}"));
    }

    card.into_matched(grant.clone(), weights)
}

/// Scores every grant against the profile and returns them best first.
///
/// `location` overrides the profile's own location when supplied.
pub fn match_grants_to_profile(
    grants: &[Grant],
    profile: &NormalizedProfile,
    location: Option<&str>,
    weights: &MatchWeights,
) -> Vec<MatchedGrant> {
    let profile = profile.clone().with_location(location);
    score_and_rank(grants, |grant| score_grant(grant, &profile, weights))
}
