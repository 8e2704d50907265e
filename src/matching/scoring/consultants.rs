use super::super::domain::{Consultant, MatchedConsultant};
use super::super::profile::Locality;
use super::super::regions::word_form;
use super::super::weights::MatchWeights;
use super::{phrases_overlap, score_and_rank, ScoreCard};

/// Specialties used when an assessment yields no recommendation.
pub const DEFAULT_CONSULTANT_TYPES: [&str; 2] = ["Sustainability Consultants", "Energy Auditors"];

/// Scores one consultant against the recommended specialties and an optional locality.
///
/// Approval status is the caller's concern; it is not checked here.
pub fn score_consultant(
    consultant: &Consultant,
    specialties: &[String],
    location: Option<&Locality>,
    weights: &MatchWeights,
) -> MatchedConsultant {
    let mut card = ScoreCard::new(weights.consultant_baseline);
    let specialty = word_form(&consultant.specialty);

    if !specialty.is_empty() {
        if specialties.iter().any(|tag| word_form(tag) == specialty) {
            card.award(
                weights.consultant_exact_specialty,
                format!("Specialises in {}", consultant.specialty.trim()),
            );
        } else if let Some(tag) = specialties
            .iter()
            .find(|tag| phrases_overlap(tag, &consultant.specialty))
        {
            card.award(
                weights.consultant_partial_specialty,
                format!("Related to {}", tag.trim()),
            );
        }
    }

    if let Some(locality) = location {
        if locality.covered_by(&consultant.region) {
            card.award(
                weights.consultant_region,
                format!("Covers {}", consultant.region.trim()),
            );
        }
    }

    if consultant.verified {
        card.award(weights.consultant_verified, "Verified consultant");
    }

    card.into_matched(consultant.clone(), weights)
}

/// Scores every consultant and returns them best first.
///
/// An empty `specialties` list falls back to [`DEFAULT_CONSULTANT_TYPES`].
pub fn match_consultants_to_needs(
    consultants: &[Consultant],
    specialties: &[String],
    location: Option<&str>,
    weights: &MatchWeights,
) -> Vec<MatchedConsultant> {
    let defaults: Vec<String>;
    let specialties: &[String] = if specialties.is_empty() {
        defaults = DEFAULT_CONSULTANT_TYPES
            .iter()
            .map(|specialty| specialty.to_string())
            .collect();
        &defaults
    } else {
        specialties
    };

    let locality = location.and_then(Locality::parse);
    score_and_rank(consultants, |consultant| {
        score_consultant(consultant, specialties, locality.as_ref(), weights)
    })
}
