use super::domain::AssessmentAnswers;
use super::profile::normalize_tag;
use super::regions::word_form;
use super::scoring::contains_phrase;

/// Interest rating at which an assessment interest drives a recommendation.
const RECOMMEND_INTEREST_THRESHOLD: i64 = 4;

/// Keyword groups and the consultant specialty each one calls for.
const SPECIALTY_KEYWORDS: &[(&[&str], &str)] = &[
    (
        &["energy", "efficiency", "heating", "lighting", "insulation"],
        "Energy Auditors",
    ),
    (
        &["carbon", "emissions", "reporting", "net zero", "footprint"],
        "Carbon Accountants",
    ),
    (
        &["solar", "renewable", "renewables", "heat pump", "wind"],
        "Renewable Energy Installers",
    ),
    (
        &["waste", "recycling", "circular", "packaging"],
        "Waste Management Consultants",
    ),
    (
        &["certification", "iso", "iso 14001", "b corp", "accreditation"],
        "Sustainability Certification Advisors",
    ),
    (
        &["funding", "grant", "grants", "cost", "finance", "budget"],
        "Grant Writers",
    ),
    (
        &["knowledge", "strategy", "expertise", "time", "planning"],
        "Sustainability Consultants",
    ),
    (
        &["transport", "fleet", "ev", "electric vehicle", "logistics"],
        "Fleet Electrification Specialists",
    ),
];

fn specialties_for(tag: &str) -> impl Iterator<Item = &'static str> + '_ {
    let tag = word_form(tag);
    SPECIALTY_KEYWORDS
        .iter()
        .filter(move |(keywords, _)| keywords.iter().any(|keyword| contains_phrase(&tag, keyword)))
        .map(|(_, specialty)| *specialty)
}

/// Consultant specialties suggested by an assessment's barriers and strong interests.
///
/// Barriers are considered first (in answer order), then interests from highest rated.
/// The result is de-duplicated and may be empty; callers supply their own default.
pub fn recommended_consultant_types(answers: &AssessmentAnswers) -> Vec<String> {
    let mut interests: Vec<(&String, i64)> = answers
        .feature_interests
        .iter()
        .filter(|(_, rating)| (RECOMMEND_INTEREST_THRESHOLD..=5).contains(*rating))
        .map(|(tag, rating)| (tag, *rating))
        .collect();
    interests.sort_by(|left, right| right.1.cmp(&left.1));

    let tags = answers
        .barriers
        .iter()
        .chain(interests.into_iter().map(|(tag, _)| tag))
        .filter_map(|tag| normalize_tag(tag));

    let mut recommended: Vec<String> = Vec::new();
    for tag in tags {
        for specialty in specialties_for(&tag) {
            if !recommended.iter().any(|existing| existing == specialty) {
                recommended.push(specialty.to_string());
            }
        }
    }

    recommended
}
