use super::super::domain::{EmployeeBand, MatchedSubsidy, Subsidy};
use super::super::profile::NormalizedProfile;
use super::super::regions::word_form;
use super::super::weights::MatchWeights;
use super::{contains_phrase, mentions, score_and_rank, ScoreCard};

/// Eligibility wording that opens a subsidy to every sector.
const OPEN_WORDING: &[&str] = &[
    "all businesses",
    "any business",
    "all sectors",
    "all industries",
    "any sector",
];

fn size_words(band: EmployeeBand) -> &'static [&'static str] {
    match band {
        EmployeeBand::Micro => &["micro", "small", "sme", "smes"],
        EmployeeBand::Small => &["small", "sme", "smes"],
        EmployeeBand::Medium => &["medium", "medium sized", "sme", "smes"],
        EmployeeBand::Large => &["large"],
    }
}

/// Scores one subsidy on sector, employee band, then location.
pub fn score_subsidy(
    subsidy: &Subsidy,
    profile: &NormalizedProfile,
    weights: &MatchWeights,
) -> MatchedSubsidy {
    let label = subsidy.subsidy_type.label();
    let text = word_form(&format!(
        "{} {} {}",
        subsidy.name, subsidy.description, subsidy.eligibility_text
    ));
    let mut card = ScoreCard::new(weights.baseline);

    if let Some(sector) = &profile.sector {
        if mentions(&text, sector) {
            card.award(
                weights.subsidy_sector,
                format!("{label} for {sector} businesses"),
            );
        } else if OPEN_WORDING
            .iter()
            .any(|phrase| contains_phrase(&text, phrase))
        {
            card.award(weights.open_sector, format!("{label} open to all businesses"));
        }
    }

    if let Some(band) = profile.employee_band {
        if size_words(band)
            .iter()
            .any(|word| contains_phrase(&text, word))
        {
            card.award(
                weights.subsidy_employee_band,
                format!("{label} sized for {} businesses", band.size_word()),
            );
        }
    }

    if let Some(locality) = &profile.location {
        if let Some(entry) = subsidy
            .location_scope
            .iter()
            .find(|entry| locality.covered_by(entry))
        {
            card.award(
                weights.subsidy_location,
                format!("Available in {}", entry.trim()),
            );
        }
    }

    card.into_matched(subsidy.clone(), weights)
}

/// Scores every subsidy and returns them best first.
///
/// `employee_band` overrides the band derived from the profile when supplied.
pub fn match_subsidies_to_profile(
    subsidies: &[Subsidy],
    profile: &NormalizedProfile,
    employee_band: Option<EmployeeBand>,
    weights: &MatchWeights,
) -> Vec<MatchedSubsidy> {
    let profile = profile.clone().with_employee_band(employee_band);
    score_and_rank(subsidies, |subsidy| score_subsidy(subsidy, &profile, weights))
}
