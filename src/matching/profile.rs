use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::{AssessmentAnswers, BusinessProfile, EmployeeBand};
use super::regions::{word_form, UkRegion};
use super::scoring::contains_phrase;

/// Scope entries that cover every UK location.
const NATIONWIDE: &[&str] = &[
    "uk",
    "united kingdom",
    "nationwide",
    "national",
    "uk wide",
    "all regions",
    "all uk",
];

/// Collapses whitespace, strips zero-width characters, and lowercases.
pub(crate) fn normalize_text(value: &str) -> Option<String> {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.to_lowercase())
    }
}

/// Like [`normalize_text`] but folds `_` and `-` so `energy_efficiency` reads as prose.
pub(crate) fn normalize_tag(value: &str) -> Option<String> {
    normalize_text(&value.replace(['_', '-'], " "))
}

/// A resolved location: the caller's text plus the region it falls in, if known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locality {
    pub text: String,
    pub region: Option<UkRegion>,
}

impl Locality {
    pub fn parse(raw: &str) -> Option<Self> {
        let text = normalize_text(raw)?;
        let region = UkRegion::resolve(&text);
        Some(Self { text, region })
    }

    /// Whether a grant/subsidy scope entry or consultant region covers this locality.
    pub fn covered_by(&self, scope_entry: &str) -> bool {
        let entry = word_form(scope_entry);
        if entry.is_empty() {
            return false;
        }

        if NATIONWIDE.contains(&entry.as_str()) {
            return true;
        }

        if let Some(region) = self.region {
            if entry == word_form(region.nation()) {
                return true;
            }
            if UkRegion::resolve(&entry) == Some(region) {
                return true;
            }
        }

        let text = word_form(&self.text);
        contains_phrase(&entry, &text) || contains_phrase(&text, &entry)
    }
}

/// Canonical attribute bag every scorer reads from.
///
/// Every attribute is optional; an empty profile scores every record at baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedProfile {
    pub sector: Option<String>,
    pub employee_band: Option<EmployeeBand>,
    pub location: Option<Locality>,
    pub barrier_tags: BTreeSet<String>,
    pub interest_ratings: BTreeMap<String, u8>,
}

impl NormalizedProfile {
    pub fn from_business_profile(profile: Option<&BusinessProfile>) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };

        let mut normalized = Self::from_assessment(profile.assessment.as_ref());

        if let Some(sector) = profile.sector.as_deref().and_then(normalize_text) {
            normalized.sector = Some(sector);
        }
        if let Some(band) = profile.employee_count.as_deref().and_then(EmployeeBand::parse) {
            normalized.employee_band = Some(band);
        }

        // A free-text location wins over a postcode; a postcode still beats assessment data.
        let location = profile
            .location
            .as_deref()
            .and_then(Locality::parse)
            .or_else(|| profile.postcode.as_deref().and_then(Locality::parse));
        if location.is_some() {
            normalized.location = location;
        }

        normalized
    }

    pub fn from_assessment(answers: Option<&AssessmentAnswers>) -> Self {
        let Some(answers) = answers else {
            return Self::default();
        };

        let barrier_tags = answers
            .barriers
            .iter()
            .filter_map(|tag| normalize_tag(tag))
            .collect();

        let interest_ratings = answers
            .feature_interests
            .iter()
            .filter_map(|(tag, rating)| {
                let tag = normalize_tag(tag)?;
                let rating = u8::try_from(*rating).ok().filter(|r| (1..=5).contains(r))?;
                Some((tag, rating))
            })
            .collect();

        Self {
            sector: answers.sector.as_deref().and_then(normalize_text),
            employee_band: answers
                .employee_count
                .as_deref()
                .and_then(EmployeeBand::parse),
            location: answers.location.as_deref().and_then(Locality::parse),
            barrier_tags,
            interest_ratings,
        }
    }

    /// Replaces the location when an explicit override is supplied.
    pub fn with_location(mut self, location: Option<&str>) -> Self {
        if let Some(locality) = location.and_then(Locality::parse) {
            self.location = Some(locality);
        }
        self
    }

    pub fn with_employee_band(mut self, band: Option<EmployeeBand>) -> Self {
        if band.is_some() {
            self.employee_band = band;
        }
        self
    }

    /// Interest tags rated at or above `threshold`, in tag order.
    pub fn strong_interests(&self, threshold: u8) -> impl Iterator<Item = &str> {
        self.interest_ratings
            .iter()
            .filter(move |(_, rating)| **rating >= threshold)
            .map(|(tag, _)| tag.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.sector.is_none()
            && self.employee_band.is_none()
            && self.location.is_none()
            && self.barrier_tags.is_empty()
            && self.interest_ratings.is_empty()
    }
}

/// Where the caller's profile attributes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileInput {
    Profile(BusinessProfile),
    Assessment(AssessmentAnswers),
    Anonymous,
}

impl ProfileInput {
    /// Prefers a saved profile; standalone answers fill in a profile with no assessment.
    pub fn from_parts(
        profile: Option<BusinessProfile>,
        assessment: Option<AssessmentAnswers>,
    ) -> Self {
        match (profile, assessment) {
            (Some(mut profile), assessment) => {
                if profile.assessment.is_none() {
                    profile.assessment = assessment;
                }
                Self::Profile(profile)
            }
            (None, Some(answers)) => Self::Assessment(answers),
            (None, None) => Self::Anonymous,
        }
    }

    pub fn normalize(&self) -> NormalizedProfile {
        match self {
            ProfileInput::Profile(profile) => {
                NormalizedProfile::from_business_profile(Some(profile))
            }
            ProfileInput::Assessment(answers) => NormalizedProfile::from_assessment(Some(answers)),
            ProfileInput::Anonymous => NormalizedProfile::default(),
        }
    }

    pub fn assessment(&self) -> Option<&AssessmentAnswers> {
        match self {
            ProfileInput::Profile(profile) => profile.assessment.as_ref(),
            ProfileInput::Assessment(answers) => Some(answers),
            ProfileInput::Anonymous => None,
        }
    }
}
