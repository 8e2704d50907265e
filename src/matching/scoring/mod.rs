mod consultants;
mod grants;
mod ranking;
mod subsidies;

pub use consultants::{match_consultants_to_needs, score_consultant, DEFAULT_CONSULTANT_TYPES};
pub use grants::{match_grants_to_profile, score_grant};
pub use ranking::{rank_matches, score_and_rank, top_matches};
pub use subsidies::{match_subsidies_to_profile, score_subsidy};

use super::domain::Matched;
use super::regions::word_form;
use super::weights::MatchWeights;

/// Words too common to signal an overlap on their own.
const GENERIC_WORDS: &[&str] = &[
    "with",
    "your",
    "from",
    "business",
    "businesses",
    "consultant",
    "consultancy",
    "specialist",
    "advisor",
    "adviser",
    "services",
    "support",
    "scheme",
    "sector",
    "industry",
];

/// Running total plus the reasons that produced it.
pub(crate) struct ScoreCard {
    total: u16,
    reasons: Vec<String>,
}

impl ScoreCard {
    pub(crate) fn new(baseline: u8) -> Self {
        Self {
            total: u16::from(baseline),
            reasons: Vec::new(),
        }
    }

    /// Zero-weight criteria leave no reason so the baseline stays reason-free.
    pub(crate) fn award(&mut self, weight: u8, reason: impl Into<String>) {
        if weight == 0 {
            return;
        }
        self.total = self.total.saturating_add(u16::from(weight));
        self.reasons.push(reason.into());
    }

    pub(crate) fn score(&self) -> u8 {
        self.total.min(100) as u8
    }

    pub(crate) fn into_matched<T>(self, record: T, weights: &MatchWeights) -> Matched<T> {
        let match_score = self.score();
        Matched {
            record,
            match_score,
            match_reasons: self.reasons,
            good_match: weights.is_good_match(match_score),
        }
    }
}

/// Whole-word phrase containment over [`word_form`] text.
pub(crate) fn contains_phrase(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && format!(" {haystack} ").contains(&format!(" {needle} "))
}

fn stem(word: &str) -> &str {
    if word.len() > 4 && word.ends_with('s') && !word.ends_with("ss") {
        &word[..word.len() - 1]
    } else {
        word
    }
}

pub(crate) fn significant_words(text: &str) -> Vec<String> {
    word_form(text)
        .split(' ')
        .filter(|word| word.len() >= 4 && !GENERIC_WORDS.contains(word))
        .map(stem)
        .filter(|word| !GENERIC_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// True when `needle` appears in `haystack` as a phrase or shares a significant word with it.
pub(crate) fn mentions(haystack: &str, needle: &str) -> bool {
    let haystack = word_form(haystack);
    let needle_form = word_form(needle);
    if haystack.is_empty() || needle_form.is_empty() {
        return false;
    }
    if contains_phrase(&haystack, &needle_form) {
        return true;
    }

    let hay_words = significant_words(&haystack);
    significant_words(&needle_form)
        .iter()
        .any(|word| hay_words.contains(word))
}

/// Symmetric overlap between two short phrases such as tags, sectors, or specialties.
pub(crate) fn phrases_overlap(left: &str, right: &str) -> bool {
    mentions(left, right) || mentions(right, left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_card_clamps_and_tracks_reasons() {
        let mut card = ScoreCard::new(90);
        card.award(20, "sector");
        card.award(0, "ignored");
        assert_eq!(card.score(), 100);

        let matched = card.into_matched("record", &MatchWeights::default());
        assert_eq!(matched.match_reasons, vec!["sector".to_string()]);
        assert!(matched.good_match);
    }

    #[test]
    fn phrase_overlap_uses_whole_words() {
        assert!(phrases_overlap("manufacturing", "Food Manufacturing"));
        assert!(phrases_overlap("energy efficiency", "Energy-efficiency upgrades"));
        assert!(phrases_overlap("Energy Auditors", "energy auditor"));
        assert!(!phrases_overlap("art", "Smart meters"));
        assert!(!phrases_overlap("Waste Management Consultants", "Energy Auditors"));
        assert!(!phrases_overlap("", "anything"));
    }

    #[test]
    fn plural_generic_words_do_not_count_as_overlap() {
        assert!(!phrases_overlap("IT Consultants", "Sustainability Consultants"));
        assert!(!phrases_overlap("Fleet Specialists", "Energy Efficiency Specialists"));
        assert!(!phrases_overlap("Grant Advisors", "Carbon Advisors"));
        assert!(phrases_overlap("Energy Efficiency Specialists", "Energy Auditors"));
    }
}
