use serde::{Deserialize, Serialize};

/// Tunable scoring weights. Every scorer clamps its total to `0..=100`.
///
/// Missing fields in a weights file fall back to the defaults below. Both baselines must
/// stay below 100; see [`MatchWeights::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub baseline: u8,
    pub grant_sector: u8,
    pub open_sector: u8,
    pub grant_location: u8,
    pub grant_interest: u8,
    pub grant_barrier: u8,
    pub subsidy_sector: u8,
    pub subsidy_employee_band: u8,
    pub subsidy_location: u8,
    pub consultant_baseline: u8,
    pub consultant_exact_specialty: u8,
    pub consultant_partial_specialty: u8,
    pub consultant_region: u8,
    pub consultant_verified: u8,
    /// Minimum 1-5 rating for an interest to count toward a grant match.
    pub interest_threshold: u8,
    /// Score at which the UI flags a result as a good match.
    pub good_match_threshold: u8,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            baseline: 50,
            grant_sector: 20,
            open_sector: 5,
            grant_location: 15,
            grant_interest: 10,
            grant_barrier: 10,
            subsidy_sector: 20,
            subsidy_employee_band: 15,
            subsidy_location: 15,
            consultant_baseline: 20,
            consultant_exact_specialty: 60,
            consultant_partial_specialty: 35,
            consultant_region: 20,
            consultant_verified: 0,
            interest_threshold: 4,
            good_match_threshold: 60,
        }
    }
}

impl MatchWeights {
    pub fn is_good_match(&self, score: u8) -> bool {
        score >= self.good_match_threshold
    }

    /// Baselines must leave headroom below 100, otherwise a fired criterion would add a
    /// reason without raising the clamped score.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("baseline", self.baseline),
            ("consultant_baseline", self.consultant_baseline),
        ] {
            if value >= 100 {
                return Err(format!("{name} must be below 100 (found {value})"));
            }
        }
        Ok(())
    }
}
