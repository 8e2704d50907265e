//! Profile-to-opportunity matching: normalises a business profile, scores grants,
//! subsidies, and consultants against it, and ranks the results for display.
//!
//! Scoring is synchronous and pure. Only [`MatchingService`] touches a data source.

pub mod domain;
pub mod profile;
pub mod recommend;
pub mod regions;
pub mod router;
pub mod scoring;
pub mod service;
mod weights;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentAnswers, BusinessProfile, Consultant, ConsultantStatus, EmployeeBand, Grant,
    Matched, MatchedConsultant, MatchedGrant, MatchedSubsidy, RecordId, Subsidy, SubsidyType,
    UserId,
};
pub use profile::{Locality, NormalizedProfile, ProfileInput};
pub use recommend::recommended_consultant_types;
pub use regions::UkRegion;
pub use router::matching_router;
pub use scoring::{
    match_consultants_to_needs, match_grants_to_profile, match_subsidies_to_profile,
    rank_matches, top_matches, DEFAULT_CONSULTANT_TYPES,
};
pub use service::{ConsultantMatches, Dashboard, MatchingService, MatchingServiceError};
pub use weights::MatchWeights;
