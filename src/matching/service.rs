use std::sync::Arc;

use serde::Serialize;

use super::domain::{
    AssessmentAnswers, BusinessProfile, ConsultantStatus, EmployeeBand, Matched, MatchedConsultant,
    MatchedGrant, MatchedSubsidy, UserId,
};
use super::profile::ProfileInput;
use super::recommend::recommended_consultant_types;
use super::scoring::{
    match_consultants_to_needs, match_grants_to_profile, match_subsidies_to_profile,
    top_matches, DEFAULT_CONSULTANT_TYPES,
};
use super::weights::MatchWeights;
use crate::store::{DataSource, DataSourceError};

/// Consultant results together with the specialties they were scored against.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultantMatches {
    pub recommended_types: Vec<String>,
    pub consultants: Vec<MatchedConsultant>,
}

/// Everything the account dashboard shows for a saved profile.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user_id: UserId,
    pub profile_found: bool,
    pub grants: Vec<MatchedGrant>,
    pub subsidies: Vec<MatchedSubsidy>,
    pub recommended_consultant_types: Vec<String>,
    pub consultants: Vec<MatchedConsultant>,
}

/// Service composing a data source with the match weights.
pub struct MatchingService<D> {
    source: Arc<D>,
    weights: Arc<MatchWeights>,
}

impl<D> MatchingService<D>
where
    D: DataSource + 'static,
{
    pub fn new(source: Arc<D>, weights: MatchWeights) -> Self {
        Self {
            source,
            weights: Arc::new(weights),
        }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// Active grants ranked against the caller's profile.
    pub async fn grants_for(
        &self,
        input: &ProfileInput,
        location: Option<&str>,
        top: Option<usize>,
    ) -> Result<Vec<MatchedGrant>, MatchingServiceError> {
        let mut grants = self.source.grants().await?;
        grants.retain(|grant| grant.is_active);

        let profile = input.normalize();
        let ranked = match_grants_to_profile(&grants, &profile, location, &self.weights);
        tracing::debug!(
            candidates = grants.len(),
            anonymous = profile.is_empty(),
            "ranked grants"
        );
        Ok(limit(ranked, top))
    }

    /// Active subsidies ranked against the caller's profile.
    pub async fn subsidies_for(
        &self,
        input: &ProfileInput,
        employee_band: Option<EmployeeBand>,
        top: Option<usize>,
    ) -> Result<Vec<MatchedSubsidy>, MatchingServiceError> {
        let mut subsidies = self.source.subsidies().await?;
        subsidies.retain(|subsidy| subsidy.is_active);

        let profile = input.normalize();
        let ranked =
            match_subsidies_to_profile(&subsidies, &profile, employee_band, &self.weights);
        tracing::debug!(
            candidates = subsidies.len(),
            anonymous = profile.is_empty(),
            "ranked subsidies"
        );
        Ok(limit(ranked, top))
    }

    /// Approved consultants ranked against explicit specialties, or those recommended by
    /// the assessment answers, or the default pair when neither yields any.
    pub async fn consultants_for(
        &self,
        answers: Option<&AssessmentAnswers>,
        specialties: Option<&[String]>,
        location: Option<&str>,
        top: Option<usize>,
    ) -> Result<ConsultantMatches, MatchingServiceError> {
        let mut consultants = self.source.consultants().await?;
        consultants.retain(|consultant| consultant.status == ConsultantStatus::Approved);

        let mut recommended_types: Vec<String> = match specialties {
            Some(specialties) => specialties
                .iter()
                .map(|specialty| specialty.trim().to_string())
                .filter(|specialty| !specialty.is_empty())
                .collect(),
            None => Vec::new(),
        };
        if recommended_types.is_empty() {
            recommended_types = answers
                .map(recommended_consultant_types)
                .unwrap_or_default();
        }
        if recommended_types.is_empty() {
            recommended_types = DEFAULT_CONSULTANT_TYPES
                .iter()
                .map(|specialty| specialty.to_string())
                .collect();
        }

        let location =
            location.or_else(|| answers.and_then(|answers| answers.location.as_deref()));
        let ranked =
            match_consultants_to_needs(&consultants, &recommended_types, location, &self.weights);
        tracing::debug!(
            candidates = consultants.len(),
            specialties = recommended_types.len(),
            "ranked consultants"
        );

        Ok(ConsultantMatches {
            recommended_types,
            consultants: limit(ranked, top),
        })
    }

    /// Top grants, subsidies, and consultants for a saved profile.
    ///
    /// A user without a saved profile is matched anonymously.
    pub async fn dashboard_for(
        &self,
        user_id: &UserId,
        top: usize,
    ) -> Result<Dashboard, MatchingServiceError> {
        let saved = self.source.profile(user_id).await?;
        if saved.is_none() {
            tracing::warn!(user_id = %user_id.0, "no saved profile; matching anonymously");
        }
        let profile_found = saved.is_some();
        let input = ProfileInput::from_parts(saved, None);

        let grants = self.grants_for(&input, None, Some(top)).await?;
        let subsidies = self.subsidies_for(&input, None, Some(top)).await?;

        let location = input.normalize().location.map(|locality| locality.text);
        let consultants = self
            .consultants_for(input.assessment(), None, location.as_deref(), Some(top))
            .await?;

        Ok(Dashboard {
            user_id: user_id.clone(),
            profile_found,
            grants,
            subsidies,
            recommended_consultant_types: consultants.recommended_types,
            consultants: consultants.consultants,
        })
    }

    pub async fn save_profile(
        &self,
        user_id: &UserId,
        profile: &BusinessProfile,
    ) -> Result<(), MatchingServiceError> {
        self.source.save_profile(user_id, profile).await?;
        tracing::info!(user_id = %user_id.0, "saved business profile");
        Ok(())
    }
}

fn limit<T>(ranked: Vec<Matched<T>>, top: Option<usize>) -> Vec<Matched<T>> {
    match top {
        Some(count) => top_matches(ranked, count),
        None => ranked,
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    Store(#[from] DataSourceError),
}
