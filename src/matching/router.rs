use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AssessmentAnswers, BusinessProfile, EmployeeBand, UserId};
use super::profile::ProfileInput;
use super::recommend::recommended_consultant_types;
use super::scoring::DEFAULT_CONSULTANT_TYPES;
use super::service::{MatchingService, MatchingServiceError};
use crate::store::DataSource;

/// Dashboard list length when the caller does not ask for one.
const DEFAULT_DASHBOARD_TOP: usize = 3;

/// Profile attributes accepted by the match endpoints. Both parts are optional so
/// anonymous visitors still get a ranked list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GrantMatchRequest {
    pub profile: Option<BusinessProfile>,
    pub assessment: Option<AssessmentAnswers>,
    pub location: Option<String>,
    pub top: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubsidyMatchRequest {
    pub profile: Option<BusinessProfile>,
    pub assessment: Option<AssessmentAnswers>,
    pub employee_band: Option<String>,
    pub top: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConsultantMatchRequest {
    pub assessment: Option<AssessmentAnswers>,
    pub specialties: Option<Vec<String>>,
    pub location: Option<String>,
    pub top: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    pub top: Option<usize>,
}

/// Router builder exposing the matching endpoints.
pub fn matching_router<D>(service: Arc<MatchingService<D>>) -> Router
where
    D: DataSource + 'static,
{
    Router::new()
        .route("/api/v1/matches/grants", post(grants_handler::<D>))
        .route("/api/v1/matches/subsidies", post(subsidies_handler::<D>))
        .route("/api/v1/matches/consultants", post(consultants_handler::<D>))
        .route(
            "/api/v1/assessment/consultant-types",
            post(consultant_types_handler),
        )
        .route(
            "/api/v1/profiles/:user_id/dashboard",
            get(dashboard_handler::<D>),
        )
        .route("/api/v1/profiles/:user_id", put(save_profile_handler::<D>))
        .with_state(service)
}

pub(crate) async fn grants_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    axum::Json(request): axum::Json<GrantMatchRequest>,
) -> Response
where
    D: DataSource + 'static,
{
    let input = ProfileInput::from_parts(request.profile, request.assessment);
    match service
        .grants_for(&input, request.location.as_deref(), request.top)
        .await
    {
        Ok(matches) => (StatusCode::OK, axum::Json(matches)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn subsidies_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    axum::Json(request): axum::Json<SubsidyMatchRequest>,
) -> Response
where
    D: DataSource + 'static,
{
    let employee_band = match request.employee_band.as_deref() {
        Some(raw) => match EmployeeBand::parse(raw) {
            Some(band) => Some(band),
            None => {
                let payload = json!({
                    "error": format!("unrecognised employee band '{raw}'"),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
            }
        },
        None => None,
    };

    let input = ProfileInput::from_parts(request.profile, request.assessment);
    match service
        .subsidies_for(&input, employee_band, request.top)
        .await
    {
        Ok(matches) => (StatusCode::OK, axum::Json(matches)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn consultants_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    axum::Json(request): axum::Json<ConsultantMatchRequest>,
) -> Response
where
    D: DataSource + 'static,
{
    match service
        .consultants_for(
            request.assessment.as_ref(),
            request.specialties.as_deref(),
            request.location.as_deref(),
            request.top,
        )
        .await
    {
        Ok(matches) => (StatusCode::OK, axum::Json(matches)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn consultant_types_handler(
    axum::Json(answers): axum::Json<AssessmentAnswers>,
) -> Response {
    let recommended = recommended_consultant_types(&answers);
    let defaulted = recommended.is_empty();
    let recommended_types = if defaulted {
        DEFAULT_CONSULTANT_TYPES
            .iter()
            .map(|specialty| specialty.to_string())
            .collect()
    } else {
        recommended
    };

    let payload = json!({
        "recommended_types": recommended_types,
        "defaulted": defaulted,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn dashboard_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    Path(user_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    D: DataSource + 'static,
{
    let user_id = UserId(user_id);
    let top = query.top.unwrap_or(DEFAULT_DASHBOARD_TOP);
    match service.dashboard_for(&user_id, top).await {
        Ok(dashboard) => (StatusCode::OK, axum::Json(dashboard)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn save_profile_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    Path(user_id): Path<String>,
    axum::Json(profile): axum::Json<BusinessProfile>,
) -> Response
where
    D: DataSource + 'static,
{
    let user_id = UserId(user_id);
    match service.save_profile(&user_id, &profile).await {
        Ok(()) => {
            let payload = json!({
                "user_id": user_id.0,
                "saved": true,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: MatchingServiceError) -> Response {
    tracing::warn!(error = %error, "matching request failed");
    let status = match error {
        MatchingServiceError::Store(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
