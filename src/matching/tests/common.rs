use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{
    AssessmentAnswers, BusinessProfile, Consultant, ConsultantStatus, Grant, MatchedConsultant,
    MatchedGrant, MatchedSubsidy, RecordId, Subsidy, SubsidyType, UserId,
};
use crate::matching::profile::NormalizedProfile;
use crate::matching::{MatchWeights, MatchingService};
use crate::store::{DataSource, DataSourceError};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn grant(
    id: &str,
    sectors: &[&str],
    scope: &[&str],
    grant_type: &str,
    covers: &[&str],
) -> Grant {
    Grant {
        id: RecordId(id.to_string()),
        name: format!("Grant {id}"),
        sectors: strings(sectors),
        location_scope: strings(scope),
        grant_type: grant_type.to_string(),
        whats_covered: strings(covers),
        is_active: true,
        ..Grant::default()
    }
}

/// Four grants a manufacturer in Derby should see in this order.
pub(super) fn grant_catalogue() -> Vec<Grant> {
    vec![
        grant(
            "g-hospitality",
            &["Hospitality"],
            &["London"],
            "Capital grant",
            &["Kitchen equipment"],
        ),
        grant("g-blank", &[], &[], "", &[]),
        grant(
            "g-manufacturing",
            &["Manufacturing"],
            &["East Midlands"],
            "Capital grant",
            &["Energy efficiency equipment"],
        ),
        grant(
            "g-open",
            &["All sectors"],
            &["UK"],
            "Match funding",
            &["Solar panels"],
        ),
    ]
}

pub(super) fn subsidy(
    id: &str,
    subsidy_type: SubsidyType,
    scope: &[&str],
    eligibility_text: &str,
) -> Subsidy {
    Subsidy {
        id: RecordId(id.to_string()),
        name: format!("Subsidy {id}"),
        subsidy_type,
        location_scope: strings(scope),
        eligibility_text: eligibility_text.to_string(),
        is_active: true,
        ..Subsidy::default()
    }
}

pub(super) fn subsidy_catalogue() -> Vec<Subsidy> {
    vec![
        subsidy(
            "s-large",
            SubsidyType::Rebate,
            &["England"],
            "Large manufacturing businesses in energy-intensive industries",
        ),
        subsidy(
            "s-tax",
            SubsidyType::TaxRelief,
            &["UK"],
            "Available to all businesses paying corporation tax",
        ),
        subsidy(
            "s-wales-loan",
            SubsidyType::Loan,
            &["Wales"],
            "Hospitality and manufacturing SMEs based in Wales",
        ),
    ]
}

pub(super) fn consultant(id: &str, specialty: &str, region: &str, verified: bool) -> Consultant {
    Consultant {
        id: RecordId(id.to_string()),
        name: format!("Consultant {id}"),
        specialty: specialty.to_string(),
        region: region.to_string(),
        verified,
        status: ConsultantStatus::Approved,
    }
}

pub(super) fn consultant_catalogue() -> Vec<Consultant> {
    vec![
        consultant("c-waste", "Waste Management Consultants", "London", false),
        consultant("c-efficiency", "Energy Efficiency Specialists", "UK", true),
        consultant("c-energy", "Energy Auditors", "East Midlands", true),
        consultant("c-general", "Sustainability Consultants", "Scotland", false),
    ]
}

pub(super) fn derby_manufacturer() -> NormalizedProfile {
    NormalizedProfile::from_business_profile(Some(&derby_business_profile()))
}

pub(super) fn derby_business_profile() -> BusinessProfile {
    let mut feature_interests = BTreeMap::new();
    feature_interests.insert("energy_efficiency".to_string(), 5);
    feature_interests.insert("solar".to_string(), 3);

    BusinessProfile {
        company_name: Some("Midlands Castings Ltd".to_string()),
        sector: Some("Manufacturing".to_string()),
        employee_count: Some("35".to_string()),
        location: Some("Derby".to_string()),
        postcode: Some("DE1 3AH".to_string()),
        assessment: Some(AssessmentAnswers {
            barriers: strings(&["upfront cost"]),
            feature_interests,
            ..AssessmentAnswers::default()
        }),
    }
}

pub(super) fn cardiff_cafe() -> NormalizedProfile {
    NormalizedProfile::from_business_profile(Some(&BusinessProfile {
        sector: Some("Hospitality".to_string()),
        employee_count: Some("12".to_string()),
        location: Some("Cardiff".to_string()),
        ..BusinessProfile::default()
    }))
}

pub(super) fn grant_ids(matches: &[MatchedGrant]) -> Vec<&str> {
    matches.iter().map(|entry| entry.record.id.0.as_str()).collect()
}

pub(super) fn subsidy_ids(matches: &[MatchedSubsidy]) -> Vec<&str> {
    matches.iter().map(|entry| entry.record.id.0.as_str()).collect()
}

pub(super) fn consultant_ids(matches: &[MatchedConsultant]) -> Vec<&str> {
    matches.iter().map(|entry| entry.record.id.0.as_str()).collect()
}

pub(super) fn build_service(
    store: MemoryStore,
) -> (MatchingService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let service = MatchingService::new(store.clone(), MatchWeights::default());
    (service, store)
}

/// In-memory data source that returns records exactly as seeded, unlisted ones included.
#[derive(Default)]
pub(super) struct MemoryStore {
    pub(super) grants: Vec<Grant>,
    pub(super) subsidies: Vec<Subsidy>,
    pub(super) consultants: Vec<Consultant>,
    pub(super) profiles: Mutex<HashMap<UserId, BusinessProfile>>,
}

impl MemoryStore {
    pub(super) fn catalogue() -> Self {
        Self {
            grants: grant_catalogue(),
            subsidies: subsidy_catalogue(),
            consultants: consultant_catalogue(),
            profiles: Mutex::new(HashMap::new()),
        }
    }
}

impl DataSource for MemoryStore {
    async fn grants(&self) -> Result<Vec<Grant>, DataSourceError> {
        Ok(self.grants.clone())
    }

    async fn subsidies(&self) -> Result<Vec<Subsidy>, DataSourceError> {
        Ok(self.subsidies.clone())
    }

    async fn consultants(&self) -> Result<Vec<Consultant>, DataSourceError> {
        Ok(self.consultants.clone())
    }

    async fn profile(&self, user_id: &UserId) -> Result<Option<BusinessProfile>, DataSourceError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    async fn save_profile(
        &self,
        user_id: &UserId,
        profile: &BusinessProfile,
    ) -> Result<(), DataSourceError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.insert(user_id.clone(), profile.clone());
        Ok(())
    }
}

/// Data source whose every call fails as an unreachable backend would.
pub(super) struct OfflineStore;

fn offline(table: &str) -> DataSourceError {
    DataSourceError::UnexpectedStatus {
        status: 503,
        table: table.to_string(),
    }
}

impl DataSource for OfflineStore {
    async fn grants(&self) -> Result<Vec<Grant>, DataSourceError> {
        Err(offline("grants"))
    }

    async fn subsidies(&self) -> Result<Vec<Subsidy>, DataSourceError> {
        Err(offline("subsidies"))
    }

    async fn consultants(&self) -> Result<Vec<Consultant>, DataSourceError> {
        Err(offline("consultants"))
    }

    async fn profile(&self, _user_id: &UserId) -> Result<Option<BusinessProfile>, DataSourceError> {
        Err(offline("business_profiles"))
    }

    async fn save_profile(
        &self,
        _user_id: &UserId,
        _profile: &BusinessProfile,
    ) -> Result<(), DataSourceError> {
        Err(offline("business_profiles"))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
