use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{DataSource, DataSourceError};
use crate::matching::{BusinessProfile, Consultant, ConsultantStatus, Grant, Subsidy, UserId};

const GRANTS_TABLE: &str = "grants";
const SUBSIDIES_TABLE: &str = "subsidies";
const CONSULTANTS_TABLE: &str = "consultants";
const PROFILES_TABLE: &str = "business_profiles";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a hosted table-query API (`/rest/v1/{table}` with `column=op.value` filters).
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, DataSourceError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DataSourceError::InvalidUrl(base_url));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("carbon-path/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.trim().to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, DataSourceError> {
        let mut query = vec![("select", "*".to_string())];
        query.extend(filters.iter().map(|(column, value)| (*column, value.clone())));

        let response = self
            .client
            .get(self.table_url(table))
            .query(&query)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let body = Self::checked(response, table)?.text().await?;
        let rows: Vec<T> =
            serde_json::from_str(&body).map_err(|source| DataSourceError::Decode {
                context: format!("{table} rows"),
                source,
            })?;

        tracing::debug!(table, rows = rows.len(), "fetched remote rows");
        Ok(rows)
    }

    fn checked(response: Response, table: &str) -> Result<Response, DataSourceError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::warn!(table, status = status.as_u16(), "remote store request rejected");
            Err(DataSourceError::UnexpectedStatus {
                status: status.as_u16(),
                table: table.to_string(),
            })
        }
    }
}

impl DataSource for RemoteStore {
    async fn grants(&self) -> Result<Vec<Grant>, DataSourceError> {
        self.select(GRANTS_TABLE, &[("is_active", "eq.true".to_string())])
            .await
    }

    async fn subsidies(&self) -> Result<Vec<Subsidy>, DataSourceError> {
        self.select(SUBSIDIES_TABLE, &[("is_active", "eq.true".to_string())])
            .await
    }

    async fn consultants(&self) -> Result<Vec<Consultant>, DataSourceError> {
        let consultants: Vec<Consultant> = self
            .select(CONSULTANTS_TABLE, &[("status", "eq.approved".to_string())])
            .await?;
        Ok(consultants
            .into_iter()
            .filter(|consultant| consultant.status == ConsultantStatus::Approved)
            .collect())
    }

    async fn profile(&self, user_id: &UserId) -> Result<Option<BusinessProfile>, DataSourceError> {
        let rows: Vec<BusinessProfile> = self
            .select(PROFILES_TABLE, &[("user_id", format!("eq.{}", user_id.0))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn save_profile(
        &self,
        user_id: &UserId,
        profile: &BusinessProfile,
    ) -> Result<(), DataSourceError> {
        let mut row = serde_json::to_value(profile).map_err(|source| DataSourceError::Decode {
            context: "business profile".to_string(),
            source,
        })?;
        if let Value::Object(fields) = &mut row {
            fields.insert("user_id".to_string(), Value::String(user_id.0.clone()));
        }

        let response = self
            .client
            .post(self.table_url(PROFILES_TABLE))
            .query(&[("on_conflict", "user_id")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(
                "Prefer",
                HeaderValue::from_static("resolution=merge-duplicates,return=minimal"),
            )
            .json(&row)
            .send()
            .await?;

        Self::checked(response, PROFILES_TABLE)?;
        tracing::debug!(user_id = %user_id.0, "saved remote profile");
        Ok(())
    }
}
