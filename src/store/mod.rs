//! Backing stores for the grant, subsidy, and consultant catalogues and saved profiles.

mod csv_import;
mod local;
mod remote;
mod seed;

use std::future::Future;
use std::path::PathBuf;

use crate::config::DataSourceConfig;
use crate::matching::{BusinessProfile, Consultant, Grant, Subsidy, UserId};

pub use csv_import::{import_grants_csv, CatalogImportError, GrantCatalogImporter};
pub use local::{LocalSnapshot, LocalStore};
pub use remote::RemoteStore;
pub use seed::seed_snapshot;

/// Read access to the catalogues plus profile persistence.
///
/// Implementations return only listed records (active grants and subsidies, approved
/// consultants) but callers must not rely on it.
pub trait DataSource: Send + Sync {
    fn grants(&self) -> impl Future<Output = Result<Vec<Grant>, DataSourceError>> + Send;

    fn subsidies(&self) -> impl Future<Output = Result<Vec<Subsidy>, DataSourceError>> + Send;

    fn consultants(&self)
        -> impl Future<Output = Result<Vec<Consultant>, DataSourceError>> + Send;

    fn profile(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Option<BusinessProfile>, DataSourceError>> + Send;

    fn save_profile(
        &self,
        user_id: &UserId,
        profile: &BusinessProfile,
    ) -> impl Future<Output = Result<(), DataSourceError>> + Send;
}

/// Error enumeration for data source failures.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("HTTP request to data source failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("data source returned status {status} for {table}")]
    UnexpectedStatus { status: u16, table: String },
    #[error("could not decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("local store {path:?} unavailable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid data source url '{0}'")]
    InvalidUrl(String),
}

/// The data source chosen at startup.
#[derive(Debug, Clone)]
pub enum Store {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Store {
    pub async fn from_config(config: &DataSourceConfig) -> Result<Self, DataSourceError> {
        match config {
            DataSourceConfig::Local { path } => {
                let store = match path {
                    Some(path) => LocalStore::open(path.clone()).await?,
                    None => LocalStore::seeded(),
                };
                tracing::info!(source = "local", path = ?path, "data source ready");
                Ok(Self::Local(store))
            }
            DataSourceConfig::Remote { base_url, api_key } => {
                let store = RemoteStore::new(base_url, api_key)?;
                tracing::info!(source = "remote", base_url = %base_url, "data source ready");
                Ok(Self::Remote(store))
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Store::Local(_) => "local",
            Store::Remote(_) => "remote",
        }
    }
}

impl DataSource for Store {
    async fn grants(&self) -> Result<Vec<Grant>, DataSourceError> {
        match self {
            Store::Local(store) => store.grants().await,
            Store::Remote(store) => store.grants().await,
        }
    }

    async fn subsidies(&self) -> Result<Vec<Subsidy>, DataSourceError> {
        match self {
            Store::Local(store) => store.subsidies().await,
            Store::Remote(store) => store.subsidies().await,
        }
    }

    async fn consultants(&self) -> Result<Vec<Consultant>, DataSourceError> {
        match self {
            Store::Local(store) => store.consultants().await,
            Store::Remote(store) => store.consultants().await,
        }
    }

    async fn profile(&self, user_id: &UserId) -> Result<Option<BusinessProfile>, DataSourceError> {
        match self {
            Store::Local(store) => store.profile(user_id).await,
            Store::Remote(store) => store.profile(user_id).await,
        }
    }

    async fn save_profile(
        &self,
        user_id: &UserId,
        profile: &BusinessProfile,
    ) -> Result<(), DataSourceError> {
        match self {
            Store::Local(store) => store.save_profile(user_id, profile).await,
            Store::Remote(store) => store.save_profile(user_id, profile).await,
        }
    }
}
