use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::seed::seed_snapshot;
use super::{DataSource, DataSourceError};
use crate::matching::{BusinessProfile, Consultant, ConsultantStatus, Grant, Subsidy, UserId};

/// On-disk layout of the local (demo/offline) store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSnapshot {
    pub grants: Vec<Grant>,
    pub subsidies: Vec<Subsidy>,
    pub consultants: Vec<Consultant>,
    /// Saved profiles keyed by user id.
    pub profiles: BTreeMap<String, BusinessProfile>,
}

impl LocalSnapshot {
    pub fn from_json(raw: &str, context: &Path) -> Result<Self, DataSourceError> {
        serde_json::from_str(raw).map_err(|source| DataSourceError::Decode {
            context: context.display().to_string(),
            source,
        })
    }

    pub fn to_json(&self) -> Result<String, DataSourceError> {
        serde_json::to_string_pretty(self).map_err(|source| DataSourceError::Decode {
            context: "local snapshot".to_string(),
            source,
        })
    }
}

/// JSON-file backed store. Without a path it serves the seed catalogue from memory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: Option<PathBuf>,
    snapshot: Arc<RwLock<LocalSnapshot>>,
}

impl LocalStore {
    pub fn new(snapshot: LocalSnapshot, path: Option<PathBuf>) -> Self {
        Self {
            path,
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_snapshot(), None)
    }

    /// Loads the snapshot at `path`. A missing file starts from the seed catalogue and
    /// is created on the first profile save.
    pub async fn open(path: PathBuf) -> Result<Self, DataSourceError> {
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                let snapshot = LocalSnapshot::from_json(&raw, &path)?;
                tracing::debug!(
                    path = %path.display(),
                    grants = snapshot.grants.len(),
                    subsidies = snapshot.subsidies.len(),
                    consultants = snapshot.consultants.len(),
                    "loaded local snapshot"
                );
                Ok(Self::new(snapshot, Some(path)))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    "local snapshot not found; serving seed catalogue"
                );
                Ok(Self::new(seed_snapshot(), Some(path)))
            }
            Err(source) => Err(DataSourceError::Io { path, source }),
        }
    }
}

impl DataSource for LocalStore {
    async fn grants(&self) -> Result<Vec<Grant>, DataSourceError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .grants
            .iter()
            .filter(|grant| grant.is_active)
            .cloned()
            .collect())
    }

    async fn subsidies(&self) -> Result<Vec<Subsidy>, DataSourceError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .subsidies
            .iter()
            .filter(|subsidy| subsidy.is_active)
            .cloned()
            .collect())
    }

    async fn consultants(&self) -> Result<Vec<Consultant>, DataSourceError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot
            .consultants
            .iter()
            .filter(|consultant| consultant.status == ConsultantStatus::Approved)
            .cloned()
            .collect())
    }

    async fn profile(&self, user_id: &UserId) -> Result<Option<BusinessProfile>, DataSourceError> {
        let snapshot = self.snapshot.read().await;
        Ok(snapshot.profiles.get(&user_id.0).cloned())
    }

    async fn save_profile(
        &self,
        user_id: &UserId,
        profile: &BusinessProfile,
    ) -> Result<(), DataSourceError> {
        let mut snapshot = self.snapshot.write().await;

        // Memory only changes once the file write has succeeded.
        if let Some(path) = &self.path {
            let mut updated = snapshot.clone();
            updated.profiles.insert(user_id.0.clone(), profile.clone());
            let raw = updated.to_json()?;
            tokio::fs::write(path, raw)
                .await
                .map_err(|source| DataSourceError::Io {
                    path: path.clone(),
                    source,
                })?;
        }

        snapshot.profiles.insert(user_id.0.clone(), profile.clone());
        Ok(())
    }
}
