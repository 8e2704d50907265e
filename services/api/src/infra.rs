use carbon_path::config::AppConfig;
use carbon_path::error::AppError;
use carbon_path::matching::{MatchWeights, MatchingService};
use carbon_path::store::{LocalStore, Store};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::io;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SharedService = Arc<MatchingService<Store>>;

/// Opens the configured data source and wraps it in a matching service.
pub(crate) async fn build_service(config: &AppConfig) -> Result<SharedService, AppError> {
    let store = Store::from_config(&config.data_source).await?;
    Ok(Arc::new(MatchingService::new(
        Arc::new(store),
        config.weights.clone(),
    )))
}

/// Service over the built-in seed catalogue, independent of any environment settings.
pub(crate) fn seeded_service(weights: MatchWeights) -> SharedService {
    let store = Store::Local(LocalStore::seeded());
    Arc::new(MatchingService::new(Arc::new(store), weights))
}

pub(crate) fn read_json_file<T>(path: &Path) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| {
        AppError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("failed to parse {} as JSON ({err})", path.display()),
        ))
    })
}
