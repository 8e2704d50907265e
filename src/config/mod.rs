use crate::matching::MatchWeights;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data_source: DataSourceConfig,
    pub weights: MatchWeights,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data_source = DataSourceConfig::from_env()?;
        let weights = match env::var("APP_MATCH_WEIGHTS") {
            Ok(path) if !path.trim().is_empty() => load_weights(PathBuf::from(path.trim()))?,
            _ => MatchWeights::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data_source,
            weights,
        })
    }
}

fn load_weights(path: PathBuf) -> Result<MatchWeights, ConfigError> {
    let raw = std::fs::read_to_string(&path).map_err(|err| ConfigError::InvalidWeights {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    let weights: MatchWeights =
        serde_json::from_str(&raw).map_err(|err| ConfigError::InvalidWeights {
            path: path.clone(),
            reason: err.to_string(),
        })?;
    weights
        .validate()
        .map_err(|reason| ConfigError::InvalidWeights { path, reason })?;
    Ok(weights)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which backing store feeds grants, subsidies, consultants, and profiles.
///
/// `Local` is the demo/offline mode: a JSON snapshot on disk, or the built-in seed
/// catalogue when no path is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceConfig {
    Local { path: Option<PathBuf> },
    Remote { base_url: String, api_key: String },
}

impl DataSourceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mode = env::var("APP_DATA_SOURCE").unwrap_or_else(|_| "local".to_string());

        match mode.trim().to_ascii_lowercase().as_str() {
            "local" | "demo" | "" => {
                let path = env::var("APP_LOCAL_STORE")
                    .ok()
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from);
                Ok(Self::Local { path })
            }
            "remote" => {
                let base_url = required_var("APP_REMOTE_URL")?;
                let api_key = required_var("APP_REMOTE_API_KEY")?;
                Ok(Self::Remote { base_url, api_key })
            }
            other => Err(ConfigError::InvalidDataSource(other.to_string())),
        }
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingSetting(name))
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDataSource(String),
    MissingSetting(&'static str),
    InvalidWeights { path: PathBuf, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDataSource(value) => write!(
                f,
                "APP_DATA_SOURCE must be 'local' or 'remote' (found '{}')",
                value
            ),
            ConfigError::MissingSetting(name) => {
                write!(f, "{} is required when APP_DATA_SOURCE=remote", name)
            }
            ConfigError::InvalidWeights { path, reason } => write!(
                f,
                "match weights at {} could not be loaded: {}",
                path.display(),
                reason
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidDataSource(_)
            | ConfigError::MissingSetting(_)
            | ConfigError::InvalidWeights { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_DATA_SOURCE",
            "APP_LOCAL_STORE",
            "APP_REMOTE_URL",
            "APP_REMOTE_API_KEY",
            "APP_MATCH_WEIGHTS",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.data_source, DataSourceConfig::Local { path: None });
        assert_eq!(config.weights, MatchWeights::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn remote_mode_requires_url_and_key() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DATA_SOURCE", "remote");
        env::set_var("APP_REMOTE_URL", "https://db.example.test");

        match AppConfig::load() {
            Err(ConfigError::MissingSetting(name)) => assert_eq!(name, "APP_REMOTE_API_KEY"),
            other => panic!("expected missing api key, got {other:?}"),
        }

        env::set_var("APP_REMOTE_API_KEY", "anon-key");
        let config = AppConfig::load().expect("remote config loads");
        assert_eq!(
            config.data_source,
            DataSourceConfig::Remote {
                base_url: "https://db.example.test".to_string(),
                api_key: "anon-key".to_string(),
            }
        );
        reset_env();
    }

    #[test]
    fn rejects_unknown_data_source() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DATA_SOURCE", "cassandra");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidDataSource(value)) if value == "cassandra"
        ));
        reset_env();
    }

    #[test]
    fn weights_file_overrides_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let path = env::temp_dir().join(format!("carbon-path-weights-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "baseline": 40, "grant_sector": 30 }"#).expect("write weights");
        env::set_var("APP_MATCH_WEIGHTS", &path);

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.weights.baseline, 40);
        assert_eq!(config.weights.grant_sector, 30);
        assert_eq!(
            config.weights.grant_location,
            MatchWeights::default().grant_location
        );

        std::fs::remove_file(&path).ok();
        reset_env();
    }

    #[test]
    fn weights_with_saturated_baseline_are_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("weights.json");
        std::fs::write(&path, r#"{ "baseline": 100 }"#).expect("write weights");

        match load_weights(path.clone()) {
            Err(ConfigError::InvalidWeights { reason, .. }) => {
                assert!(reason.contains("baseline"))
            }
            other => panic!("expected invalid weights, got {other:?}"),
        }

        std::fs::write(&path, r#"{ "consultant_baseline": 99 }"#).expect("write weights");
        let weights = load_weights(path).expect("headroom left");
        assert_eq!(weights.consultant_baseline, 99);
    }
}
