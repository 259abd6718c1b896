//! Application configuration.
//!
//! Loaded from `{data_path}/sentiscope.toml`, then the `SENTISCOPE_CONFIG` env
//! var (JSON), then defaults. A config that fails to parse is logged and
//! skipped; loading never fails.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::estimator::EstimatorProviderConfig;
use crate::services::BatchConfig;
use crate::translation::TranslatorProviderConfig;
use crate::SentiscopeError;

pub const CONFIG_FILE: &str = "sentiscope.toml";
pub const CONFIG_ENV: &str = "SENTISCOPE_CONFIG";
pub const DATA_PATH_ENV: &str = "SENTISCOPE_DATA_PATH";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub translator: TranslatorProviderConfig,
    #[serde(default)]
    pub estimator: EstimatorProviderConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl AppConfig {
    pub fn from_toml(contents: &str) -> Result<Self, SentiscopeError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json(contents: &str) -> Result<Self, SentiscopeError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Render as TOML, for `sentiscope config`.
    pub fn to_toml(&self) -> Result<String, SentiscopeError> {
        toml::to_string_pretty(self).map_err(|e| SentiscopeError::Config(e.to_string()))
    }
}

/// Load configuration for `data_path`, consulting `SENTISCOPE_CONFIG`.
pub fn load_config(data_path: &Path) -> AppConfig {
    let env = std::env::var(CONFIG_ENV).ok();
    load_config_with_env(data_path, env.as_deref())
}

/// [`load_config`] with the env value passed in.
pub fn load_config_with_env(data_path: &Path, env: Option<&str>) -> AppConfig {
    let config_path = data_path.join(CONFIG_FILE);
    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match AppConfig::from_toml(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    return config;
                }
                Err(e) => {
                    warn!(
                        "Failed to parse {}: {}. Trying next source.",
                        config_path.display(),
                        e
                    );
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read {}: {}. Trying next source.",
                    config_path.display(),
                    e
                );
            }
        }
    }

    if let Some(json) = env {
        match AppConfig::from_json(json) {
            Ok(config) => {
                info!("Loaded config from {} env", CONFIG_ENV);
                return config;
            }
            Err(e) => {
                warn!("Failed to parse {}: {}. Using defaults.", CONFIG_ENV, e);
            }
        }
    }

    AppConfig::default()
}

/// Data path priority: explicit path > `SENTISCOPE_DATA_PATH` > `./.sentiscope`
/// (if it exists) > `~/.sentiscope`.
pub fn resolve_data_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var(DATA_PATH_ENV).ok().map(PathBuf::from))
        .or_else(|| {
            let local_path = Path::new(".sentiscope");
            local_path.is_dir().then(|| local_path.to_path_buf())
        })
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".sentiscope"))
                .unwrap_or_else(|| PathBuf::from(".sentiscope"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config_with_env(dir.path(), None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.batch.concurrency, 4);
    }

    #[test]
    fn test_toml_file_wins_over_env() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[translator]\nprovider = \"none\"\n\n[batch]\nconcurrency = 8\n",
        )
        .expect("write");

        let config = load_config_with_env(dir.path(), Some(r#"{"batch":{"concurrency":2}}"#));
        assert_eq!(config.batch.concurrency, 8);
        assert!(matches!(
            config.translator,
            TranslatorProviderConfig::None { .. }
        ));
        assert_eq!(config.estimator, EstimatorProviderConfig::default());
    }

    #[test]
    fn test_env_json_used_without_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config_with_env(
            dir.path(),
            Some(r#"{"estimator":{"provider":"none"},"batch":{"concurrency":2}}"#),
        );
        assert_eq!(config.estimator, EstimatorProviderConfig::None);
        assert_eq!(config.batch.concurrency, 2);
    }

    #[test]
    fn test_broken_file_falls_through_to_env() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "[batch\nconcurrency = ").expect("write");
        let config = load_config_with_env(dir.path(), Some(r#"{"batch":{"concurrency":3}}"#));
        assert_eq!(config.batch.concurrency, 3);
    }

    #[test]
    fn test_broken_env_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config_with_env(dir.path(), Some("not json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_to_toml_reparses() {
        let config = AppConfig::default();
        let rendered = config.to_toml().expect("toml");
        assert_eq!(AppConfig::from_toml(&rendered).expect("parse"), config);
    }

    #[test]
    fn test_explicit_data_path_wins() {
        let path = resolve_data_path(Some(PathBuf::from("/tmp/custom")));
        assert_eq!(path, PathBuf::from("/tmp/custom"));
    }
}
