//! Estimator provider configuration and factory.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::estimator::model::{ModelConfig, DEFAULT_MODEL_REPO};
use crate::estimator::{LexiconEstimator, ModelPolarityEstimator, NoopEstimator, PolarityEstimator};
use crate::SentiscopeError;

/// Polarity estimator backend selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum EstimatorProviderConfig {
    /// Built-in lexicon (default), optionally extended from a file.
    Lexicon {
        #[serde(default)]
        lexicon_path: Option<PathBuf>,
    },
    /// HuggingFace sentiment checkpoint run locally.
    Model {
        #[serde(default = "default_model_repo")]
        repo: String,
        #[serde(default)]
        cache_dir: Option<PathBuf>,
    },
    /// No estimator; every non-overridden item scores 0.0.
    None,
}

fn default_model_repo() -> String {
    DEFAULT_MODEL_REPO.to_string()
}

impl Default for EstimatorProviderConfig {
    fn default() -> Self {
        Self::Lexicon { lexicon_path: None }
    }
}

impl EstimatorProviderConfig {
    /// Config for a provider chosen by name on the command line.
    pub fn from_name(name: &str) -> Result<Self, SentiscopeError> {
        match name.to_lowercase().as_str() {
            "lexicon" => Ok(Self::default()),
            "model" => Ok(Self::Model {
                repo: default_model_repo(),
                cache_dir: None,
            }),
            "none" => Ok(Self::None),
            other => Err(SentiscopeError::Config(format!(
                "Unknown estimator '{}'. Valid: lexicon, model, none",
                other
            ))),
        }
    }
}

/// Create a polarity estimator from provider configuration.
pub fn create_estimator(
    config: &EstimatorProviderConfig,
) -> Result<Arc<dyn PolarityEstimator>, SentiscopeError> {
    match config {
        EstimatorProviderConfig::Lexicon { lexicon_path } => {
            let estimator = match lexicon_path {
                Some(path) => {
                    let estimator = LexiconEstimator::from_file(path)?;
                    info!(
                        "Loaded lexicon from {} ({} words)",
                        path.display(),
                        estimator.len()
                    );
                    estimator
                }
                None => LexiconEstimator::new(),
            };
            Ok(Arc::new(estimator))
        }
        EstimatorProviderConfig::Model { repo, cache_dir } => {
            let estimator = ModelPolarityEstimator::new(ModelConfig {
                repo: repo.clone(),
                cache_dir: cache_dir.clone(),
            });
            Ok(Arc::new(estimator))
        }
        EstimatorProviderConfig::None => Ok(Arc::new(NoopEstimator::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_builtin_lexicon() {
        let estimator = create_estimator(&EstimatorProviderConfig::default()).expect("create");
        assert_eq!(estimator.name(), "lexicon");
        assert!(estimator.is_available());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            EstimatorProviderConfig::from_name("NONE").expect("none"),
            EstimatorProviderConfig::None
        );
        assert!(matches!(
            EstimatorProviderConfig::from_name("model").expect("model"),
            EstimatorProviderConfig::Model { .. }
        ));
        assert!(EstimatorProviderConfig::from_name("vader").is_err());
    }

    #[test]
    fn test_parse_model_provider_from_toml() {
        let config: EstimatorProviderConfig =
            toml::from_str("provider = \"model\"\nrepo = \"org/sentiment\"").expect("parse");
        assert_eq!(
            config,
            EstimatorProviderConfig::Model {
                repo: "org/sentiment".to_string(),
                cache_dir: None
            }
        );
    }

    #[test]
    fn test_missing_lexicon_file_is_an_error() {
        let config = EstimatorProviderConfig::Lexicon {
            lexicon_path: Some(PathBuf::from("/nonexistent/lexicon.toml")),
        };
        assert!(create_estimator(&config).is_err());
    }
}
