//! Polarity estimation with a Hugging Face sentiment checkpoint.
//!
//! Loads the checkpoint eagerly through the candle backend. If download or
//! load fails the estimator reports itself unavailable instead of erroring,
//! and every call returns an error the classifier turns into a neutral score.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::estimator::candle_backend::{download_model, select_device, SequenceClassifier};
use crate::estimator::PolarityEstimator;
use crate::SentiscopeError;

pub const DEFAULT_MODEL_REPO: &str = "cardiffnlp/twitter-xlm-roberta-base-sentiment";

/// Configuration for model-backed estimation.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// HuggingFace repository holding config.json and weights (model.safetensors
    /// or pytorch_model.bin). tokenizer.json comes from the same repository when
    /// present, otherwise from the base XLM-RoBERTa repository.
    pub repo: String,
    /// Optional cache directory for model files.
    pub cache_dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            repo: DEFAULT_MODEL_REPO.to_string(),
            cache_dir: None,
        }
    }
}

/// Model-backed polarity estimator.
pub struct ModelPolarityEstimator {
    classifier: Option<Arc<SequenceClassifier>>,
    repo: String,
}

impl ModelPolarityEstimator {
    /// Download and load the checkpoint. Never fails; check [`is_available`].
    ///
    /// [`is_available`]: PolarityEstimator::is_available
    pub fn new(config: ModelConfig) -> Self {
        let files = match download_model(&config.repo, config.cache_dir.as_deref()) {
            Ok(files) => files,
            Err(e) => {
                warn!(
                    "Failed to download sentiment model {}: {:#}. Model estimation will be unavailable.",
                    config.repo, e
                );
                return Self::unavailable(config.repo);
            }
        };

        match SequenceClassifier::new(&files, select_device()) {
            Ok(classifier) => {
                info!(
                    "Sentiment model loaded ({}, labels {:?})",
                    config.repo,
                    classifier.labels()
                );
                Self {
                    classifier: Some(Arc::new(classifier)),
                    repo: config.repo,
                }
            }
            Err(e) => {
                warn!(
                    "Failed to load sentiment model {}: {:#}. Model estimation will be unavailable.",
                    config.repo, e
                );
                Self::unavailable(config.repo)
            }
        }
    }

    /// An estimator with no model loaded.
    pub fn unavailable(repo: impl Into<String>) -> Self {
        Self {
            classifier: None,
            repo: repo.into(),
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }
}

#[async_trait]
impl PolarityEstimator for ModelPolarityEstimator {
    async fn polarity(&self, text: &str) -> Result<f64, SentiscopeError> {
        if text.trim().is_empty() {
            return Ok(0.0);
        }

        let classifier = self
            .classifier
            .as_ref()
            .ok_or_else(|| {
                SentiscopeError::Estimator(format!("Sentiment model {} not loaded", self.repo))
            })?
            .clone();

        let text_owned = text.to_string();

        let scores = tokio::task::spawn_blocking(move || classifier.polarities(&[text_owned]))
            .await
            .map_err(|e| SentiscopeError::Estimator(format!("Task join error: {}", e)))?
            .map_err(|e| SentiscopeError::Estimator(format!("Model inference error: {:#}", e)))?;

        scores
            .into_iter()
            .next()
            .ok_or_else(|| SentiscopeError::Estimator("Empty inference result".to_string()))
    }

    fn is_available(&self) -> bool {
        self.classifier.is_some()
    }

    fn name(&self) -> &str {
        "model"
    }
}
