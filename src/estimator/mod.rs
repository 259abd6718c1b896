//! Polarity estimation for reference-language text.
//!
//! The [`PolarityEstimator`] trait abstracts the scoring backend. The default
//! [`LexiconEstimator`] averages word polarities from a built-in lexicon;
//! [`ModelPolarityEstimator`] runs a sentiment checkpoint through candle.

pub mod candle_backend;
pub mod lexicon;
pub mod model;
pub mod provider;

use async_trait::async_trait;

use crate::SentiscopeError;

pub use lexicon::LexiconEstimator;
pub use model::ModelPolarityEstimator;
pub use provider::{create_estimator, EstimatorProviderConfig};

/// Service trait for polarity scoring.
#[async_trait]
pub trait PolarityEstimator: Send + Sync {
    /// Polarity of `text` in [-1, 1]. Empty text should yield 0.0, not an error.
    async fn polarity(&self, text: &str) -> Result<f64, SentiscopeError>;

    /// Whether the backend is loaded and usable.
    fn is_available(&self) -> bool;

    /// Short backend name for logs and `config` output.
    fn name(&self) -> &str;
}

/// No-op estimator that always fails.
///
/// The classifier treats its errors as a neutral 0.0 score.
pub struct NoopEstimator;

impl Default for NoopEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl NoopEstimator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PolarityEstimator for NoopEstimator {
    async fn polarity(&self, _text: &str) -> Result<f64, SentiscopeError> {
        Err(SentiscopeError::Estimator(
            "Polarity estimator is not available (noop)".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "none"
    }
}
