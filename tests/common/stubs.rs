//! Deterministic collaborators for classifier and aggregator tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use sentiscope::estimator::PolarityEstimator;
use sentiscope::services::{ClassifierConfig, RuleSet, SentimentClassifier};
use sentiscope::translation::Translator;
use sentiscope::SentiscopeError;

/// Translates from a fixed table; unknown input fails.
pub struct ScriptedTranslator {
    table: HashMap<String, String>,
    calls: AtomicUsize,
}

impl ScriptedTranslator {
    pub fn new<const N: usize>(pairs: [(&str, &str); N]) -> Self {
        Self {
            table: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, SentiscopeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| SentiscopeError::Translation(format!("no entry for '{}'", text)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Always fails, as an unreachable service would.
pub struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, SentiscopeError> {
        Err(SentiscopeError::Translation("service unreachable".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Returns the same score for every input and counts calls.
pub struct FixedEstimator {
    score: f64,
    calls: AtomicUsize,
}

impl FixedEstimator {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PolarityEstimator for FixedEstimator {
    async fn polarity(&self, _text: &str) -> Result<f64, SentiscopeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.score)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Scores by exact text; unknown text scores 0.0.
pub struct MapEstimator {
    scores: HashMap<String, f64>,
}

impl MapEstimator {
    pub fn new<const N: usize>(pairs: [(&str, f64); N]) -> Self {
        Self {
            scores: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    pub fn with(mut self, text: &str, score: f64) -> Self {
        self.scores.insert(text.to_string(), score);
        self
    }
}

#[async_trait]
impl PolarityEstimator for MapEstimator {
    async fn polarity(&self, text: &str) -> Result<f64, SentiscopeError> {
        Ok(self.scores.get(text).copied().unwrap_or(0.0))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "map"
    }
}

/// Classifier with default rules and no translation timeout.
pub fn classifier_with(
    translator: Arc<dyn Translator>,
    estimator: Arc<dyn PolarityEstimator>,
) -> SentimentClassifier {
    SentimentClassifier::new(
        translator,
        estimator,
        RuleSet::default(),
        ClassifierConfig {
            target_language: "en".to_string(),
            translate_timeout: None,
        },
    )
}
