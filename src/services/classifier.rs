//! Single-item sentiment classification.
//!
//! Pipeline per item:
//! 1. translate to the reference language, keeping the original on any failure
//! 2. check override rules against the translated text
//! 3. otherwise score with the polarity estimator (failures score 0.0)
//! 4. derive label and confidence percentage from the score
//!
//! [`SentimentClassifier::classify`] never returns an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::estimator::PolarityEstimator;
use crate::models::{AnalysisResult, ScoreSource};
use crate::services::rules::RuleSet;
use crate::translation::{translate_or_fallback, Translator};

/// Classifier settings.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Reference language the estimator is tuned for.
    pub target_language: String,
    /// Per-call translation budget; `None` waits indefinitely.
    pub translate_timeout: Option<Duration>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
            translate_timeout: Some(Duration::from_secs(5)),
        }
    }
}

/// Applies override rules and the polarity estimator to feedback text.
pub struct SentimentClassifier {
    translator: Arc<dyn Translator>,
    estimator: Arc<dyn PolarityEstimator>,
    rules: RuleSet,
    config: ClassifierConfig,
}

impl SentimentClassifier {
    pub fn new(
        translator: Arc<dyn Translator>,
        estimator: Arc<dyn PolarityEstimator>,
        rules: RuleSet,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            translator,
            estimator,
            rules,
            config,
        }
    }

    /// Default rules and settings.
    pub fn with_defaults(
        translator: Arc<dyn Translator>,
        estimator: Arc<dyn PolarityEstimator>,
    ) -> Self {
        Self::new(
            translator,
            estimator,
            RuleSet::default(),
            ClassifierConfig::default(),
        )
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn translator_name(&self) -> &str {
        self.translator.name()
    }

    pub fn estimator_name(&self) -> &str {
        self.estimator.name()
    }

    /// Classify one piece of feedback.
    pub async fn classify(&self, text: &str) -> AnalysisResult {
        let outcome = translate_or_fallback(
            self.translator.as_ref(),
            text,
            &self.config.target_language,
            self.config.translate_timeout,
        )
        .await;
        let translation_fallback = outcome.is_fallback();
        let translated = outcome.into_text();

        if let Some(matched) = self.rules.evaluate(&translated) {
            debug!(
                rule = matched.rule.name,
                phrase = matched.phrase,
                "Override rule fired"
            );
            let forced = matched.rule.forced;
            return AnalysisResult {
                sentiment: forced.sentiment,
                polarity_score: forced.polarity_score,
                confidence_percentage: forced.confidence_percentage,
                translated_text: translated,
                translation_fallback,
                source: ScoreSource::Override {
                    rule: matched.rule.name.to_string(),
                },
            };
        }

        let (score, source) = match self.estimator.polarity(&translated).await {
            Ok(score) if score.is_finite() => (score.clamp(-1.0, 1.0), ScoreSource::Estimator),
            Ok(score) => {
                warn!(
                    estimator = self.estimator.name(),
                    "Estimator returned non-finite score {}, treating as neutral", score
                );
                (0.0, ScoreSource::EstimatorFallback)
            }
            Err(e) => {
                warn!(
                    estimator = self.estimator.name(),
                    "Polarity estimation failed, treating as neutral: {}", e
                );
                (0.0, ScoreSource::EstimatorFallback)
            }
        };

        AnalysisResult::from_score(score, translated, translation_fallback, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{LexiconEstimator, NoopEstimator};
    use crate::models::Sentiment;
    use crate::translation::NoopTranslator;

    fn offline(estimator: Arc<dyn PolarityEstimator>) -> SentimentClassifier {
        SentimentClassifier::new(
            Arc::new(NoopTranslator::new()),
            estimator,
            RuleSet::default(),
            ClassifierConfig {
                target_language: "en".to_string(),
                translate_timeout: None,
            },
        )
    }

    #[tokio::test]
    async fn test_override_bypasses_estimator() {
        let classifier = offline(Arc::new(NoopEstimator::new()));
        let result = classifier.classify("I don't like this product").await;
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.polarity_score, -0.7);
        assert_eq!(result.confidence_percentage, 15.0);
        assert!(result.is_override());
        assert!(result.translation_fallback);
        assert_eq!(result.translated_text, "I don't like this product");
    }

    #[tokio::test]
    async fn test_estimator_failure_is_neutral() {
        let classifier = offline(Arc::new(NoopEstimator::new()));
        let result = classifier.classify("wonderful").await;
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.polarity_score, 0.0);
        assert_eq!(result.confidence_percentage, 50.0);
        assert_eq!(result.source, ScoreSource::EstimatorFallback);
    }

    #[tokio::test]
    async fn test_lexicon_scoring_path() {
        let classifier = offline(Arc::new(LexiconEstimator::new()));
        let result = classifier.classify("The staff were terrible").await;
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.polarity_score, -1.0);
        assert_eq!(result.confidence_percentage, 0.0);
        assert_eq!(result.source, ScoreSource::Estimator);
    }

    #[tokio::test]
    async fn test_empty_text_still_classifies() {
        let classifier = offline(Arc::new(LexiconEstimator::new()));
        let result = classifier.classify("").await;
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.translated_text, "");
        assert!(result.translation_fallback);
    }

    #[test]
    fn test_names_are_exposed() {
        let classifier = offline(Arc::new(LexiconEstimator::new()));
        assert_eq!(classifier.translator_name(), "none");
        assert_eq!(classifier.estimator_name(), "lexicon");
        assert_eq!(classifier.rules().rules().len(), 1);
    }
}
