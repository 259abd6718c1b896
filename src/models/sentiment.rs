//! Sentiment labels and per-item classification results.

use serde::{Deserialize, Serialize};

use crate::utils::math::round_to;

/// Scores strictly above this are Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores strictly below this are Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Display order used by summaries and charts.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Map a polarity score onto a label.
    ///
    /// Both thresholds are strict, so `0.1` and `-0.1` are Neutral.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!(
                "unknown sentiment '{}'. Valid: positive, negative, neutral",
                other
            )),
        }
    }
}

/// Linear remap of a polarity score in [-1, 1] onto [0, 100], rounded to 2 decimals.
///
/// This is a display convenience, not a calibrated probability: a score of 0.0
/// (no opinion detected) maps to 50.0 rather than to "50% sure".
pub fn confidence_percentage(score: f64) -> f64 {
    round_to((score + 1.0) / 2.0 * 100.0, 2)
}

/// Where the polarity score of a result came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreSource {
    /// The polarity estimator produced the score.
    Estimator,
    /// An override rule fired and forced the result.
    Override { rule: String },
    /// The estimator failed; the score defaulted to 0.0.
    EstimatorFallback,
}

/// Outcome of classifying one piece of feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// Polarity in [-1, 1]. Fixed by the rule under an override.
    pub polarity_score: f64,
    /// See [`confidence_percentage`]. Fixed by the rule under an override.
    pub confidence_percentage: f64,
    /// Reference-language text, or the original input when translation fell back.
    pub translated_text: String,
    /// True when translation failed and `translated_text` is the original input.
    pub translation_fallback: bool,
    pub source: ScoreSource,
}

impl AnalysisResult {
    /// Build a result from an estimator score, deriving label and percentage.
    pub fn from_score(
        score: f64,
        translated_text: String,
        translation_fallback: bool,
        source: ScoreSource,
    ) -> Self {
        Self {
            sentiment: Sentiment::from_score(score),
            polarity_score: score,
            confidence_percentage: confidence_percentage(score),
            translated_text,
            translation_fallback,
            source,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self.source, ScoreSource::Override { .. })
    }
}
