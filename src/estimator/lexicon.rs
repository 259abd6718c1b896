//! Lexicon-based polarity estimation.
//!
//! Scores text the way pattern-style analyzers do:
//! - each lexicon word contributes its polarity
//! - an intensifier directly before it ("very good") scales it
//! - a negation within the two preceding tokens ("not good", "not very good")
//!   flips it and halves it
//! - the document score is the mean of the contributing words
//!
//! Text with no lexicon words scores 0.0.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use crate::estimator::PolarityEstimator;
use crate::SentiscopeError;

/// Factor applied to a negated word's polarity.
const NEGATION_FACTOR: f64 = -0.5;

/// How many tokens a negation reaches forward.
const NEGATION_WINDOW: usize = 2;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "hardly", "barely", "dont", "didnt",
    "doesnt", "isnt", "wasnt", "cant", "wont",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.4),
    ("completely", 1.4),
    ("highly", 1.4),
    ("super", 1.4),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("fairly", 0.9),
    ("somewhat", 0.8),
    ("slightly", 0.6),
    ("bit", 0.7),
];

const DEFAULT_LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("satisfied", 0.5),
    ("helpful", 0.4),
    ("friendly", 0.4),
    ("fast", 0.2),
    ("quick", 0.33),
    ("easy", 0.43),
    ("clean", 0.37),
    ("beautiful", 0.85),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("recommend", 0.3),
    ("recommended", 0.3),
    ("impressive", 1.0),
    ("impressed", 0.6),
    ("outstanding", 0.5),
    ("superb", 1.0),
    ("brilliant", 0.9),
    ("pleasant", 0.73),
    ("comfortable", 0.4),
    ("reliable", 0.5),
    ("useful", 0.3),
    ("fine", 0.42),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("smooth", 0.4),
    ("fresh", 0.3),
    ("delicious", 1.0),
    ("polite", 0.3),
    ("affordable", 0.3),
    ("worth", 0.3),
    ("positive", 0.23),
    ("exceptional", 0.67),
    ("favorite", 0.5),
    // negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("disappointment", -0.6),
    ("hate", -0.8),
    ("hated", -0.9),
    ("angry", -0.5),
    ("sad", -0.5),
    ("unhappy", -0.6),
    ("slow", -0.3),
    ("rude", -0.6),
    ("dirty", -0.6),
    ("broken", -0.4),
    ("useless", -0.5),
    ("expensive", -0.5),
    ("overpriced", -0.5),
    ("difficult", -0.5),
    ("hard", -0.29),
    ("boring", -1.0),
    ("annoying", -0.8),
    ("wrong", -0.5),
    ("problem", -0.3),
    ("problems", -0.3),
    ("issue", -0.2),
    ("issues", -0.2),
    ("fail", -0.5),
    ("failed", -0.5),
    ("unacceptable", -0.8),
    ("unfriendly", -0.6),
    ("unhelpful", -0.5),
    ("cold", -0.6),
    ("late", -0.3),
    ("noisy", -0.4),
    ("ugly", -0.7),
    ("confusing", -0.4),
    ("waste", -0.5),
    ("cheap", -0.2),
    ("negative", -0.3),
    ("nasty", -1.0),
    ("pathetic", -1.0),
    ("mediocre", -0.3),
    ("complaint", -0.3),
];

/// Lexicon-based polarity estimator.
#[derive(Debug, Clone)]
pub struct LexiconEstimator {
    lexicon: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconEstimator {
    /// Estimator with the built-in English lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(
            DEFAULT_LEXICON
                .iter()
                .map(|(w, p)| (w.to_string(), *p))
                .collect(),
        )
    }

    /// Estimator with a custom word → polarity map. Values are clamped to [-1, 1].
    pub fn with_lexicon(lexicon: HashMap<String, f64>) -> Self {
        Self {
            lexicon: lexicon
                .into_iter()
                .map(|(w, p)| (w.to_lowercase(), p.clamp(-1.0, 1.0)))
                .collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(w, f)| (w.to_string(), *f))
                .collect(),
        }
    }

    /// Load a lexicon file and merge it over the built-in one.
    ///
    /// The file is a flat TOML (`.toml`) or JSON table of `word = polarity`.
    pub fn from_file(path: &Path) -> Result<Self, SentiscopeError> {
        let contents = std::fs::read_to_string(path)?;
        let extra: HashMap<String, f64> = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };

        let mut estimator = Self::new();
        for (word, polarity) in extra {
            estimator
                .lexicon
                .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        }
        Ok(estimator)
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    /// Synchronous scoring used by the async trait method.
    pub fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);

        let mut total = 0.0;
        let mut contributing = 0usize;
        let mut intensity = 1.0;
        // Tokens remaining in which a negation still applies.
        let mut negation_reach = 0usize;

        for token in &tokens {
            if is_negation(token) {
                negation_reach = NEGATION_WINDOW;
                intensity = 1.0;
                continue;
            }

            if let Some(factor) = self.intensifiers.get(token.as_str()) {
                intensity *= factor;
                negation_reach = negation_reach.saturating_sub(1);
                continue;
            }

            if let Some(polarity) = self.lexicon.get(token.as_str()) {
                let mut value = polarity * intensity;
                if negation_reach > 0 {
                    value *= NEGATION_FACTOR;
                }
                total += value.clamp(-1.0, 1.0);
                contributing += 1;
                negation_reach = 0;
            } else {
                negation_reach = negation_reach.saturating_sub(1);
            }
            intensity = 1.0;
        }

        if contributing == 0 {
            return 0.0;
        }
        (total / contributing as f64).clamp(-1.0, 1.0)
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

/// Lower-cased word tokens; apostrophes stay inside words ("didn't").
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\u{2019}', "'").to_lowercase())
        .map(|t| t.trim_matches('\'').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[async_trait]
impl PolarityEstimator for LexiconEstimator {
    async fn polarity(&self, text: &str) -> Result<f64, SentiscopeError> {
        Ok(self.score(text))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
