//! Override rules evaluated before the polarity estimator.
//!
//! A rule is a set of literal phrases plus the result it forces when any phrase
//! occurs in the (lower-cased, apostrophe-normalized) text. Rules are checked
//! in order and the first match wins.

use serde::Serialize;

use crate::models::Sentiment;

/// Result forced by an override rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForcedResult {
    pub sentiment: Sentiment,
    pub polarity_score: f64,
    pub confidence_percentage: f64,
}

/// A pattern-triggered bypass of the estimator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverrideRule {
    pub name: &'static str,
    /// Lower-case literal phrases; straight apostrophes only.
    pub phrases: &'static [&'static str],
    pub forced: ForcedResult,
}

impl OverrideRule {
    /// First phrase found in already-normalized text.
    fn matching_phrase(&self, normalized: &str) -> Option<&'static str> {
        self.phrases
            .iter()
            .copied()
            .find(|phrase| normalized.contains(phrase))
    }
}

/// Mild dislike phrasing that general-purpose estimators score as neutral or
/// positive. Kept to exactly these phrases; "do not like" and similar forms
/// are a known, undecided gap.
pub const NEGATION_OVERRIDE: OverrideRule = OverrideRule {
    name: "negated-like",
    phrases: &["don't like", "dont like", "didn't like"],
    forced: ForcedResult {
        sentiment: Sentiment::Negative,
        polarity_score: -0.7,
        confidence_percentage: 15.0,
    },
};

/// A rule match: which rule fired and on which phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<'a> {
    pub rule: &'a OverrideRule,
    pub phrase: &'static str,
}

/// Ordered override rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<OverrideRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(vec![NEGATION_OVERRIDE])
    }
}

impl RuleSet {
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }

    /// A rule set that never fires.
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    /// First rule with a phrase occurring in `text`, case- and apostrophe-insensitive.
    pub fn evaluate(&self, text: &str) -> Option<RuleMatch<'_>> {
        let normalized = normalize(text);
        self.rules.iter().find_map(|rule| {
            rule.matching_phrase(&normalized)
                .map(|phrase| RuleMatch { rule, phrase })
        })
    }
}

/// Lower-case and map typographic apostrophes to `'`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' | '\u{02BC}' | '\u{FF07}' | '`' | '\u{00B4}' => '\'',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}
