//! Aggregate statistics over a labeled batch.

use serde::{Deserialize, Serialize};

use crate::models::sentiment::Sentiment;
use crate::utils::math::percentage_of;

/// Raw per-label tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl LabelCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

impl FromIterator<Sentiment> for LabelCounts {
    fn from_iter<I: IntoIterator<Item = Sentiment>>(iter: I) -> Self {
        let mut counts = LabelCounts::default();
        for sentiment in iter {
            counts.record(sentiment);
        }
        counts
    }
}

/// Per-label percentages over one total, each rounded to 2 decimals.
///
/// The three values may miss 100.0 by rounding error only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    pub total: usize,
}

impl BatchSummary {
    /// Compute percentages from counts. An empty batch yields all zeros.
    pub fn from_counts(counts: &LabelCounts) -> Self {
        let total = counts.total();
        Self {
            positive_pct: percentage_of(counts.positive, total),
            negative_pct: percentage_of(counts.negative, total),
            neutral_pct: percentage_of(counts.neutral, total),
            total,
        }
    }

    /// True when no rows were aggregated.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn pct(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive_pct,
            Sentiment::Negative => self.negative_pct,
            Sentiment::Neutral => self.neutral_pct,
        }
    }
}
