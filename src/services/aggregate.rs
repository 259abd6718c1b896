//! Batch classification over tabular feedback.
//!
//! Streams the first-column text of every row through the classifier with
//! bounded concurrency. Output order always equals input order regardless of
//! completion order.

use std::sync::Arc;

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{AnalysisResult, BatchSummary, Cell, Dataset, LabelCounts, SENTIMENT_COLUMN};
use crate::services::classifier::SentimentClassifier;
use crate::services::progress::ProgressReporter;

/// Batch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Max rows classified at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    4
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

/// Everything a batch run produces.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Input rows with a `Sentiment` column appended.
    pub labeled: Dataset,
    /// Per-row results in input order.
    pub results: Vec<AnalysisResult>,
    pub counts: LabelCounts,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    /// Rows whose translation fell back to the original text.
    pub fn translation_fallbacks(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.translation_fallback)
            .count()
    }

    /// Rows decided by an override rule.
    pub fn overrides(&self) -> usize {
        self.results.iter().filter(|r| r.is_override()).count()
    }
}

/// Runs the classifier across a dataset.
pub struct BatchAggregator {
    classifier: Arc<SentimentClassifier>,
    config: BatchConfig,
}

impl BatchAggregator {
    pub fn new(classifier: Arc<SentimentClassifier>, config: BatchConfig) -> Self {
        Self { classifier, config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Classify every row and summarize the labels.
    ///
    /// An empty dataset yields an empty report with all percentages 0.0.
    pub async fn aggregate(
        &self,
        dataset: &Dataset,
        progress: Arc<dyn ProgressReporter>,
    ) -> BatchReport {
        let total = dataset.len();
        progress.start(total);
        if total == 0 {
            info!("Empty dataset, nothing to classify");
            progress.finish();
            return BatchReport {
                labeled: dataset.with_column(SENTIMENT_COLUMN, vec![]),
                results: vec![],
                counts: LabelCounts::default(),
                summary: BatchSummary::default(),
            };
        }

        let concurrency = self.config.concurrency.max(1);
        info!(rows = total, concurrency, "Classifying batch");

        let classifier = self.classifier.clone();
        let texts: Vec<String> = dataset.texts().collect();

        let stream = tokio_stream::iter(texts).map(move |text| {
            let classifier = classifier.clone();
            async move { classifier.classify(&text).await }
        });

        // `buffered` keeps input order while running up to `concurrency` rows.
        let mut buffered = stream.buffered(concurrency);

        let mut results = Vec::with_capacity(total);
        let mut counts = LabelCounts::default();

        while let Some(result) = buffered.next().await {
            counts.record(result.sentiment);
            progress.advance(results.len() + 1, result.sentiment);
            results.push(result);
        }
        progress.finish();

        let labels: Vec<Cell> = results
            .iter()
            .map(|r| Cell::Text(r.sentiment.to_string()))
            .collect();
        let summary = BatchSummary::from_counts(&counts);

        info!(
            positive = summary.positive_pct,
            negative = summary.negative_pct,
            neutral = summary.neutral_pct,
            "Batch classified"
        );

        BatchReport {
            labeled: dataset.with_column(SENTIMENT_COLUMN, labels),
            results,
            counts,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::LexiconEstimator;
    use crate::models::Sentiment;
    use crate::services::classifier::ClassifierConfig;
    use crate::services::progress::noop_progress;
    use crate::services::rules::RuleSet;
    use crate::translation::NoopTranslator;
    use std::sync::Mutex;

    /// Records every call a batch run makes.
    #[derive(Default)]
    struct RecordingReporter {
        starts: Mutex<Vec<usize>>,
        advances: Mutex<Vec<usize>>,
        finishes: Mutex<usize>,
    }

    impl ProgressReporter for RecordingReporter {
        fn start(&self, total: usize) {
            self.starts.lock().unwrap().push(total);
        }

        fn advance(&self, done: usize, _latest: Sentiment) {
            self.advances.lock().unwrap().push(done);
        }

        fn finish(&self) {
            *self.finishes.lock().unwrap() += 1;
        }
    }

    fn aggregator(concurrency: usize) -> BatchAggregator {
        let classifier = SentimentClassifier::new(
            Arc::new(NoopTranslator::new()),
            Arc::new(LexiconEstimator::new()),
            RuleSet::default(),
            ClassifierConfig {
                target_language: "en".to_string(),
                translate_timeout: None,
            },
        );
        BatchAggregator::new(Arc::new(classifier), BatchConfig { concurrency })
    }

    #[tokio::test]
    async fn test_empty_dataset_reports_zeros() {
        let dataset = Dataset::new(vec!["feedback".into()], vec![]);
        let report = aggregator(4).aggregate(&dataset, noop_progress()).await;
        assert!(report.is_empty());
        assert_eq!(report.summary.positive_pct, 0.0);
        assert_eq!(report.summary.negative_pct, 0.0);
        assert_eq!(report.summary.neutral_pct, 0.0);
        assert_eq!(report.labeled.columns, vec!["feedback", "Sentiment"]);
    }

    #[tokio::test]
    async fn test_labels_follow_input_order() {
        let dataset = Dataset::from_texts(
            "feedback",
            [
                "great service",
                "I don't like the app",
                "the parcel arrived",
                "excellent",
            ],
        );
        let report = aggregator(3).aggregate(&dataset, noop_progress()).await;

        let labels: Vec<Sentiment> = report.results.iter().map(|r| r.sentiment).collect();
        assert_eq!(
            labels,
            vec![
                Sentiment::Positive,
                Sentiment::Negative,
                Sentiment::Neutral,
                Sentiment::Positive
            ]
        );
        assert_eq!(report.labeled.rows[1][1], Cell::from("Negative"));
        assert_eq!(report.summary.positive_pct, 50.0);
        assert_eq!(report.summary.negative_pct, 25.0);
        assert_eq!(report.summary.neutral_pct, 25.0);
        assert_eq!(report.overrides(), 1);
        assert_eq!(report.translation_fallbacks(), 4);
    }

    #[tokio::test]
    async fn test_progress_reported_once_per_row() {
        let dataset = Dataset::from_texts("feedback", ["good", "bad", "ok", "great", "meh"]);
        let reporter = Arc::new(RecordingReporter::default());
        aggregator(2).aggregate(&dataset, reporter.clone()).await;

        assert_eq!(*reporter.starts.lock().unwrap(), vec![5]);
        assert_eq!(*reporter.advances.lock().unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(*reporter.finishes.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_dataset_still_finishes_progress() {
        let dataset = Dataset::new(vec!["feedback".into()], vec![]);
        let reporter = Arc::new(RecordingReporter::default());
        aggregator(2).aggregate(&dataset, reporter.clone()).await;

        assert_eq!(*reporter.starts.lock().unwrap(), vec![0]);
        assert!(reporter.advances.lock().unwrap().is_empty());
        assert_eq!(*reporter.finishes.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let dataset = Dataset::from_texts("feedback", ["good"]);
        let report = aggregator(0).aggregate(&dataset, noop_progress()).await;
        assert_eq!(report.counts.positive, 1);
    }

    #[tokio::test]
    async fn test_non_text_cells_are_classified() {
        let dataset = Dataset::new(
            vec!["score".into()],
            vec![vec![Cell::Integer(5)], vec![Cell::Empty], vec![Cell::Float(2.5)]],
        );
        let report = aggregator(2).aggregate(&dataset, noop_progress()).await;
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.counts.neutral, 3);
        assert_eq!(report.results[0].translated_text, "5");
    }
}
