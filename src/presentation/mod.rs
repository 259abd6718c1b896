//! Flat view structures for renderers and chart drawers.
//!
//! Everything here is a pure projection of [`AnalysisResult`] and
//! [`BatchSummary`]; nothing touches the filesystem. Renderers that write chart
//! images namespace their output with [`PageView::request_id`].

use serde::Serialize;
use uuid::Uuid;

use crate::models::{AnalysisResult, BatchSummary, LabelCounts, Sentiment};
use crate::utils::math::round_to;

pub const POSITIVE_COLOR: &str = "#4CAF50";
pub const NEGATIVE_COLOR: &str = "#E53935";
pub const NEUTRAL_COLOR: &str = "#FBC02D";

pub const SINGLE_CHART_TITLE: &str = "Sentiment Result";
pub const BATCH_CHART_TITLE: &str = "Overall Sentiment Summary";

/// Bar color for a label.
pub fn color_for(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => POSITIVE_COLOR,
        Sentiment::Negative => NEGATIVE_COLOR,
        Sentiment::Neutral => NEUTRAL_COLOR,
    }
}

/// Single-item result as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleResultView {
    pub sentiment: Sentiment,
    /// Polarity, 3 decimals.
    pub score: f64,
    /// Confidence percentage, 2 decimals.
    pub percentage: f64,
    pub translated: String,
}

impl From<&AnalysisResult> for SingleResultView {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            sentiment: result.sentiment,
            score: round_to(result.polarity_score, 3),
            percentage: round_to(result.confidence_percentage, 2),
            translated: result.translated_text.clone(),
        }
    }
}

/// Batch percentages, 2 decimals each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchResultView {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl From<&BatchSummary> for BatchResultView {
    fn from(summary: &BatchSummary) -> Self {
        Self {
            positive: round_to(summary.positive_pct, 2),
            negative: round_to(summary.negative_pct, 2),
            neutral: round_to(summary.neutral_pct, 2),
        }
    }
}

/// Bar chart input. Bars are always Positive, Negative, Neutral in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub labels: Vec<Sentiment>,
    pub values: Vec<f64>,
    pub colors: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<&'static str>,
}

impl ChartSeries {
    fn bars(title: &'static str, values: impl Fn(Sentiment) -> f64) -> Self {
        Self {
            title,
            labels: Sentiment::ALL.to_vec(),
            values: Sentiment::ALL.iter().map(|s| values(*s)).collect(),
            colors: Sentiment::ALL.iter().map(|s| color_for(*s)).collect(),
            y_max: None,
            y_label: None,
        }
    }

    /// Winner-take-all bars: 100 for the assigned label, 0 elsewhere.
    pub fn single(sentiment: Sentiment) -> Self {
        let mut chart = Self::bars(SINGLE_CHART_TITLE, |s| {
            if s == sentiment {
                100.0
            } else {
                0.0
            }
        });
        chart.y_max = Some(100.0);
        chart
    }

    /// Raw label counts.
    pub fn batch(counts: &LabelCounts) -> Self {
        let mut chart = Self::bars(BATCH_CHART_TITLE, |s| counts.get(s) as f64);
        chart.y_label = Some("Count");
        chart
    }

    /// Bar value for one label.
    pub fn value(&self, sentiment: Sentiment) -> f64 {
        self.labels
            .iter()
            .position(|s| *s == sentiment)
            .and_then(|i| self.values.get(i).copied())
            .unwrap_or(0.0)
    }
}

/// Chart data for whichever results the page carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageCharts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single: Option<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<ChartSeries>,
}

/// Page-level context handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub request_id: Uuid,
    pub single_result: Option<SingleResultView>,
    pub chart_generated: bool,
    #[serde(rename = "excel_result")]
    pub batch_result: Option<BatchResultView>,
    #[serde(rename = "excel_chart")]
    pub batch_chart_generated: bool,
    pub charts: PageCharts,
}

impl PageView {
    /// An empty page with a fresh request id.
    pub fn new() -> Self {
        Self::with_request_id(Uuid::new_v4())
    }

    pub fn with_request_id(request_id: Uuid) -> Self {
        Self {
            request_id,
            single_result: None,
            chart_generated: false,
            batch_result: None,
            batch_chart_generated: false,
            charts: PageCharts::default(),
        }
    }

    /// Attach a single result. The chart flag reflects whether a chart was drawn.
    pub fn with_single(mut self, result: &AnalysisResult, chart_generated: bool) -> Self {
        self.single_result = Some(SingleResultView::from(result));
        self.chart_generated = chart_generated;
        self.charts.single = chart_generated.then(|| ChartSeries::single(result.sentiment));
        self
    }

    /// Attach batch percentages and, when drawn, the count chart.
    pub fn with_batch(
        mut self,
        summary: &BatchSummary,
        counts: &LabelCounts,
        chart_generated: bool,
    ) -> Self {
        self.batch_result = Some(BatchResultView::from(summary));
        self.batch_chart_generated = chart_generated;
        self.charts.batch = chart_generated.then(|| ChartSeries::batch(counts));
        self
    }

    /// File stem a renderer should use for a chart of `kind`.
    pub fn chart_file_stem(&self, kind: &str) -> String {
        format!("{}-{}", kind, self.request_id.simple())
    }
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}
