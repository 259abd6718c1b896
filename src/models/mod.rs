pub mod dataset;
pub mod sentiment;
pub mod summary;

pub use dataset::{Cell, Dataset, SENTIMENT_COLUMN};
pub use sentiment::{confidence_percentage, AnalysisResult, ScoreSource, Sentiment};
pub use summary::{BatchSummary, LabelCounts};
