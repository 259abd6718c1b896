pub mod aggregate;
pub mod classifier;
pub mod export;
pub mod import;
pub mod progress;
pub mod rules;

pub use aggregate::{BatchAggregator, BatchConfig, BatchReport};
pub use classifier::{ClassifierConfig, SentimentClassifier};
pub use export::{to_csv_string, write_dataset};
pub use import::{load_dataset, TEXT_COLUMN};
pub use progress::{noop_progress, NoopProgressReporter, ProgressReporter};
pub use rules::{ForcedResult, OverrideRule, RuleMatch, RuleSet, NEGATION_OVERRIDE};
