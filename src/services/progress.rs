//! Progress reporting for batch classification.
//!
//! Decouples the aggregator from the terminal: the CLI plugs in an
//! `indicatif` bar; library callers and tests use [`NoopProgressReporter`].

use std::sync::Arc;

use crate::models::Sentiment;

/// Receives per-row progress from a batch run.
///
/// Implementations must not fail the caller.
pub trait ProgressReporter: Send + Sync {
    /// A run over `total` rows is starting.
    fn start(&self, total: usize);

    /// `done` rows of the run have finished; `latest` is the label just assigned.
    fn advance(&self, done: usize, latest: Sentiment);

    /// The run is complete.
    fn finish(&self);
}

/// No-op reporter for library callers and tests.
pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn start(&self, _total: usize) {}
    fn advance(&self, _done: usize, _latest: Sentiment) {}
    fn finish(&self) {}
}

/// Shorthand for creating a no-op reporter.
pub fn noop_progress() -> Arc<dyn ProgressReporter> {
    Arc::new(NoopProgressReporter)
}
