pub mod stubs;

// Re-export commonly used test utilities
pub use stubs::{
    classifier_with, FailingTranslator, FixedEstimator, MapEstimator, ScriptedTranslator,
};
