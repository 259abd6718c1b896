use thiserror::Error;

/// Custom error type for Sentiscope operations.
#[derive(Debug, Error)]
pub enum SentiscopeError {
    /// Translation request failed or returned nothing usable.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Polarity estimation failed.
    #[error("Estimator error: {0}")]
    Estimator(String),

    /// Model download or load failed.
    #[error("Model error: {message}")]
    Model {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be parsed or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tabular input could not be read.
    #[error("Dataset error in '{path}': {message}")]
    Dataset { path: String, message: String },

    /// File extension has no registered reader or writer.
    #[error("Unsupported file format '{extension}'")]
    UnsupportedFormat { extension: String },

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SentiscopeError {
    fn from(err: serde_json::Error) -> Self {
        SentiscopeError::Config(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for SentiscopeError {
    fn from(err: toml::de::Error) -> Self {
        SentiscopeError::Config(format!("TOML error: {}", err))
    }
}

impl From<reqwest::Error> for SentiscopeError {
    fn from(err: reqwest::Error) -> Self {
        SentiscopeError::Translation(format!("HTTP error: {}", err))
    }
}

impl From<anyhow::Error> for SentiscopeError {
    fn from(err: anyhow::Error) -> Self {
        SentiscopeError::Model {
            message: format!("{:#}", err),
            source: None,
        }
    }
}
