//! Translator provider configuration and factory.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::translation::google::DEFAULT_ENDPOINT;
use crate::translation::{CachedTranslator, GoogleTranslator, NoopTranslator, Translator};

/// Translator backend selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum TranslatorProviderConfig {
    /// Google's public translate endpoint (default).
    Google {
        #[serde(default = "default_endpoint")]
        endpoint: String,
        /// Reference language the estimator understands.
        #[serde(default = "default_target")]
        target: String,
        /// Per-call budget; expiry falls back to the original text.
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
        /// Memoize successful translations.
        #[serde(default = "default_true")]
        cache: bool,
    },
    /// No translation; every input is classified as written.
    None {
        #[serde(default = "default_target")]
        target: String,
    },
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_target() -> String {
    "en".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for TranslatorProviderConfig {
    fn default() -> Self {
        Self::Google {
            endpoint: default_endpoint(),
            target: default_target(),
            timeout_ms: default_timeout_ms(),
            cache: true,
        }
    }
}

impl TranslatorProviderConfig {
    pub fn target(&self) -> &str {
        match self {
            Self::Google { target, .. } | Self::None { target } => target,
        }
    }

    /// Per-call timeout applied by the classifier, if any.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Self::Google { timeout_ms, .. } => Some(Duration::from_millis(*timeout_ms)),
            Self::None { .. } => None,
        }
    }

    /// Same target language with translation switched off.
    pub fn disabled(&self) -> Self {
        Self::None {
            target: self.target().to_string(),
        }
    }
}

/// Create a translator from provider configuration.
pub fn create_translator(config: &TranslatorProviderConfig) -> Arc<dyn Translator> {
    match config {
        TranslatorProviderConfig::Google {
            endpoint,
            timeout_ms,
            cache,
            ..
        } => {
            let google: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(
                endpoint.clone(),
                Duration::from_millis(*timeout_ms),
            ));
            if *cache {
                Arc::new(CachedTranslator::with_defaults(google))
            } else {
                google
            }
        }
        TranslatorProviderConfig::None { .. } => Arc::new(NoopTranslator::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_google_to_english() {
        let config = TranslatorProviderConfig::default();
        assert_eq!(config.target(), "en");
        assert_eq!(config.timeout(), Some(Duration::from_millis(5000)));
        assert_eq!(create_translator(&config).name(), "google");
    }

    #[test]
    fn test_parse_none_provider_from_toml() {
        let config: TranslatorProviderConfig =
            toml::from_str("provider = \"none\"").expect("parse");
        assert_eq!(
            config,
            TranslatorProviderConfig::None {
                target: "en".to_string()
            }
        );
        assert_eq!(create_translator(&config).name(), "none");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_disabled_keeps_target() {
        let config: TranslatorProviderConfig =
            toml::from_str("provider = \"google\"\ntarget = \"de\"").expect("parse");
        assert_eq!(config.disabled().target(), "de");
    }
}
