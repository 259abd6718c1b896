//! Best-effort translation into the reference language.
//!
//! The [`Translator`] trait abstracts the translation backend so the classifier
//! can run against the public Google endpoint, a cached wrapper, or a stub in
//! tests. [`translate_or_fallback`] turns every failure mode (service error,
//! empty input, timeout) into [`TranslationOutcome::Fallback`].

pub mod cache;
pub mod google;
pub mod provider;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::SentiscopeError;

pub use cache::CachedTranslator;
pub use google::GoogleTranslator;
pub use provider::{create_translator, TranslatorProviderConfig};

/// Source language code meaning "detect automatically".
pub const AUTO_DETECT: &str = "auto";

/// Service trait for text translation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` (or [`AUTO_DETECT`]) into `target`.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, SentiscopeError>;

    /// Short backend name for logs and `config` output.
    fn name(&self) -> &str;

    /// False when translation is switched off; callers skip the backend.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Result of a translation attempt that never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The backend returned a translation.
    Translated(String),
    /// Translation failed; the original text is carried forward.
    Fallback { original: String, reason: String },
}

impl TranslationOutcome {
    /// Text to classify: the translation, or the original on fallback.
    pub fn text(&self) -> &str {
        match self {
            TranslationOutcome::Translated(text) => text,
            TranslationOutcome::Fallback { original, .. } => original,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            TranslationOutcome::Translated(text) => text,
            TranslationOutcome::Fallback { original, .. } => original,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TranslationOutcome::Fallback { .. })
    }
}

/// Translate with auto-detected source, falling back to `text` on any failure.
///
/// Blank input is not sent to the backend. A `timeout` of `None` waits
/// indefinitely.
pub async fn translate_or_fallback(
    translator: &dyn Translator,
    text: &str,
    target: &str,
    timeout: Option<Duration>,
) -> TranslationOutcome {
    if text.trim().is_empty() {
        debug!("Skipping translation of blank input");
        return TranslationOutcome::Fallback {
            original: text.to_string(),
            reason: "empty input".to_string(),
        };
    }
    if !translator.is_enabled() {
        return TranslationOutcome::Fallback {
            original: text.to_string(),
            reason: "translation disabled".to_string(),
        };
    }

    let call = translator.translate(text, AUTO_DETECT, target);
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(SentiscopeError::Translation(format!(
                "timed out after {}ms",
                limit.as_millis()
            ))),
        },
        None => call.await,
    };

    match result {
        Ok(translated) if !translated.trim().is_empty() => {
            TranslationOutcome::Translated(translated)
        }
        Ok(_) => {
            warn!(
                translator = translator.name(),
                "Translator returned empty text, using original"
            );
            TranslationOutcome::Fallback {
                original: text.to_string(),
                reason: "empty translation".to_string(),
            }
        }
        Err(e) => {
            warn!(
                translator = translator.name(),
                "Translation failed, using original text: {}", e
            );
            TranslationOutcome::Fallback {
                original: text.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

/// Translator that always fails, forcing the untranslated path.
///
/// Used when translation is disabled and in tests.
pub struct NoopTranslator;

impl Default for NoopTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl NoopTranslator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, SentiscopeError> {
        Err(SentiscopeError::Translation(
            "Translation is disabled (noop)".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "none"
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperTranslator;

    #[async_trait]
    impl Translator for UpperTranslator {
        async fn translate(
            &self,
            text: &str,
            source: &str,
            _target: &str,
        ) -> Result<String, SentiscopeError> {
            assert_eq!(source, AUTO_DETECT);
            Ok(text.to_uppercase())
        }

        fn name(&self) -> &str {
            "upper"
        }
    }

    struct SlowTranslator;

    #[async_trait]
    impl Translator for SlowTranslator {
        async fn translate(
            &self,
            text: &str,
            _source: &str,
            _target: &str,
        ) -> Result<String, SentiscopeError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(text.to_string())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_successful_translation() {
        let outcome = translate_or_fallback(&UpperTranslator, "hola", "en", None).await;
        assert_eq!(outcome, TranslationOutcome::Translated("HOLA".to_string()));
        assert!(!outcome.is_fallback());
    }

    #[tokio::test]
    async fn test_noop_falls_back_to_original() {
        let outcome = translate_or_fallback(&NoopTranslator, "مرحبا", "en", None).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.text(), "مرحبا");
        assert!(matches!(
            outcome,
            TranslationOutcome::Fallback { ref reason, .. } if reason == "translation disabled"
        ));
    }

    #[tokio::test]
    async fn test_blank_input_skips_backend() {
        let outcome = translate_or_fallback(&UpperTranslator, "   ", "en", None).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_text(), "   ");
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let outcome = translate_or_fallback(
            &SlowTranslator,
            "bonjour",
            "en",
            Some(Duration::from_millis(50)),
        )
        .await;
        match outcome {
            TranslationOutcome::Fallback { original, reason } => {
                assert_eq!(original, "bonjour");
                assert!(reason.contains("timed out"), "reason: {reason}");
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }
}
