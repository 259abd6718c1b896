//! Shared initialization logic for the CLI.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::{load_config, resolve_data_path, AppConfig};
use crate::estimator::{create_estimator, EstimatorProviderConfig};
use crate::services::{BatchAggregator, ClassifierConfig, RuleSet, SentimentClassifier};
use crate::translation::create_translator;

/// Command-line adjustments applied on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Skip translation and classify input as written.
    pub no_translate: bool,
    /// Estimator chosen by name (`lexicon`, `model`, `none`).
    pub estimator: Option<String>,
    /// Batch concurrency.
    pub concurrency: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: AppConfig) -> Result<AppConfig> {
        if self.no_translate {
            config.translator = config.translator.disabled();
        }
        if let Some(name) = &self.estimator {
            config.estimator = match (EstimatorProviderConfig::from_name(name)?, &config.estimator)
            {
                // Same provider on the command line keeps the file's settings.
                (chosen, current)
                    if std::mem::discriminant(&chosen) == std::mem::discriminant(current) =>
                {
                    current.clone()
                }
                (chosen, _) => chosen,
            };
        }
        if let Some(concurrency) = self.concurrency {
            config.batch.concurrency = concurrency;
        }
        Ok(config)
    }
}

/// Application context holding the configured classifier and aggregator.
pub struct AppContext {
    pub data_path: PathBuf,
    pub config: AppConfig,
    pub classifier: Arc<SentimentClassifier>,
    pub aggregator: BatchAggregator,
}

impl AppContext {
    /// Initialize application context.
    ///
    /// Data path priority: explicit path > SENTISCOPE_DATA_PATH env > ./.sentiscope (if exists) > ~/.sentiscope
    pub fn new(explicit_path: Option<PathBuf>, overrides: &ConfigOverrides) -> Result<Self> {
        let data_path = resolve_data_path(explicit_path);
        tracing::info!("Using data path: {}", data_path.display());

        let config = overrides.apply(load_config(&data_path))?;
        Self::from_config(data_path, config)
    }

    /// Build the context from an already-resolved config.
    pub fn from_config(data_path: PathBuf, config: AppConfig) -> Result<Self> {
        let translator = create_translator(&config.translator);
        let estimator = create_estimator(&config.estimator)?;

        if estimator.is_available() {
            tracing::info!("Polarity estimator ready: {}", estimator.name());
        } else {
            tracing::warn!(
                "Polarity estimator '{}' not available; unmatched items will score neutral",
                estimator.name()
            );
        }

        let classifier = Arc::new(SentimentClassifier::new(
            translator,
            estimator,
            RuleSet::default(),
            ClassifierConfig {
                target_language: config.translator.target().to_string(),
                translate_timeout: config.translator.timeout(),
            },
        ));
        tracing::info!(
            translator = classifier.translator_name(),
            estimator = classifier.estimator_name(),
            "Classifier initialized"
        );

        let aggregator = BatchAggregator::new(classifier.clone(), config.batch.clone());

        Ok(Self {
            data_path,
            config,
            classifier,
            aggregator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::TranslatorProviderConfig;

    #[test]
    fn test_overrides_disable_translation() {
        let overrides = ConfigOverrides {
            no_translate: true,
            ..Default::default()
        };
        let config = overrides.apply(AppConfig::default()).expect("apply");
        assert!(matches!(config.translator, TranslatorProviderConfig::None { .. }));
    }

    #[test]
    fn test_overrides_reject_unknown_estimator() {
        let overrides = ConfigOverrides {
            estimator: Some("oracle".into()),
            ..Default::default()
        };
        assert!(overrides.apply(AppConfig::default()).is_err());
    }

    #[test]
    fn test_same_estimator_keeps_file_settings() {
        let mut config = AppConfig::default();
        config.estimator = EstimatorProviderConfig::Lexicon {
            lexicon_path: Some(PathBuf::from("words.toml")),
        };
        let overrides = ConfigOverrides {
            estimator: Some("lexicon".into()),
            concurrency: Some(9),
            ..Default::default()
        };
        let config = overrides.apply(config).expect("apply");
        assert_eq!(
            config.estimator,
            EstimatorProviderConfig::Lexicon {
                lexicon_path: Some(PathBuf::from("words.toml"))
            }
        );
        assert_eq!(config.batch.concurrency, 9);
    }

    #[test]
    fn test_context_from_offline_config() {
        let config = AppConfig {
            translator: TranslatorProviderConfig::None {
                target: "en".into(),
            },
            ..Default::default()
        };
        let ctx = AppContext::from_config(PathBuf::from("/tmp/sentiscope"), config).expect("ctx");
        assert_eq!(ctx.classifier.translator_name(), "none");
        assert_eq!(ctx.classifier.estimator_name(), "lexicon");
        assert_eq!(ctx.aggregator.config().concurrency, 4);
    }
}
