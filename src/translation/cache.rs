use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::translation::Translator;
use crate::SentiscopeError;

/// Memoizing wrapper around another [`Translator`].
///
/// Survey exports repeat short answers ("good", "ok", "n/a") many times; only
/// successful translations are cached, so a transient failure is retried on
/// the next call.
pub struct CachedTranslator {
    inner: Arc<dyn Translator>,
    cache: Cache<(String, String, String), String>,
}

impl CachedTranslator {
    pub fn new(inner: Arc<dyn Translator>, max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner, cache }
    }

    pub fn with_defaults(inner: Arc<dyn Translator>) -> Self {
        Self::new(inner, 10_000, Duration::from_secs(3600))
    }
}

#[async_trait]
impl Translator for CachedTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, SentiscopeError> {
        let key = (text.to_string(), source.to_string(), target.to_string());
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let translated = self.inner.translate(text, source, target).await?;
        self.cache.insert(key, translated.clone()).await;
        Ok(translated)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }
}
