//! Google Translate client for the public `translate_a/single` endpoint.
//!
//! The endpoint needs no API key and answers with nested JSON arrays:
//! `[[["Hello", "Hola", null, null, 10], ...], null, "es", ...]`. The first
//! element of each inner segment is a piece of the translation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::translation::Translator;
use crate::SentiscopeError;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Longest input the endpoint accepts in one request.
pub const MAX_CHARS: usize = 5000;

/// HTTP translator backed by Google's public web endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    /// Create a translator against `endpoint` with a per-request HTTP timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warn!(
                    "Failed to build HTTP client with a {:?} timeout: {}. Requests rely on the classifier deadline only.",
                    timeout, e
                );
                reqwest::Client::new()
            }
        };

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_ENDPOINT, Duration::from_secs(5))
    }
}

/// Join the translated segments of an endpoint response.
fn parse_response(body: &Value) -> Result<String, SentiscopeError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            SentiscopeError::Translation("Unexpected response shape: missing segments".to_string())
        })?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(SentiscopeError::Translation(
            "Response contained no translated text".to_string(),
        ));
    }

    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, SentiscopeError> {
        if text.trim().is_empty() {
            return Err(SentiscopeError::Translation("Empty input".to_string()));
        }
        let chars = text.chars().count();
        if chars > MAX_CHARS {
            return Err(SentiscopeError::Translation(format!(
                "Input too long: {} characters (max {})",
                chars, MAX_CHARS
            )));
        }

        debug!(source, target, chars, "Requesting translation");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SentiscopeError::Translation(format!(
                "Translate endpoint returned HTTP {}",
                status
            )));
        }

        let body: Value = response.json().await?;
        parse_response(&body)
    }

    fn name(&self) -> &str {
        "google"
    }
}
