//! Speech recognition providers

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use voice_relay_core::{AudioChunk, LanguageTag, ServiceError, SpeechRecognizer};

use crate::map_request_error;

/// Recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Which provider to use
    #[serde(default)]
    pub provider: RecognizerProvider,
    /// Recognition endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key (set via VOICE_RELAY__RECOGNIZER__API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "http://localhost:9000/v1/recognize".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            provider: RecognizerProvider::default(),
            endpoint: default_endpoint(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Recognition providers
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerProvider {
    /// HTTP recognition service
    Http,
    /// Disabled (every chunk is a recognition miss)
    #[default]
    Disabled,
}

/// Recognition service response body
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    transcript: Option<String>,
}

/// Recognizer backed by an HTTP speech-to-text service
///
/// The raw PCM bytes are posted as the request body; sample rate and channel
/// metadata travel as headers so the service never has to guess the format.
pub struct HttpSpeechRecognizer {
    client: reqwest::Client,
    config: RecognizerConfig,
}

impl HttpSpeechRecognizer {
    pub fn new(config: RecognizerConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn parse(body: RecognizeResponse) -> Option<String> {
        // An absent or blank transcript is the recognition-miss outcome
        body.transcript.filter(|t| !t.trim().is_empty())
    }
}

#[async_trait]
impl SpeechRecognizer for HttpSpeechRecognizer {
    async fn recognize(
        &self,
        chunk: &AudioChunk,
        language: &LanguageTag,
    ) -> Result<Option<String>, ServiceError> {
        let format = chunk.format();
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .query(&[("language", language.as_str())])
            .header("content-type", "application/octet-stream")
            .header("x-sample-rate", format.sample_rate)
            .header("x-channels", format.channels as u16)
            .body(chunk.data().to_vec());

        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        Ok(Self::parse(body))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Recognizer that understands nothing (disabled provider)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

#[async_trait]
impl SpeechRecognizer for NoopRecognizer {
    async fn recognize(
        &self,
        _chunk: &AudioChunk,
        _language: &LanguageTag,
    ) -> Result<Option<String>, ServiceError> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Create recognizer based on config
pub fn create_recognizer(config: &RecognizerConfig) -> Arc<dyn SpeechRecognizer> {
    match config.provider {
        RecognizerProvider::Http => {
            if config.endpoint.is_empty() {
                tracing::warn!("Recognizer endpoint not set, using noop recognizer");
                return Arc::new(NoopRecognizer);
            }
            match HttpSpeechRecognizer::new(config.clone()) {
                Ok(recognizer) => {
                    tracing::info!(endpoint = %config.endpoint, "Using HTTP speech recognizer");
                    Arc::new(recognizer)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to build recognizer client, using noop");
                    Arc::new(NoopRecognizer)
                }
            }
        }
        RecognizerProvider::Disabled => Arc::new(NoopRecognizer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_relay_core::AudioFormat;

    #[test]
    fn test_default_config() {
        let config = RecognizerConfig::default();
        assert!(matches!(config.provider, RecognizerProvider::Disabled));
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_parse_transcript_present() {
        let body: RecognizeResponse =
            serde_json::from_str(r#"{"transcript": "hello how are you"}"#).unwrap();
        assert_eq!(
            HttpSpeechRecognizer::parse(body),
            Some("hello how are you".to_string())
        );
    }

    #[test]
    fn test_parse_miss_shapes() {
        // Absent, null, and blank transcripts are all misses, not errors
        for raw in [r#"{}"#, r#"{"transcript": null}"#, r#"{"transcript": "  "}"#] {
            let body: RecognizeResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(HttpSpeechRecognizer::parse(body), None);
        }
    }

    #[tokio::test]
    async fn test_noop_always_misses() {
        let chunk = AudioChunk::from_pcm_bytes(&[0u8; 4], AudioFormat::default()).unwrap();
        let result = NoopRecognizer
            .recognize(&chunk, &LanguageTag::new("en"))
            .await
            .unwrap();
        assert_eq!(result, None);
    }
}
