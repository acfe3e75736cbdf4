//! Machine-translation providers

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use voice_relay_core::{LanguageTag, ServiceError, Translator};

use crate::map_request_error;

/// Translator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Which provider to use
    #[serde(default)]
    pub provider: TranslatorProvider,
    /// Translation endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key (set via VOICE_RELAY__TRANSLATOR__API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "http://localhost:5000/translate".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: TranslatorProvider::default(),
            endpoint: default_endpoint(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Translation providers
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorProvider {
    /// HTTP translation service
    Http,
    /// Disabled (pass-through)
    #[default]
    Disabled,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Translator backed by an HTTP machine-translation service
pub struct HttpTranslator {
    client: reqwest::Client,
    config: TranslatorConfig,
}

impl HttpTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageTag,
        to: &LanguageTag,
    ) -> Result<String, ServiceError> {
        let body = TranslateRequest {
            q: text,
            source: from.as_str(),
            target: to.as_str(),
            format: "text",
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        Ok(body.translated_text)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Pass-through translator (disabled provider)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(
        &self,
        text: &str,
        _from: &LanguageTag,
        _to: &LanguageTag,
    ) -> Result<String, ServiceError> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Create translator based on config
pub fn create_translator(config: &TranslatorConfig) -> Arc<dyn Translator> {
    match config.provider {
        TranslatorProvider::Http => {
            if config.endpoint.is_empty() {
                tracing::warn!("Translator endpoint not set, using noop translator");
                return Arc::new(NoopTranslator);
            }
            match HttpTranslator::new(config.clone()) {
                Ok(translator) => {
                    tracing::info!(endpoint = %config.endpoint, "Using HTTP translator");
                    Arc::new(translator)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to build translator client, using noop");
                    Arc::new(NoopTranslator)
                }
            }
        }
        TranslatorProvider::Disabled => Arc::new(NoopTranslator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TranslatorConfig::default();
        assert!(matches!(config.provider, TranslatorProvider::Disabled));
    }

    #[test]
    fn test_response_shape() {
        let body: TranslateResponse =
            serde_json::from_str(r#"{"translatedText": "안녕하세요"}"#).unwrap();
        assert_eq!(body.translated_text, "안녕하세요");
    }

    #[test]
    fn test_request_shape() {
        let body = TranslateRequest {
            q: "hello",
            source: "en",
            target: "ko",
            format: "text",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["q"], "hello");
        assert_eq!(json["source"], "en");
        assert_eq!(json["target"], "ko");
    }

    #[tokio::test]
    async fn test_noop_passthrough() {
        let out = NoopTranslator
            .translate("그대로", &LanguageTag::new("ko"), &LanguageTag::new("en"))
            .await
            .unwrap();
        assert_eq!(out, "그대로");
    }
}
