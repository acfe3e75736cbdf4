//! Text refinement providers
//!
//! Refinement rewrites recognized text into the configured register before
//! translation, via a generative text service. Every call is single-turn:
//! the request carries exactly one user prompt and no conversation history.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use voice_relay_core::{Register, ServiceError, TextRefiner};

use crate::map_request_error;

/// Refiner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinerConfig {
    /// Which provider to use
    #[serde(default)]
    pub provider: RefinerProvider,
    /// Generative-text endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key (set via VOICE_RELAY__REFINER__API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Top-k sampling
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Max tokens generated per refinement
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/generate".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    1.0
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    64
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            provider: RefinerProvider::default(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Refinement providers
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RefinerProvider {
    /// Generative-text service
    Llm,
    /// Disabled (pass-through)
    #[default]
    Disabled,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

/// Build the single-turn refinement prompt for a register
fn build_prompt(text: &str, register: Register) -> String {
    match register {
        Register::Slang => format!(
            "Refine the following text into clear, concise street urban slang \
             suitable for spoken translation: {text}"
        ),
        Register::Formal => format!(
            "Refine the following text into clear, concise formal professional \
             language suitable for spoken translation: {text}"
        ),
    }
}

/// Refiner backed by a generative-text service
pub struct LlmTextRefiner {
    client: reqwest::Client,
    config: RefinerConfig,
}

impl LlmTextRefiner {
    pub fn new(config: RefinerConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn extract(response: GenerateResponse) -> Result<String, ServiceError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::MalformedResponse("no candidates".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ServiceError::MalformedResponse(
                "empty candidate text".to_string(),
            ));
        }

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl TextRefiner for LlmTextRefiner {
    async fn refine(&self, text: &str, register: Register) -> Result<String, ServiceError> {
        let prompt = build_prompt(text, register);

        let body = GenerateRequest {
            model: &self.config.model,
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
                max_output_tokens: self.config.max_output_tokens,
            },
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

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        Self::extract(body)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

/// Pass-through refiner (disabled provider)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRefiner;

#[async_trait]
impl TextRefiner for NoopRefiner {
    async fn refine(&self, text: &str, _register: Register) -> Result<String, ServiceError> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Create refiner based on config
pub fn create_refiner(config: &RefinerConfig) -> Arc<dyn TextRefiner> {
    match config.provider {
        RefinerProvider::Llm => {
            if config.api_key.is_none() {
                tracing::warn!("Refiner API key not set, using noop refiner");
                return Arc::new(NoopRefiner);
            }
            match LlmTextRefiner::new(config.clone()) {
                Ok(refiner) => {
                    tracing::info!(model = %config.model, "Using LLM text refiner");
                    Arc::new(refiner)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to build refiner client, using noop");
                    Arc::new(NoopRefiner)
                }
            }
        }
        RefinerProvider::Disabled => Arc::new(NoopRefiner),
    }
}
