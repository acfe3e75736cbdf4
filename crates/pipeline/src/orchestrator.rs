//! Translation orchestrator
//!
//! Sequences one audio chunk through recognition, refinement, translation,
//! and sanitization to a broadcastable payload, or decides to produce
//! nothing. Stages run strictly sequentially per chunk; callers that await
//! each run before submitting the next get per-connection ordering for free.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use voice_relay_core::{
    sanitize, AudioChunk, AudioFormat, LanguageTag, Register, SpeechRecognizer, TextRefiner,
    Translator,
};

use crate::PipelineError;

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Language spoken by clients
    #[serde(default = "default_source_lang")]
    pub source_lang: LanguageTag,
    /// Language broadcast to subscribers
    #[serde(default = "default_dest_lang")]
    pub dest_lang: LanguageTag,
    /// Register recognized text is rewritten into
    #[serde(default)]
    pub register: Register,
    /// Format inbound frames must already be in; no resampling is done
    #[serde(default)]
    pub audio_format: AudioFormat,
}

fn default_source_lang() -> LanguageTag {
    LanguageTag::new("en")
}

fn default_dest_lang() -> LanguageTag {
    LanguageTag::new("ko")
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            source_lang: default_source_lang(),
            dest_lang: default_dest_lang(),
            register: Register::default(),
            audio_format: AudioFormat::default(),
        }
    }
}

/// Drives one audio chunk through the full pipeline
///
/// The collaborator instances are stateless (or externally synchronized) and
/// shared read-only across every connection task.
pub struct TranslationOrchestrator {
    recognizer: Arc<dyn SpeechRecognizer>,
    refiner: Arc<dyn TextRefiner>,
    translator: Arc<dyn Translator>,
    config: OrchestratorConfig,
}

impl TranslationOrchestrator {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        refiner: Arc<dyn TextRefiner>,
        translator: Arc<dyn Translator>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            recognizer,
            refiner,
            translator,
            config,
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run the typed pipeline for one chunk.
    ///
    /// `Ok(None)` covers the normal no-output cases: a recognition miss, or
    /// translated text that sanitizes down to nothing. Errors identify the
    /// failed stage; the caller decides whether to surface or swallow them.
    pub async fn run(&self, data: &[u8]) -> Result<Option<String>, PipelineError> {
        let chunk = AudioChunk::from_pcm_bytes(data, self.config.audio_format)?;
        tracing::debug!(
            bytes = data.len(),
            duration_ms = chunk.duration_ms(),
            "Decoded audio chunk"
        );

        let recognized = self
            .recognizer
            .recognize(&chunk, &self.config.source_lang)
            .await
            .map_err(PipelineError::Recognition)?;

        let Some(text) = recognized else {
            // Audio present but not understood: a normal outcome
            tracing::debug!("No speech recognized in chunk");
            return Ok(None);
        };
        tracing::info!(%text, "Recognized text");

        let refined = self
            .refiner
            .refine(&text, self.config.register)
            .await
            .map_err(PipelineError::Refinement)?;
        tracing::debug!(%refined, register = %self.config.register, "Refined text");

        let translated = self
            .translator
            .translate(&refined, &self.config.source_lang, &self.config.dest_lang)
            .await
            .map_err(PipelineError::Translation)?;
        tracing::debug!(%translated, "Translated text");

        let cleaned = sanitize::clean(&translated);
        if cleaned.trim().is_empty() {
            tracing::debug!("Sanitized text is empty, nothing to broadcast");
            return Ok(None);
        }

        Ok(Some(cleaned))
    }

    /// Process one chunk, downgrading every failure to "no output".
    ///
    /// This is the single point where stage errors become silence: the
    /// failure is logged and the connection keeps serving future chunks.
    pub async fn process_chunk(&self, data: &[u8]) -> Option<String> {
        match self.run(data).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(stage = e.stage(), error = %e, "Chunk pipeline aborted");
                None
            }
        }
    }
}
