//! External collaborator traits
//!
//! The recognizer, refiner, and translator are network-bound services with
//! unbounded latency and a nonzero failure rate. Callers must not assume
//! success or bounded latency; failures are contained at chunk scope by the
//! orchestrator.

use async_trait::async_trait;

use crate::audio::AudioChunk;
use crate::error::ServiceError;
use crate::language::{LanguageTag, Register};

/// Speech-to-text boundary
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize speech in a chunk.
    ///
    /// `Ok(None)` means audio was present but not understood — a normal
    /// outcome, not an error.
    async fn recognize(
        &self,
        chunk: &AudioChunk,
        language: &LanguageTag,
    ) -> Result<Option<String>, ServiceError>;

    /// Provider name for diagnostics
    fn name(&self) -> &str;
}

/// Generative text-rewriting boundary
///
/// Stateless and single-turn: each refinement request is independent and
/// carries no conversation history.
#[async_trait]
pub trait TextRefiner: Send + Sync {
    async fn refine(&self, text: &str, register: Register) -> Result<String, ServiceError>;

    fn name(&self) -> &str;
}

/// Machine-translation boundary
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageTag,
        to: &LanguageTag,
    ) -> Result<String, ServiceError>;

    fn name(&self) -> &str;
}
