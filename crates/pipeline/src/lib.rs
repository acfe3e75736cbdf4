//! Streaming translation pipeline
//!
//! This crate drives one inbound audio chunk through the full relay
//! pipeline: decode -> recognize -> refine -> translate -> sanitize.
//! Failures are chunk-scoped; nothing here terminates a connection or the
//! process.

pub mod orchestrator;

pub use orchestrator::{OrchestratorConfig, TranslationOrchestrator};

use thiserror::Error;

use voice_relay_core::{CoreError, ServiceError};

/// Pipeline errors, one variant per stage
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("decode error: {0}")]
    Decode(#[from] CoreError),

    #[error("recognition error: {0}")]
    Recognition(ServiceError),

    #[error("refinement error: {0}")]
    Refinement(ServiceError),

    #[error("translation error: {0}")]
    Translation(ServiceError),
}

impl PipelineError {
    /// Stage name for diagnostics
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Decode(_) => "decode",
            PipelineError::Recognition(_) => "recognition",
            PipelineError::Refinement(_) => "refinement",
            PipelineError::Translation(_) => "translation",
        }
    }
}
