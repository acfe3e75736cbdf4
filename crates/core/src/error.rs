//! Error types shared across the relay

use thiserror::Error;

/// Core errors
#[derive(Debug, Error)]
pub enum CoreError {
    /// Inbound frame length does not divide evenly into samples
    #[error("audio frame of {len} bytes is not a multiple of sample width {width}")]
    MalformedFrame { len: usize, width: usize },

    /// Declared format is not one the decoder handles
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
}

/// External collaborator errors
///
/// Every recognizer/refiner/translator call is network-bound with unbounded
/// latency and a nonzero failure rate; these variants let the orchestrator
/// make an explicit abort-chunk decision instead of a catch-all suppression.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request timed out")]
    Timeout,

    #[error("service returned HTTP {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}
