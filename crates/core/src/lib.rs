//! Core types and traits for the voice relay
//!
//! This crate provides foundational types used across all other crates:
//! - Audio chunk types and PCM frame decoding
//! - Language tags and the refinement register
//! - External collaborator traits (recognizer, refiner, translator)
//! - Broadcast-payload sanitization
//! - Error types

pub mod audio;
pub mod error;
pub mod language;
pub mod sanitize;
pub mod traits;

pub use audio::{AudioChunk, AudioFormat};
pub use error::{CoreError, ServiceError};
pub use language::{LanguageTag, Register};
pub use traits::{SpeechRecognizer, TextRefiner, Translator};
