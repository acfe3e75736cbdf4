//! External collaborator implementations
//!
//! HTTP-backed providers for the three network services the relay depends
//! on, plus pass-through no-op providers:
//! - **Speech recognition**: audio chunk -> optional transcript
//! - **Text refinement**: single-turn generative rewrite into a register
//! - **Translation**: refined text -> destination language
//!
//! Each module exposes a serde config, a provider enum with a `Disabled`
//! default, and a `create_*` factory that falls back to the no-op provider
//! (with a warning) when the configured provider cannot be constructed.

pub mod recognizer;
pub mod refiner;
pub mod translator;

pub use recognizer::{
    create_recognizer, HttpSpeechRecognizer, NoopRecognizer, RecognizerConfig, RecognizerProvider,
};
pub use refiner::{create_refiner, LlmTextRefiner, NoopRefiner, RefinerConfig, RefinerProvider};
pub use translator::{
    create_translator, HttpTranslator, NoopTranslator, TranslatorConfig, TranslatorProvider,
};

use voice_relay_core::ServiceError;

/// Map a reqwest failure onto the collaborator error taxonomy
pub(crate) fn map_request_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else if let Some(status) = err.status() {
        ServiceError::Status(status.as_u16())
    } else {
        ServiceError::Transport(err.to_string())
    }
}
