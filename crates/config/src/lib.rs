//! Layered configuration for the voice relay
//!
//! Settings come from three layers, later layers overriding earlier ones:
//! built-in defaults, an optional TOML file, and `VOICE_RELAY__*`
//! environment variables (`__` as the section separator, e.g.
//! `VOICE_RELAY__REFINER__API_KEY`).

mod settings;

pub use settings::{ServerConfig, Settings};

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Build(#[from] config::ConfigError),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("missing credential for {service} (set {env_var})")]
    MissingCredential { service: String, env_var: String },
}
