//! Main settings module

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use voice_relay_pipeline::OrchestratorConfig;
use voice_relay_services::{
    RecognizerConfig, RecognizerProvider, RefinerConfig, RefinerProvider, TranslatorConfig,
    TranslatorProvider,
};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Pipeline configuration (languages, register, audio format)
    #[serde(default)]
    pub pipeline: OrchestratorConfig,

    /// Speech recognition service
    #[serde(default)]
    pub recognizer: RecognizerConfig,

    /// Text refinement service
    #[serde(default)]
    pub refiner: RefinerConfig,

    /// Translation service
    #[serde(default)]
    pub translator: TranslatorConfig,
}

impl Settings {
    /// Load settings from defaults, an optional file, and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix("VOICE_RELAY").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Validate settings at startup.
    ///
    /// Unrecoverable misconfiguration (an enabled provider with no way to
    /// reach it) is the one thing that is allowed to stop the process.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.audio_format.sample_width != 2 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.audio_format.sample_width".to_string(),
                message: "only 2-byte (16-bit) PCM is supported".to_string(),
            });
        }

        if self.pipeline.audio_format.sample_rate == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.audio_format.sample_rate".to_string(),
                message: "sample rate must be non-zero".to_string(),
            });
        }

        if matches!(self.refiner.provider, RefinerProvider::Llm) && self.refiner.api_key.is_none() {
            return Err(ConfigError::MissingCredential {
                service: "refiner".to_string(),
                env_var: "VOICE_RELAY__REFINER__API_KEY".to_string(),
            });
        }

        if matches!(self.recognizer.provider, RecognizerProvider::Http)
            && self.recognizer.endpoint.is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "recognizer.endpoint".to_string(),
                message: "endpoint required for http provider".to_string(),
            });
        }

        if matches!(self.translator.provider, TranslatorProvider::Http)
            && self.translator.endpoint.is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "translator.endpoint".to_string(),
                message: "endpoint required for http provider".to_string(),
            });
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// WebSocket path
    #[serde(default = "default_ws_path")]
    pub ws_path: String,

    /// Maximum concurrent connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_ws_path() -> String {
    "/ws".to_string()
}

fn default_max_connections() -> usize {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ws_path: default_ws_path(),
            max_connections: default_max_connections(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.server.ws_path, "/ws");
        assert_eq!(settings.pipeline.source_lang.as_str(), "en");
        assert_eq!(settings.pipeline.dest_lang.as_str(), "ko");
        assert_eq!(settings.pipeline.audio_format.sample_rate, 16_000);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_llm_refiner_requires_key() {
        let mut settings = Settings::default();
        settings.refiner.provider = RefinerProvider::Llm;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingCredential { .. })
        ));

        settings.refiner.api_key = Some("key".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_sample_width() {
        let mut settings = Settings::default();
        settings.pipeline.audio_format.sample_width = 4;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_http_providers_require_endpoints() {
        let mut settings = Settings::default();
        settings.translator.provider = TranslatorProvider::Http;
        settings.translator.endpoint = String::new();
        assert!(settings.validate().is_err());
    }
}
