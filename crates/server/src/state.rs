//! Application state
//!
//! Shared state across all handlers.

use std::sync::Arc;

use voice_relay_config::Settings;
use voice_relay_pipeline::TranslationOrchestrator;
use voice_relay_services::{create_recognizer, create_refiner, create_translator};

use crate::registry::ConnectionRegistry;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<Settings>,
    /// Active subscriber set
    pub registry: Arc<ConnectionRegistry>,
    /// Chunk pipeline, shared read-only by every connection task
    pub orchestrator: Arc<TranslationOrchestrator>,
}

impl AppState {
    /// Create application state, wiring providers from config
    pub fn new(config: Settings) -> Self {
        let recognizer = create_recognizer(&config.recognizer);
        let refiner = create_refiner(&config.refiner);
        let translator = create_translator(&config.translator);

        let orchestrator = TranslationOrchestrator::new(
            recognizer,
            refiner,
            translator,
            config.pipeline.clone(),
        );

        Self {
            config: Arc::new(config),
            registry: Arc::new(ConnectionRegistry::new()),
            orchestrator: Arc::new(orchestrator),
        }
    }
}
