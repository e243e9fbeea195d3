//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::Config;
use crate::neo::NeoClient;
use crate::pipeline::Pipeline;

/// Shared, read-only state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub neo: Arc<NeoClient>,
    pub nasa_key_configured: bool,
    pub ai_available: bool,
}

impl AppState {
    pub fn new(pipeline: Pipeline, neo: NeoClient, cfg: &Config) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            neo: Arc::new(neo),
            nasa_key_configured: cfg.nasa_api_key.is_some(),
            ai_available: cfg.ai_available(),
        }
    }
}
