use std::sync::Arc;

use crate::{
    config::Config,
    gemini::{self, GeminiApi},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gemini: Arc<dyn GeminiApi>,
}

impl AppState {
    pub fn new() -> Self {
        let config = Config::from_env();

        if config.credentials_json.is_none() {
            tracing::warn!("GOOGLE_CREDENTIALS_JSON not set, proxy requests will fail");
        }
        if config.project_id.is_none() {
            tracing::warn!("GOOGLE_PROJECT_ID not set, proxy requests will fail");
        }
        tracing::info!(
            location = %config.location,
            model = %config.model,
            "Using Vertex AI backend"
        );

        let gemini = gemini::vertex(&config.location, &config.model);

        Self { config, gemini }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
