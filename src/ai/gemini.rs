use async_trait::async_trait;
use rig::completion::{Chat, Message};
use rig::providers::gemini::Client as GeminiClient;
use tracing::info;

use super::TextGenerator;
use crate::config::Config;
use crate::error::{text_generation_error, AppResult};

const PREAMBLE: &str = "You are an assistant for Japanese business email. Answer in plain Japanese text without markdown.";

/// Text generation backed by Google Gemini through Rig
pub struct GeminiGenerator {
    client: GeminiClient,
    model: String,
}

impl GeminiGenerator {
    /// Create a generator for the given API key and model
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            model: model.to_string(),
        }
    }

    /// Create a generator from application config
    pub fn from_config(config: &Config) -> Self {
        info!("Using Gemini model: {}", config.gemini_model);
        Self::new(&config.gemini_api_key, &config.gemini_model)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(PREAMBLE)
            .temperature(0.3)
            .build();

        let response = agent
            .chat(prompt.to_string(), Vec::<Message>::new())
            .await
            .map_err(|e| text_generation_error(&format!("Gemini request failed: {}", e)))?;

        info!("Received response from Gemini ({} chars)", response.chars().count());
        Ok(response)
    }
}
