use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::gemini_llm::GeminiLLM;
use super::openai_compatible_llm::OpenAICompatibleLLM;
use super::stateless_llm_interface::StatelessLLMInterface;
use crate::config_manager::llm::{LlmConfig, API_KEY_ENV};
use crate::error::{AppError, Result};

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create the LLM selected by `llm_provider`.
    ///
    /// A provider without a usable API key is a configuration error.
    pub fn create_llm(config: &LlmConfig, timeout: Duration) -> Result<Arc<dyn StatelessLLMInterface>> {
        Self::create_llm_with_env(config, timeout, |name| std::env::var(name).ok())
    }

    /// Like `create_llm`, reading environment variables through `env`
    pub fn create_llm_with_env<F>(
        config: &LlmConfig,
        timeout: Duration,
        env: F,
    ) -> Result<Arc<dyn StatelessLLMInterface>>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Initializing LLM: {}", config.llm_provider);

        match config.llm_provider.as_str() {
            "gemini_llm" => {
                let gemini = &config.gemini_llm;
                let api_key = gemini.api_key_with(&env).ok_or_else(|| {
                    AppError::Config(format!(
                        "No API key for gemini_llm. Set {} or llm_config.gemini_llm.llm_api_key.",
                        API_KEY_ENV
                    ))
                })?;
                Ok(Arc::new(GeminiLLM::new(
                    gemini.base_url.clone(),
                    gemini.model.clone(),
                    api_key,
                    timeout,
                )?))
            }
            "openai_compatible_llm" => {
                let openai = config.openai_compatible_llm.as_ref().ok_or_else(|| {
                    AppError::Config("llm_config.openai_compatible_llm is not configured".to_string())
                })?;
                let api_key = openai.api_key_with(&env).ok_or_else(|| {
                    AppError::Config("No API key for openai_compatible_llm".to_string())
                })?;
                Ok(Arc::new(OpenAICompatibleLLM::new(
                    openai.model.clone(),
                    openai.base_url.clone(),
                    api_key,
                    openai.organization_id.clone(),
                    timeout,
                )?))
            }
            other => Err(AppError::Config(format!("Unsupported LLM provider: {}", other))),
        }
    }
}
