use serde::{Deserialize, Serialize};

use crate::llm::GenerationConfig;

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Which provider to use and how each task drives it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini_llm" or "openai_compatible_llm"
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,

    #[serde(default)]
    pub gemini_llm: GeminiConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_compatible_llm: Option<OpenAICompatibleConfig>,

    /// Sampling parameters for translation requests
    #[serde(default = "default_translation_generation")]
    pub translation_generation: GenerationConfig,

    /// Sampling parameters for sentiment requests; model defaults when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_generation: Option<GenerationConfig>,
}

fn default_llm_provider() -> String {
    "gemini_llm".to_string()
}

fn default_translation_generation() -> GenerationConfig {
    GenerationConfig {
        temperature: Some(0.1),
        top_p: Some(0.8),
        top_k: Some(40),
        max_output_tokens: Some(1024),
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            gemini_llm: GeminiConfig::default(),
            openai_compatible_llm: None,
            translation_generation: default_translation_generation(),
            sentiment_generation: None,
        }
    }
}

/// Configuration for the Gemini generateContent API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub model: String,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            llm_api_key: None,
            model: default_gemini_model(),
        }
    }
}

impl GeminiConfig {
    /// Configured key, falling back to `GEMINI_API_KEY` as seen by `env`.
    ///
    /// A `${VAR}` placeholder left over from an unset variable counts as
    /// unconfigured.
    pub fn api_key_with<F>(&self, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve_api_key_with(self.llm_api_key.as_deref(), env)
    }
}

/// Configuration for OpenAI-compatible providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAICompatibleConfig {
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_api_key: Option<String>,

    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl OpenAICompatibleConfig {
    pub fn api_key_with<F>(&self, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve_api_key_with(self.llm_api_key.as_deref(), env)
    }
}

fn resolve_api_key_with<F>(configured: Option<&str>, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .map(str::trim)
        .filter(|key| !key.is_empty() && !key.starts_with("${"))
        .map(str::to_string)
        .or_else(|| env(API_KEY_ENV).filter(|key| !key.trim().is_empty()))
}
