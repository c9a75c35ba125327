use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sampling parameters forwarded to the model. Unset fields use the
/// provider's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Interface for a stateless language model.
/// Stateless means every call carries its whole prompt; nothing is remembered
/// between calls.
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Send one prompt and return the model's complete text reply
    async fn generate_content(
        &self,
        prompt: &str,
        generation_config: Option<&GenerationConfig>,
    ) -> Result<String>;

    /// Model identifier, for logs and the health endpoint
    fn model_name(&self) -> &str;
}
