use serde::{Deserialize, Serialize};

use crate::config_manager::llm::LlmConfig;
use crate::config_manager::system::SystemConfig;
use crate::config_manager::ui::{UiConfig, WordCloudConfig};

/// Main configuration for the application.
///
/// Every section has defaults, so an empty document (or no file at all)
/// yields a runnable configuration that reads the API key from the
/// environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "@context")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,

    #[serde(default)]
    pub system_config: SystemConfig,

    #[serde(default)]
    pub llm_config: LlmConfig,

    #[serde(default)]
    pub ui_config: UiConfig,

    #[serde(default)]
    pub word_cloud_config: WordCloudConfig,
}

impl Config {
    /// Load configuration from a YAML, JSON or JSON-LD file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        use crate::config_manager::utils::{read_config_value, validate_config};
        let value = read_config_value(path)?;
        validate_config(&value)
    }
}
