use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::config_manager::Config;
use crate::error::Result;
use crate::llm::{StatelessLLMFactory, StatelessLLMInterface};
use crate::sentiment::SentimentAnalyzer;
use crate::translate::Translator;

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: Arc<dyn StatelessLLMInterface>,
    pub translator: Translator,
    pub sentiment: SentimentAnalyzer,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.system_config.request_timeout_secs);
        let llm = StatelessLLMFactory::create_llm(&config.llm_config, timeout)?;
        Ok(Self::with_llm(config, llm))
    }

    /// Build state around an already constructed model client
    pub fn with_llm(config: Config, llm: Arc<dyn StatelessLLMInterface>) -> Self {
        let translator = Translator::new(
            llm.clone(),
            config.llm_config.translation_generation.clone(),
        );
        let sentiment = SentimentAnalyzer::new(
            llm.clone(),
            config.llm_config.sentiment_generation.clone(),
        );

        Self {
            config: Arc::new(config),
            llm,
            translator,
            sentiment,
        }
    }

    pub fn generate_client_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
