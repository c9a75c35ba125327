use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::stateless_llm_interface::{GenerationConfig, StatelessLLMInterface};
use crate::error::{AppError, Result};

/// Replays canned replies in order and records every prompt it receives.
/// `Err` entries become `AppError::Api`.
pub struct ScriptedLLM {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    pub calls: Mutex<Vec<(String, Option<GenerationConfig>)>>,
}

impl ScriptedLLM {
    pub fn new(replies: Vec<std::result::Result<&str, &str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }
}

#[async_trait]
impl StatelessLLMInterface for ScriptedLLM {
    async fn generate_content(
        &self,
        prompt: &str,
        generation_config: Option<&GenerationConfig>,
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), generation_config.cloned()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(AppError::Api(msg)),
            None => Err(AppError::Api("script exhausted".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
