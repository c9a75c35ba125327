use std::sync::Arc;
use tracing::{debug, info};

use crate::config_manager::language_name;
use crate::error::{AppError, Result};
use crate::llm::{GenerationConfig, StatelessLLMInterface};

/// Prompt-driven translation on top of a stateless model
#[derive(Clone)]
pub struct Translator {
    llm: Arc<dyn StatelessLLMInterface>,
    generation_config: GenerationConfig,
}

impl Translator {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>, generation_config: GenerationConfig) -> Self {
        Self {
            llm,
            generation_config,
        }
    }

    /// Translate `text` between two language codes
    pub async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let source_name = lookup_language(source_lang)?;
        let target_name = lookup_language(target_lang)?;
        self.translate_named(text, source_name, target_name).await
    }

    /// Translate `text` between two language display names
    pub async fn translate_named(&self, text: &str, source_name: &str, target_name: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Text to translate is empty".to_string()));
        }

        info!("Translating {} chars from {} to {}", text.chars().count(), source_name, target_name);
        let prompt = build_translation_prompt(text, source_name, target_name);
        let raw = self
            .llm
            .generate_content(&prompt, Some(&self.generation_config))
            .await?;

        let translated = clean_translation(&raw);
        if translated.is_empty() {
            return Err(AppError::EmptyResponse);
        }
        debug!("Translation produced {} chars", translated.chars().count());
        Ok(translated)
    }
}

pub(crate) fn lookup_language(code: &str) -> Result<&'static str> {
    language_name(code)
        .ok_or_else(|| AppError::Validation(format!("Unsupported language code: {}", code)))
}

pub fn build_translation_prompt(text: &str, source_name: &str, target_name: &str) -> String {
    format!(
        "Translate this exact text from {source} to {target}:\n\
         {text}\n\
         \n\
         Important translation rules:\n\
         1. Translate EVERYTHING, including negative statements\n\
         2. Preserve ALL punctuation and formatting\n\
         3. Keep the same tone and sentiment\n\
         4. Return ONLY the translated text\n\
         5. Do not add explanations or notes\n\
         6. Do not modify or censor the content\n",
        source = source_name,
        target = target_name,
        text = text,
    )
}

/// Trim whitespace, then any quote characters wrapped around the reply
pub fn clean_translation(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted_llm::ScriptedLLM;

    fn sampling() -> GenerationConfig {
        GenerationConfig {
            temperature: Some(0.1),
            top_p: Some(0.8),
            top_k: Some(40),
            max_output_tokens: Some(1024),
        }
    }

    #[test]
    fn test_prompt_contains_languages_and_text() {
        let prompt = build_translation_prompt("I hate rainy Mondays.", "English", "Spanish");
        assert!(prompt.starts_with("Translate this exact text from English to Spanish:\nI hate rainy Mondays.\n"));
        assert!(prompt.contains("Return ONLY the translated text"));
        assert!(prompt.contains("Do not modify or censor the content"));
    }

    #[test]
    fn test_clean_translation_strips_quotes() {
        assert_eq!(clean_translation("  \"Hola mundo\"\n"), "Hola mundo");
        assert_eq!(clean_translation("'Bonjour'"), "Bonjour");
        assert_eq!(clean_translation("\"'mixed'\""), "mixed");
        assert_eq!(clean_translation("It's fine"), "It's fine");
    }

    #[tokio::test]
    async fn test_translate_uses_language_names_and_sampling() {
        let llm = Arc::new(ScriptedLLM::new(vec![Ok("\"Odio los lunes lluviosos.\"")]));
        let translator = Translator::new(llm.clone(), sampling());

        let out = translator.translate("I hate rainy Mondays.", "en", "es").await.unwrap();
        assert_eq!(out, "Odio los lunes lluviosos.");

        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("from English to Spanish"));
        assert_eq!(calls[0].1, Some(sampling()));
    }

    #[tokio::test]
    async fn test_quotes_only_reply_is_empty() {
        let llm = Arc::new(ScriptedLLM::new(vec![Ok(" \"\" ")]));
        let translator = Translator::new(llm, sampling());
        let err = translator.translate("Hello", "en", "fr").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_unknown_language_is_rejected_before_calling() {
        let llm = Arc::new(ScriptedLLM::new(vec![]));
        let translator = Translator::new(llm.clone(), sampling());
        let err = translator.translate("Hello", "en", "xx").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_api_error_propagates() {
        let llm = Arc::new(ScriptedLLM::new(vec![Err("quota exceeded")]));
        let translator = Translator::new(llm, sampling());
        let err = translator.translate("Hello", "en", "de").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
