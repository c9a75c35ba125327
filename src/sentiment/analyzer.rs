use std::sync::Arc;
use tracing::info;

use super::parser::{parse_sentiment, ParsedSentiment};
use crate::error::{AppError, Result};
use crate::llm::{GenerationConfig, StatelessLLMInterface};
use crate::translate::translator::lookup_language;

/// Asks the model for a JSON sentiment verdict and parses it
#[derive(Clone)]
pub struct SentimentAnalyzer {
    llm: Arc<dyn StatelessLLMInterface>,
    generation_config: Option<GenerationConfig>,
}

impl SentimentAnalyzer {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>, generation_config: Option<GenerationConfig>) -> Self {
        Self {
            llm,
            generation_config,
        }
    }

    pub async fn analyze(&self, text: &str, lang: &str) -> Result<ParsedSentiment> {
        let lang_name = lookup_language(lang)?;
        self.analyze_named(text, lang_name).await
    }

    /// API failures are errors; an unparseable reply is not, it yields the
    /// fallback record plus a warning.
    pub async fn analyze_named(&self, text: &str, lang_name: &str) -> Result<ParsedSentiment> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Text to analyze is empty".to_string()));
        }

        info!("Analyzing sentiment of {} chars of {}", text.chars().count(), lang_name);
        let prompt = build_sentiment_prompt(text, lang_name);
        let reply = self
            .llm
            .generate_content(&prompt, self.generation_config.as_ref())
            .await?;

        Ok(parse_sentiment(&reply))
    }
}

pub fn build_sentiment_prompt(text: &str, lang_name: &str) -> String {
    format!(
        r#"You are a sentiment analysis expert. Analyze the sentiment of the following text in {lang}.
Text: "{text}"

Return ONLY a JSON object with this exact structure, and ensure it's valid JSON:
{{
    "sentiment": "positive/negative/neutral",
    "score": "0.0",
    "confidence": "0.0",
    "explanation": "brief explanation"
}}

Rules:
- sentiment must be exactly one of: "positive", "negative", or "neutral"
- score must be a number between -1 and 1
- confidence must be a number between 0 and 1
- explanation must be a brief string
- Format must be exact valid JSON
"#,
        lang = lang_name,
        text = text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted_llm::ScriptedLLM;
    use crate::sentiment::types::{Sentiment, SentimentRecord};

    #[test]
    fn test_prompt_shape() {
        let prompt = build_sentiment_prompt("Me encanta.", "Spanish");
        assert!(prompt.contains("following text in Spanish."));
        assert!(prompt.contains("Text: \"Me encanta.\""));
        assert!(prompt.contains("\"sentiment\": \"positive/negative/neutral\","));
        assert!(prompt.contains("score must be a number between -1 and 1"));
    }

    #[tokio::test]
    async fn test_analyze_fenced_reply() {
        let llm = Arc::new(ScriptedLLM::new(vec![Ok(
            "```json\n{\"sentiment\": \"positive\", \"score\": \"0.8\", \"confidence\": \"0.95\", \"explanation\": \"Expresses love.\"}\n```",
        )]));
        let analyzer = SentimentAnalyzer::new(llm.clone(), None);

        let parsed = analyzer.analyze("Me encanta.", "es").await.unwrap();
        assert!(parsed.warning.is_none());
        assert_eq!(parsed.record.sentiment, Sentiment::Positive);
        assert_eq!(parsed.record.score, 0.8);

        let calls = llm.calls.lock().unwrap();
        assert!(calls[0].0.contains("text in Spanish"));
        assert_eq!(calls[0].1, None);
    }

    #[tokio::test]
    async fn test_garbage_reply_falls_back() {
        let llm = Arc::new(ScriptedLLM::new(vec![Ok("I think it's happy")]));
        let analyzer = SentimentAnalyzer::new(llm, None);
        let parsed = analyzer.analyze("Happy", "en").await.unwrap();
        assert_eq!(parsed.record, SentimentRecord::fallback());
        assert!(parsed.warning.unwrap().starts_with("Invalid JSON response from API:"));
    }

    #[tokio::test]
    async fn test_api_failure_is_error() {
        let llm = Arc::new(ScriptedLLM::new(vec![Err("503 unavailable")]));
        let analyzer = SentimentAnalyzer::new(llm, None);
        assert!(analyzer.analyze("Happy", "en").await.is_err());
    }
}
