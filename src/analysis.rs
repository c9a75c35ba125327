use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::sentiment::{sentiment_color, ParsedSentiment, SentimentColor, SentimentRecord};
use crate::state::AppState;
use crate::translate::translator::lookup_language;
use crate::translate::TranslateRequest;
use crate::wordcloud::{generate_word_cloud, WordCloud};

/// Which side of the translation a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSide {
    Original,
    Translated,
}

/// A sentiment record with what the gauge needs to draw it
#[derive(Debug, Clone, Serialize)]
pub struct SentimentPanel {
    #[serde(flatten)]
    pub record: SentimentRecord,
    pub color: SentimentColor,
    /// `score * 100`, on the gauge's -100..100 axis
    pub gauge_value: f64,
}

impl From<SentimentRecord> for SentimentPanel {
    fn from(record: SentimentRecord) -> Self {
        Self {
            color: sentiment_color(record.score),
            gauge_value: record.score * 100.0,
            record,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source_lang: String,
    pub target_lang: String,
    pub original_text: String,
    pub translated_text: Option<String>,
    pub original_sentiment: Option<SentimentPanel>,
    pub translated_sentiment: Option<SentimentPanel>,
    #[serde(skip)]
    pub original_cloud: Option<WordCloud>,
    #[serde(skip)]
    pub translated_cloud: Option<WordCloud>,
    /// User-facing messages, in the order the failures happened
    pub errors: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Progress notifications, sent while an analysis runs
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnalysisEvent {
    Progress { text: String },
    Translation { text: String },
    Sentiment { side: TextSide, sentiment: SentimentPanel },
    WordCloud { side: TextSide, svg: String },
    Error { text: String },
}

fn emit(events: Option<&UnboundedSender<AnalysisEvent>>, event: AnalysisEvent) {
    if let Some(tx) = events {
        // Receiver gone means the client left; the analysis still completes
        let _ = tx.send(event);
    }
}

fn record_error(report: &mut AnalysisReport, events: Option<&UnboundedSender<AnalysisEvent>>, message: String) {
    warn!("{}", message);
    emit(events, AnalysisEvent::Error { text: message.clone() });
    report.errors.push(message);
}

/// Translate, score both texts, then build both word clouds.
///
/// Only invalid input is an `Err`. Every later failure is recorded in
/// `errors`; a failed translation ends the run early.
pub async fn run_analysis(
    state: &AppState,
    request: &TranslateRequest,
    events: Option<&UnboundedSender<AnalysisEvent>>,
) -> Result<AnalysisReport> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("Enter some text to translate".to_string()));
    }
    let source_name = lookup_language(&request.source_lang)?;
    let target_name = lookup_language(&request.target_lang)?;

    info!("Running analysis {} -> {}", request.source_lang, request.target_lang);

    let mut report = AnalysisReport {
        source_lang: request.source_lang.clone(),
        target_lang: request.target_lang.clone(),
        original_text: request.text.clone(),
        translated_text: None,
        original_sentiment: None,
        translated_sentiment: None,
        original_cloud: None,
        translated_cloud: None,
        errors: Vec::new(),
        generated_at: Utc::now(),
    };

    emit(events, AnalysisEvent::Progress { text: "Translating...".to_string() });
    let translated = match state
        .translator
        .translate_named(&request.text, source_name, target_name)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            record_error(&mut report, events, format!("Translation error: {}", e));
            return Ok(report);
        }
    };
    emit(events, AnalysisEvent::Translation { text: translated.clone() });
    report.translated_text = Some(translated.clone());

    for (side, text, lang_name) in [
        (TextSide::Original, request.text.as_str(), source_name),
        (TextSide::Translated, translated.as_str(), target_name),
    ] {
        let progress = match side {
            TextSide::Original => "Analyzing original text...",
            TextSide::Translated => "Analyzing translated text...",
        };
        emit(events, AnalysisEvent::Progress { text: progress.to_string() });

        match state.sentiment.analyze_named(text, lang_name).await {
            Ok(ParsedSentiment { record, warning }) => {
                if let Some(message) = warning {
                    record_error(&mut report, events, message);
                }
                let panel = SentimentPanel::from(record);
                emit(events, AnalysisEvent::Sentiment { side, sentiment: panel.clone() });
                match side {
                    TextSide::Original => report.original_sentiment = Some(panel),
                    TextSide::Translated => report.translated_sentiment = Some(panel),
                }
            }
            Err(e) => record_error(&mut report, events, format!("Sentiment analysis error: {}", e)),
        }
    }

    for (side, text) in [
        (TextSide::Original, request.text.as_str()),
        (TextSide::Translated, translated.as_str()),
    ] {
        match generate_word_cloud(text, &state.config.word_cloud_config) {
            Ok(cloud) => {
                emit(events, AnalysisEvent::WordCloud { side, svg: cloud.to_svg() });
                match side {
                    TextSide::Original => report.original_cloud = Some(cloud),
                    TextSide::Translated => report.translated_cloud = Some(cloud),
                }
            }
            Err(e) => record_error(&mut report, events, e.to_string()),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_manager::Config;
    use crate::llm::scripted_llm::ScriptedLLM;
    use crate::sentiment::Sentiment;
    use std::sync::Arc;

    const POSITIVE: &str = "```json\n{\"sentiment\": \"positive\", \"score\": \"0.8\", \"confidence\": \"0.9\", \"explanation\": \"Happy.\"}\n```";
    const NEGATIVE: &str = r#"{"sentiment": "negative", "score": -0.5, "confidence": 0.7, "explanation": "Sad."}"#;

    fn state(replies: Vec<std::result::Result<&str, &str>>) -> (AppState, Arc<ScriptedLLM>) {
        let llm = Arc::new(ScriptedLLM::new(replies));
        (AppState::with_llm(Config::default(), llm.clone()), llm)
    }

    fn request(text: &str) -> TranslateRequest {
        TranslateRequest {
            text: text.to_string(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
        }
    }

    #[tokio::test]
    async fn test_full_flow() {
        let (state, llm) = state(vec![Ok("Me encanta la programación"), Ok(POSITIVE), Ok(NEGATIVE)]);
        let report = run_analysis(&state, &request("I love programming"), None).await.unwrap();

        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.translated_text.as_deref(), Some("Me encanta la programación"));

        let original = report.original_sentiment.unwrap();
        assert_eq!(original.record.sentiment, Sentiment::Positive);
        assert_eq!(original.color, SentimentColor::Green);
        assert!((original.gauge_value - 80.0).abs() < 1e-9);

        let translated = report.translated_sentiment.unwrap();
        assert_eq!(translated.color, SentimentColor::Red);

        assert!(report.original_cloud.is_some());
        assert!(report.translated_cloud.is_some());

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[1].contains("text in English"));
        assert!(prompts[2].contains("text in Spanish"));
        assert!(prompts[2].contains("Me encanta la programación"));
    }

    #[tokio::test]
    async fn test_translation_failure_stops_early() {
        let (state, llm) = state(vec![Err("quota exceeded")]);
        let report = run_analysis(&state, &request("Hello world"), None).await.unwrap();

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Translation error:"));
        assert!(report.translated_text.is_none());
        assert!(report.original_sentiment.is_none());
        assert!(report.original_cloud.is_none());
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_sentiment_uses_fallback_and_reports() {
        let (state, _) = state(vec![Ok("Hola mundo"), Ok("not json at all"), Ok(NEGATIVE)]);
        let report = run_analysis(&state, &request("Hello world"), None).await.unwrap();

        let original = report.original_sentiment.unwrap();
        assert_eq!(original.record, SentimentRecord::fallback());
        assert_eq!(original.color, SentimentColor::Gray);
        assert_eq!(
            report.errors,
            vec!["Invalid JSON response from API: not json at all".to_string()]
        );
    }

    #[tokio::test]
    async fn test_sentiment_api_error_leaves_panel_empty() {
        let (state, _) = state(vec![Ok("Hola mundo"), Ok(POSITIVE), Err("boom")]);
        let report = run_analysis(&state, &request("Hello world"), None).await.unwrap();

        assert!(report.original_sentiment.is_some());
        assert!(report.translated_sentiment.is_none());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Sentiment analysis error:"));
    }

    #[tokio::test]
    async fn test_events_follow_ui_order() {
        let (state, _) = state(vec![Ok("Hola mundo"), Ok(POSITIVE), Ok(NEGATIVE)]);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        run_analysis(&state, &request("Hello world"), Some(&tx)).await.unwrap();
        drop(tx);

        let mut kinds = Vec::new();
        while let Some(event) = rx.recv().await {
            let json = serde_json::to_value(&event).unwrap();
            kinds.push(json["type"].as_str().unwrap().to_string());
        }
        assert_eq!(
            kinds,
            vec![
                "progress", "translation", "progress", "sentiment", "progress", "sentiment",
                "word-cloud", "word-cloud"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let (state, llm) = state(vec![]);
        let err = run_analysis(&state, &request("   "), None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(llm.prompts().is_empty());
    }
}
