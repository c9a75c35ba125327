use serde::Deserialize;

use super::components::{
    render_error, render_header, render_language_selector, render_sentiment_panel,
    render_text_input, render_word_cloud,
};
use crate::analysis::{AnalysisReport, SentimentPanel};
use crate::config_manager::UiConfig;
use crate::utils::html::escape;
use crate::wordcloud::WordCloud;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Type,
    Upload,
}

/// What the user entered, echoed back into the form
#[derive(Debug, Clone)]
pub struct FormState {
    pub input_method: InputMethod,
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl FormState {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            input_method: InputMethod::Type,
            text: String::new(),
            source_lang: ui.default_source_lang.clone(),
            target_lang: ui.default_target_lang.clone(),
        }
    }
}

fn two_columns(left: &str, right: &str) -> String {
    format!(
        r#"<div class="columns"><div class="column">{}</div><div class="column">{}</div></div>"#,
        left, right
    )
}

fn sentiment_column(title: &str, panel: Option<&SentimentPanel>) -> String {
    let body = panel.map(render_sentiment_panel).unwrap_or_default();
    format!("<h3>{}</h3>{}", title, body)
}

fn cloud_column(title: &str, cloud: Option<&WordCloud>) -> String {
    let body = cloud.map(render_word_cloud).unwrap_or_default();
    format!("<h3>{}</h3>{}", title, body)
}

fn render_report(report: &AnalysisReport) -> String {
    let Some(translated) = report.translated_text.as_deref() else {
        return String::new();
    };

    let mut html = format!(
        r#"<section><h2>🔄 Translation</h2><label>Translated Text:<textarea readonly rows="7">{}</textarea></label></section>"#,
        escape(translated)
    );

    html.push_str("<section><h2>😊 Sentiment Analysis</h2>");
    html.push_str(&two_columns(
        &sentiment_column("Original Text", report.original_sentiment.as_ref()),
        &sentiment_column("Translated Text", report.translated_sentiment.as_ref()),
    ));
    html.push_str("</section>");

    html.push_str("<section><h2>☁️ Word Cloud</h2>");
    html.push_str(&two_columns(
        &cloud_column("Original Text", report.original_cloud.as_ref()),
        &cloud_column("Translated Text", report.translated_cloud.as_ref()),
    ));
    html.push_str("</section>");
    html
}

/// The whole page: header, input form, then messages and results if any
pub fn render_page(
    ui: &UiConfig,
    form: &FormState,
    report: Option<&AnalysisReport>,
    messages: &[String],
) -> String {
    let layout = if ui.layout == "centered" { "centered" } else { "wide" };

    let languages = two_columns(
        &render_language_selector("source_lang", "Source Language", &form.source_lang),
        &render_language_selector("target_lang", "Target Language", &form.target_lang),
    );

    let mut body = String::new();
    body.push_str(&render_header(ui));
    body.push_str(&format!(
        r#"<section><h2>📝 Input Text</h2><form method="post" action="/translate" enctype="multipart/form-data">{input}{languages}<button type="submit">Translate</button></form></section>"#,
        input = render_text_input(form.input_method, &form.text),
        languages = languages,
    ));

    for message in messages {
        body.push_str(&render_error(message));
    }
    if let Some(report) = report {
        for message in &report.errors {
            body.push_str(&render_error(message));
        }
        body.push_str(&render_report(report));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon}</text></svg>">
<link rel="stylesheet" href="/static/style.css">
</head>
<body class="{layout}">
<main>{body}</main>
</body>
</html>
"#,
        title = escape(&ui.page_title),
        icon = escape(&ui.page_icon),
        layout = layout,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentRecord;
    use chrono::Utc;

    fn report(translated: Option<&str>, errors: Vec<String>) -> AnalysisReport {
        AnalysisReport {
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            original_text: "Hello".to_string(),
            translated_text: translated.map(str::to_string),
            original_sentiment: Some(SentimentPanel::from(SentimentRecord::fallback())),
            translated_sentiment: None,
            original_cloud: None,
            translated_cloud: None,
            errors,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_form_has_no_results() {
        let ui = UiConfig::default();
        let html = render_page(&ui, &FormState::new(&ui), None, &[]);
        assert!(html.contains("<title>Language Translation &amp; Sentiment Analysis</title>"));
        assert!(html.contains("📝 Input Text"));
        assert!(!html.contains("🔄 Translation"));
        assert!(html.contains("<select name=\"source_lang\">"));
        assert!(html.contains("<select name=\"target_lang\">"));
        assert!(!html.contains(r#"type="hidden""#));
        assert!(html.contains(r#"<body class="wide">"#));
    }

    #[test]
    fn test_results_render_sections() {
        let ui = UiConfig::default();
        let mut form = FormState::new(&ui);
        form.text = "Hello".to_string();
        let html = render_page(&ui, &form, Some(&report(Some("Hola"), vec![])), &[]);
        assert!(html.contains("<select name=\"source_lang\">"));
        assert!(html.contains("🔄 Translation"));
        assert!(html.contains(">Hola</textarea>"));
        assert!(html.contains("😊 Sentiment Analysis"));
        assert!(html.contains("☁️ Word Cloud"));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_failed_translation_shows_only_error() {
        let ui = UiConfig::default();
        let mut form = FormState::new(&ui);
        form.text = "Hello".to_string();
        let errors = vec!["Translation error: API error: <quota>".to_string()];
        let html = render_page(&ui, &form, Some(&report(None, errors)), &[]);
        assert!(html.contains("Translation error: API error: &lt;quota&gt;"));
        assert!(!html.contains("🔄 Translation"));
        assert!(!html.contains("😊 Sentiment Analysis"));
    }
}
