use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::analysis::{run_analysis, SentimentPanel};
use crate::config_manager::all_languages;
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslateResponse};
use crate::ui::{render_page, FormState, InputMethod};
use crate::utils::encoding::decode_text;
use crate::wordcloud::generate_word_cloud;

/// Room for the non-file multipart fields on top of the upload limit
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let system_config = &state.config.system_config;

    Router::new()
        // HTML front end
        .route("/", get(index))
        .route("/translate", post(translate_form))

        // WebSocket
        .route("/client-ws", get(websocket_handler))

        // Health check
        .route("/api/health", get(health_check))

        // JSON API
        .route("/api/languages", get(get_languages))
        .route("/api/translate", post(api_translate))
        .route("/api/sentiment", post(api_sentiment))
        .route("/api/wordcloud", post(api_wordcloud))
        .route("/api/analyze", post(api_analyze))
        .route("/api/upload", post(api_upload))

        // Static file serving
        .nest_service("/static", ServeDir::new(system_config.static_path()))
        .layer(DefaultBodyLimit::max(
            system_config.max_upload_bytes + FORM_OVERHEAD_BYTES,
        ))
}

async fn websocket_handler(
    ws: axum::extract::ws::WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    crate::websocket::websocket_handler(ws, State(state)).await
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.llm.model_name(),
        "time": Utc::now(),
    }))
}

async fn get_languages() -> Json<Value> {
    Json(json!(all_languages()))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let ui = &state.config.ui_config;
    Html(render_page(ui, &FormState::new(ui), None, &[]))
}

/// Fields of the multipart form posted by the input page
#[derive(Debug, Default)]
struct SubmittedForm {
    input_method: InputMethod,
    text: Option<String>,
    source_lang: Option<String>,
    target_lang: Option<String>,
    file: Option<UploadedFile>,
}

#[derive(Debug)]
struct UploadedFile {
    filename: String,
    text: String,
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid form data: {}", e))
}

/// Only `.txt` uploads are accepted; content is decoded with encoding detection
fn read_upload(filename: &str, bytes: &[u8]) -> Result<UploadedFile> {
    if !filename.to_lowercase().ends_with(".txt") {
        return Err(AppError::Validation(format!(
            "Unsupported file '{}': only .txt files are accepted",
            filename
        )));
    }
    Ok(UploadedFile {
        filename: filename.to_string(),
        text: decode_text(bytes),
    })
}

async fn read_form(mut multipart: Multipart) -> Result<SubmittedForm> {
    let mut form = SubmittedForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers post an empty part when no file was picked
                if !filename.is_empty() || !bytes.is_empty() {
                    form.file = Some(read_upload(&filename, &bytes)?);
                }
            }
            "input_method" => {
                let value = field.text().await.map_err(multipart_error)?;
                form.input_method = if value == "upload" {
                    InputMethod::Upload
                } else {
                    InputMethod::Type
                };
            }
            "text" => form.text = Some(field.text().await.map_err(multipart_error)?),
            "source_lang" => form.source_lang = Some(field.text().await.map_err(multipart_error)?),
            "target_lang" => form.target_lang = Some(field.text().await.map_err(multipart_error)?),
            other => warn!("Ignoring unexpected form field: {}", other),
        }
    }

    Ok(form)
}

async fn translate_form(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let ui = &state.config.ui_config;
    let mut form_state = FormState::new(ui);

    let submitted = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            return Html(render_page(ui, &form_state, None, &[e.to_string()]));
        }
    };

    form_state.input_method = submitted.input_method;
    if let Some(lang) = submitted.source_lang {
        form_state.source_lang = lang;
    }
    if let Some(lang) = submitted.target_lang {
        form_state.target_lang = lang;
    }
    form_state.text = match submitted.input_method {
        InputMethod::Type => submitted.text.unwrap_or_default(),
        // A resubmitted result page carries the earlier upload in the textarea
        InputMethod::Upload => submitted
            .file
            .map(|f| f.text)
            .or(submitted.text)
            .unwrap_or_default(),
    };

    // Nothing to do until there is text
    if form_state.text.trim().is_empty() {
        return Html(render_page(ui, &form_state, None, &[]));
    }

    let request = TranslateRequest {
        text: form_state.text.clone(),
        source_lang: form_state.source_lang.clone(),
        target_lang: form_state.target_lang.clone(),
    };
    match run_analysis(&state, &request, None).await {
        Ok(report) => Html(render_page(ui, &form_state, Some(&report), &[])),
        Err(e) => Html(render_page(ui, &form_state, None, &[e.to_string()])),
    }
}

async fn api_translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    let translated_text = state
        .translator
        .translate(&request.text, &request.source_lang, &request.target_lang)
        .await?;
    Ok(Json(TranslateResponse {
        translated_text,
        source_lang: request.source_lang,
        target_lang: request.target_lang,
    }))
}

#[derive(Debug, Deserialize)]
struct SentimentRequest {
    text: String,
    #[serde(default = "default_lang")]
    lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

async fn api_sentiment(
    State(state): State<AppState>,
    Json(request): Json<SentimentRequest>,
) -> Result<Json<Value>> {
    let parsed = state.sentiment.analyze(&request.text, &request.lang).await?;
    let mut body = serde_json::to_value(SentimentPanel::from(parsed.record))?;
    body["warning"] = json!(parsed.warning);
    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
struct WordCloudRequest {
    text: String,
}

async fn api_wordcloud(
    State(state): State<AppState>,
    Json(request): Json<WordCloudRequest>,
) -> Result<Response> {
    let cloud = generate_word_cloud(&request.text, &state.config.word_cloud_config)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], cloud.to_svg()).into_response())
}

async fn api_analyze(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<Value>> {
    let report = run_analysis(&state, &request, None).await?;
    info!("Analysis finished with {} error(s)", report.errors.len());

    let mut body = serde_json::to_value(&report)?;
    body["original_word_cloud"] = json!(report.original_cloud.as_ref().map(|c| c.to_svg()));
    body["translated_word_cloud"] = json!(report.translated_cloud.as_ref().map(|c| c.to_svg()));
    Ok(Json(body))
}

async fn api_upload(mut multipart: Multipart) -> Result<Json<Value>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            let upload = read_upload(&filename, &bytes)?;
            return Ok(Json(json!({
                "filename": upload.filename,
                "text": upload.text,
            })));
        }
    }

    Err(AppError::Validation("No text file provided".to_string()))
}
