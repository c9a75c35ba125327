use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Word cloud generation error: {0}")]
    WordCloud(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::WordCloud(_) => StatusCode::BAD_REQUEST,
            AppError::Api(_) | AppError::EmptyResponse | AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("missing text".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::EmptyResponse.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Api("500: boom".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Config("no key".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_empty_response_message() {
        assert_eq!(AppError::EmptyResponse.to_string(), "Empty response from API");
    }
}
