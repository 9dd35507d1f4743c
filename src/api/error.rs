use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Article not found!")]
    ArticleNotFound,

    #[error("Article not found or not enough data for recommendations.")]
    NoRecommendations,

    #[error("Summarization failed: {0}")]
    Summarization(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ArticleNotFound | ApiError::NoRecommendations => StatusCode::NOT_FOUND,
            ApiError::Summarization(detail) => {
                tracing::error!(error = %detail, "summarizer failed");
                StatusCode::BAD_GATEWAY
            }
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::ArticleNotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::NoRecommendations.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Summarization("timeout".into()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::Summarization("timeout".into()).to_string(), "Summarization failed: timeout");
    }
}
