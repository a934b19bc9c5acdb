use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::StorageError;
use crate::validation::ValidationError;

pub const ARTICLE_NOT_FOUND: &str = "Article not found";
pub const INVALID_ARTICLE_ID: &str = "Invalid article id";

/// JSON envelope for user-facing failures: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Every way a request can fail once it reaches an article handler.
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Body present but not a JSON object of the expected shape.
    #[error("Invalid request payload: {0}")]
    Decode(String),

    /// Body could not be read at all (client abort, size limit).
    #[error("Failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    /// `{id}` path segment is not an integer.
    #[error("Invalid article id: {0}")]
    InvalidId(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("Article not found")]
    NotFound,

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ApiError::NotFound,
            other => ApiError::Storage(other),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Decode(detail) => {
                tracing::warn!(error = %detail, "Request payload rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorMessage::new(format!("Invalid request payload: {detail}"))),
                )
                    .into_response()
            }
            ApiError::Body(rejection) => {
                tracing::warn!(error = %rejection, "Request body could not be read");
                rejection.into_response()
            }
            ApiError::InvalidId(raw) => {
                tracing::warn!(id = %raw, "Article id rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorMessage::new(INVALID_ARTICLE_ID)),
                )
                    .into_response()
            }
            ApiError::Validation(errors) => {
                tracing::warn!(fields = errors.len(), "Article validation failed");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::NotFound | ApiError::Storage(StorageError::NotFound) => (
                StatusCode::NOT_FOUND,
                Json(ErrorMessage::new(ARTICLE_NOT_FOUND)),
            )
                .into_response(),
            // The cause stays in the logs; clients only see the status.
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "Storage failure");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
    }

    #[tokio::test]
    async fn not_found_uses_message_envelope() {
        let resp = ApiError::from(StorageError::NotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, r#"{"message":"Article not found"}"#);
    }

    #[tokio::test]
    async fn database_failure_is_500_with_empty_body() {
        let err = ApiError::from(StorageError::Database(sqlx::Error::PoolClosed));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn validation_errors_serialize_as_key_error_list() {
        let err = ApiError::Validation(vec![ValidationError::required("title")]);
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(resp).await,
            r#"[{"key":"title","error":"Field validation for 'title' failed on the 'required' tag"}]"#
        );
    }

    #[tokio::test]
    async fn decode_error_is_400_with_message() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{")
            .map_err(ApiError::from)
            .expect_err("truncated JSON must not parse");
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorMessage =
            serde_json::from_str(&body_string(resp).await).expect("error body is JSON");
        assert!(body.message.starts_with("Invalid request payload"));
    }
}
