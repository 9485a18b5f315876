use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("vector length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("provider error: {0}")]
    Provider(String),
    #[error("failed to process message: {0}")]
    QueryProcessing(#[source] Box<ApiError>),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }

    pub fn provider<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Provider(err.to_string())
    }

    /// Wraps a pipeline failure so callers see a single aggregate error
    /// with the underlying cause attached.
    pub fn query_processing(cause: ApiError) -> Self {
        ApiError::QueryProcessing(Box::new(cause))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::LengthMismatch { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Provider(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ApiError::QueryProcessing(cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to process message: {}", cause),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_processing_carries_the_cause() {
        let err = ApiError::query_processing(ApiError::Provider("timeout".to_string()));
        let text = err.to_string();
        assert!(text.contains("failed to process message"));
        assert!(text.contains("timeout"));
    }

    #[test]
    fn length_mismatch_reports_both_sizes() {
        let err = ApiError::LengthMismatch { left: 3, right: 5 };
        assert_eq!(err.to_string(), "vector length mismatch: 3 != 5");
    }
}
