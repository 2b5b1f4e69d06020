use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Request-level error taxonomy. Every variant maps to exactly one status
/// code and a `{"message": ...}` JSON body the client surfaces verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input, including duplicate unique fields.
    #[error("{0}")]
    Validation(String),
    /// Bad credentials or an invalid/expired token.
    #[error("{0}")]
    Auth(String),
    /// Valid identity, but the record belongs to someone else. The message
    /// never distinguishes ownership from existence.
    #[error("Not authorized")]
    NotAuthorized,
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        ApiError::Auth(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) | ApiError::NotAuthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(err) => {
                error!(error = %err, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::auth("Invalid credentials").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NotAuthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::not_found("Expense not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn ownership_error_message_is_generic() {
        assert_eq!(ApiError::NotAuthorized.to_string(), "Not authorized");
    }

    #[test]
    fn internal_error_body_hides_the_cause() {
        let body = serde_json::to_string(&ErrorBody {
            message: "Internal server error".into(),
        })
        .unwrap();
        assert_eq!(body, r#"{"message":"Internal server error"}"#);
    }
}
