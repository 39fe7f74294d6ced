use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::validate::ValidationError;

/// Every failure a handler can answer with. The body is always
/// `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The request body is invalid: {0}")]
    MalformedBody(String),

    #[error("{0}")]
    NotFound(String),

    #[error("The food could not be created")]
    NotCreated,

    /// Store failures. Only the context reaches the client; the cause is
    /// logged where it happens.
    #[error("{context}")]
    Internal { context: String },
}

impl ApiError {
    pub fn internal(context: impl Into<String>) -> Self {
        ApiError::Internal {
            context: context.into(),
        }
    }
}

impl From<BlockingError> for ApiError {
    fn from(e: BlockingError) -> Self {
        log::error!("blocking task failed: {}", e);
        ApiError::internal("The request could not be processed")
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) | ApiError::NotCreated => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            ApiError::from(ValidationError::MissingMacros).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("gone".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::NotCreated.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_message_passes_through() {
        let err = ApiError::from(ValidationError::NotANumber("abc".to_string()));
        assert_eq!(
            err.to_string(),
            "The 'id' parameter must be a valid number. Given id: abc"
        );
    }
}
