use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{ScoringError, StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Scoring(ScoringError),
    Validation(ValidationErrors),
    BadRequest(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Scoring(e) => write!(f, "Scoring error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, body) = match &self {
            Self::Storage(e) => return storage_response(e),
            // Each rejection keeps its own code so the client can tell which
            // precondition failed.
            Self::Scoring(ScoringError::RoundClosed) => (
                StatusCode::CONFLICT,
                json!({ "error": "Round is not accepting scores", "code": "round_closed" }),
            ),
            Self::Scoring(ScoringError::NotEnrolled) => (
                StatusCode::FORBIDDEN,
                json!({ "error": "Player is not enrolled in this season", "code": "not_enrolled" }),
            ),
            Self::Scoring(ScoringError::DuplicateSubmission) => (
                StatusCode::CONFLICT,
                json!({ "error": "Player already has a score for this round", "code": "duplicate_submission" }),
            ),
            Self::Scoring(ScoringError::InvalidScore(raw)) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": format!("Raw score {raw} is outside the valid range of 50 to 150"),
                    "code": "invalid_score"
                }),
            ),
            Self::Scoring(ScoringError::Storage(e)) => return storage_response(e),
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Validation failed", "details": field_errors }),
                )
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        };

        (status_code, Json(body)).into_response()
    }
}

fn storage_response(error: &StorageError) -> Response {
    match error {
        StorageError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Resource not found" })),
        )
            .into_response(),
        StorageError::ConstraintViolation(msg) => {
            (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
        }
        other => {
            tracing::error!("Storage error: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An internal error occurred" })),
            )
                .into_response()
        }
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ScoringError> for WebError {
    fn from(error: ScoringError) -> Self {
        Self::Scoring(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}
