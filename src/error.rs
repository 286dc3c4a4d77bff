use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum TriviaError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Ractor error: {0}")]
    Actor(String),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for TriviaError {
    fn from(e: figment::Error) -> Self {
        TriviaError::Config(Box::new(e))
    }
}

impl TriviaError {
    pub fn status(&self) -> StatusCode {
        match self {
            TriviaError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TriviaError::NotFound(_) => StatusCode::NOT_FOUND,
            TriviaError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            TriviaError::Database(_)
            | TriviaError::Actor(_)
            | TriviaError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TriviaError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            TriviaError::BadRequest(_) => "Bad request",
            TriviaError::NotFound(_) => "Resource not found",
            TriviaError::MethodNotAllowed => "Method not allowed",
            TriviaError::Database(_)
            | TriviaError::Actor(_)
            | TriviaError::Config(_) => {
                error!(error = %self, "request failed with internal error");
                "Internal server error"
            }
        };
        let body = ApiErrorResponse {
            success: false,
            error: status.as_u16(),
            message: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Uniform error payload shared by every failing route.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}
