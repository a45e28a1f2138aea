//! Typed errors of the game session and of the HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Reasons a guess is refused. None of them change the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// No target, the pool was empty.
    #[error("no players available")]
    NoTarget,

    /// The round was already won or conceded.
    #[error("the round is over, start a new game")]
    RoundOver,

    /// This character was already guessed this round.
    #[error("'{0}' was already guessed")]
    Duplicate(String),
}

/// Errors returned by the HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The dataset is empty (404).
    #[error("no character available")]
    NoCharacters,

    /// Anything else (500).
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NoCharacters => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
