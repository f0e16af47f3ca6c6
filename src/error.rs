//! Error types for the interview core and the enrichment capability.
//!
//! `InterviewError` maps directly onto HTTP statuses; `EnrichError` is always
//! absorbed by the workflow step that raised it.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterviewError {
  /// Unrecognized enum value or otherwise unusable run configuration.
  #[error("invalid configuration: {0}")]
  InvalidConfiguration(String),

  /// Well-formed request that does not fit the session's current position.
  #[error("invalid answer: {0}")]
  InvalidAnswer(String),

  #[error("no answers submitted yet")]
  NoAnswers,

  #[error("session not found: {0}")]
  SessionNotFound(String),

  #[error("question not found: {0}")]
  QuestionNotFound(String),

  /// A stored run without a session; only reachable through a broken invariant.
  #[error("session not initialized")]
  SessionNotInitialized,
}

impl InterviewError {
  pub fn status(&self) -> StatusCode {
    match self {
      InterviewError::InvalidConfiguration(_) | InterviewError::InvalidAnswer(_) | InterviewError::NoAnswers => {
        StatusCode::BAD_REQUEST
      }
      InterviewError::SessionNotFound(_) | InterviewError::QuestionNotFound(_) => StatusCode::NOT_FOUND,
      InterviewError::SessionNotInitialized => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for InterviewError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(target: "interview_backend", error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

/// Failure of the external text-generation call.
#[derive(Debug, Error)]
pub enum EnrichError {
  #[error("enrichment disabled")]
  Disabled,

  #[error("enrichment request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("enrichment service returned HTTP {status}: {message}")]
  Status { status: u16, message: String },

  #[error("enrichment service returned no text")]
  Empty,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statuses_follow_error_kind() {
    assert_eq!(InterviewError::InvalidConfiguration("x".into()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(InterviewError::InvalidAnswer("x".into()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(InterviewError::NoAnswers.status(), StatusCode::BAD_REQUEST);
    assert_eq!(InterviewError::SessionNotFound("x".into()).status(), StatusCode::NOT_FOUND);
    assert_eq!(InterviewError::QuestionNotFound("x".into()).status(), StatusCode::NOT_FOUND);
    assert_eq!(InterviewError::SessionNotInitialized.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
