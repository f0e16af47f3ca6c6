//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs its parameters and basic result info.
//!
//! JSON bodies are extracted as `Result<Json<_>, JsonRejection>` so malformed or
//! wrongly typed input surfaces as a 400 with the usual `{ "error": ... }` body.

use std::sync::Arc;
use axum::{
  body::Bytes,
  extract::{rejection::JsonRejection, Path, Query, State},
  Json,
  response::IntoResponse,
};
use tracing::{info, instrument, warn};

use crate::error::InterviewError;
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

fn rejected(rejection: JsonRejection, into: fn(String) -> InterviewError) -> InterviewError {
  warn!(target: "interview_backend", status = %rejection.status(), "Rejected request body");
  into(rejection.body_text())
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(kind = ?q.kind, difficulty = ?q.difficulty))]
pub async fn http_get_questions(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionsQuery>,
) -> Result<Json<QuestionsOut>, InterviewError> {
  let questions = list_questions(&state, q.kind.as_deref(), q.difficulty.as_deref())?;
  info!(target: "interview", count = questions.len(), "HTTP questions served");
  Ok(Json(QuestionsOut { questions }))
}

/// An empty body starts a session with defaults; anything else must be a valid `StartIn`.
#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_start(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<Json<SessionOut>, InterviewError> {
  let req = parse_start_body(&body)?;
  let out = start_interview(&state, req).await?;
  Ok(Json(out))
}

fn parse_start_body(body: &[u8]) -> Result<StartIn, InterviewError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(StartIn::default());
  }
  serde_json::from_slice(body).map_err(|e| InterviewError::InvalidConfiguration(format!("invalid start request: {e}")))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  body: Result<Json<AnswerIn>, JsonRejection>,
) -> Result<Json<AnswerOut>, InterviewError> {
  let Json(body) = body.map_err(|r| rejected(r, InterviewError::InvalidAnswer))?;
  let out = submit_answer(&state, body).await?;
  info!(target: "interview", score = ?out.feedback.as_ref().map(|f| f.score), is_complete = out.is_complete, "HTTP answer evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_results(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<Json<ResultsOut>, InterviewError> {
  let out = interview_results(&state, &session_id).await?;
  info!(target: "interview", %session_id, overall = %format!("{:.1}", out.overall_score), "HTTP results served");
  Ok(Json(out))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_parse_job(body: Result<Json<ParseIn>, JsonRejection>) -> Result<Json<ParseOut>, InterviewError> {
  let Json(body) = body.map_err(|r| rejected(r, InterviewError::InvalidConfiguration))?;
  Ok(Json(parse_job_description(body.description.as_deref())?))
}

#[instrument(level = "info")]
pub async fn http_get_resources() -> impl IntoResponse { Json(resources()) }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_start_body_means_defaults() {
    assert!(parse_start_body(b"").unwrap().kind.is_none());
    assert!(parse_start_body(b"  \n").unwrap().question_count.is_none());
  }

  #[test]
  fn malformed_start_body_is_invalid_configuration() {
    let bodies: [&[u8]; 3] = [br#"{"type":7}"#, br#"{"question_count":2"#, br#"{"question_count":-1,"type":"hr"}"#];
    for body in bodies {
      assert!(matches!(parse_start_body(body), Err(InterviewError::InvalidConfiguration(_))));
    }
  }
}
