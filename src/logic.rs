//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Listing questions by type/difficulty
//!   - Starting a session (run the workflow to its first question, store it)
//!   - Submitting an answer (resume the stored workflow)
//!   - Reporting results
//!   - Parsing job descriptions and serving static resources

use tracing::{info, instrument};

use crate::domain::{DifficultyLevel, InterviewType, Question};
use crate::error::InterviewError;
use crate::feedback::{QUESTIONS_RESOURCE, STAR_RESOURCE};
use crate::job_parser;
use crate::protocol::*;
use crate::state::AppState;
use crate::workflow::{AnswerInput, Progress, DEFAULT_CONFIDENCE, DEFAULT_TIME_SPENT};

#[instrument(level = "info", skip(state))]
pub fn list_questions(state: &AppState, kind: Option<&str>, difficulty: Option<&str>) -> Result<Vec<Question>, InterviewError> {
  let kind = kind.map(str::parse::<InterviewType>).transpose()?.unwrap_or_default();
  let difficulty = difficulty.map(str::parse::<DifficultyLevel>).transpose()?;
  Ok(state.repository().filter_by_type(kind, difficulty))
}

#[instrument(level = "info", skip(state, req), fields(job_role = ?req.job_role, kind = ?req.kind, has_jd = req.job_description_text.is_some()))]
pub async fn start_interview(state: &AppState, req: StartIn) -> Result<SessionOut, InterviewError> {
  let config = req.into_config()?;
  let run = state.workflow.start(config).await?;

  let session = run.session.as_ref().ok_or(InterviewError::SessionNotInitialized)?;
  let out = SessionOut {
    session_id: session.id.clone(),
    current_question: run.current_question.clone(),
    question_presentation: run.context.question_presentation.clone(),
    job_description: run.job_description.clone(),
    research_tips: run.context.research_tips.clone(),
    progress: ProgressOut::from(session),
    is_complete: run.is_finished(),
  };

  state.store.put(&out.session_id, run).await;
  info!(target: "interview", session_id = %out.session_id, total = out.progress.total_questions, "Interview started");
  Ok(out)
}

#[instrument(level = "info", skip(state, req), fields(%req.session_id, %req.question_id, answer_len = req.answer_text.len()))]
pub async fn submit_answer(state: &AppState, req: AnswerIn) -> Result<AnswerOut, InterviewError> {
  let handle = state.store.require(&req.session_id).await?;
  let mut run = handle.lock().await;

  {
    let session = run.session.as_ref().ok_or(InterviewError::SessionNotInitialized)?;
    if session.question(&req.question_id).is_none() {
      return Err(InterviewError::QuestionNotFound(req.question_id));
    }
    if run.is_finished() || session.is_complete() {
      return Err(InterviewError::InvalidAnswer("session is already complete".into()));
    }
    match run.current_question.as_ref() {
      Some(q) if q.id == req.question_id => {}
      Some(q) => {
        return Err(InterviewError::InvalidAnswer(format!(
          "expected an answer to '{}', got '{}'",
          q.id, req.question_id
        )))
      }
      None => return Err(InterviewError::InvalidAnswer("no question is awaiting an answer".into())),
    }
  }

  let confidence = req.confidence.unwrap_or(u32::from(DEFAULT_CONFIDENCE));
  if !(1..=100).contains(&confidence) {
    return Err(InterviewError::InvalidAnswer(format!("confidence must be between 1 and 100, got {confidence}")));
  }
  let input = AnswerInput::new(req.answer_text, req.time_spent.unwrap_or(DEFAULT_TIME_SPENT), confidence as u8);
  let progress = state.workflow.submit(&mut run, input).await?;
  let finished = progress == Progress::Finished;

  let session = run.session.as_ref().ok_or(InterviewError::SessionNotInitialized)?;
  info!(target: "interview", session_id = %session.id, answered = session.answers.len(), total = session.questions.len(), %finished, "Answer recorded");
  Ok(AnswerOut {
    feedback: run.feedback.clone(),
    followup_questions: run.context.followup_questions.clone(),
    next_question: if finished { None } else { run.current_question.clone() },
    question_presentation: if finished { None } else { run.context.question_presentation.clone() },
    progress: ProgressOut::from(session),
    is_complete: session.is_complete(),
    overall_assessment: if finished { run.context.overall_assessment.clone() } else { None },
  })
}

#[instrument(level = "info", skip(state))]
pub async fn interview_results(state: &AppState, session_id: &str) -> Result<ResultsOut, InterviewError> {
  let handle = state.store.require(session_id).await?;
  let run = handle.lock().await;
  let session = run.session.as_ref().ok_or(InterviewError::SessionNotInitialized)?;

  let overall_score = session.average_score().ok_or(InterviewError::NoAnswers)?;
  let detailed_feedback = session
    .answers
    .iter()
    .map(|a| DetailedFeedback {
      question: session.question(&a.question_id).cloned(),
      answer: a.clone(),
      feedback: a.feedback.clone(),
    })
    .collect();

  Ok(ResultsOut {
    session: session.clone(),
    overall_score,
    total_questions: session.questions.len(),
    answered_questions: session.answers.len(),
    overall_assessment: run.context.overall_assessment.clone(),
    detailed_feedback,
  })
}

#[instrument(level = "info", skip(description), fields(text_len = ?description.map(str::len)))]
pub fn parse_job_description(description: Option<&str>) -> Result<ParseOut, InterviewError> {
  let description = description
    .filter(|d| !d.trim().is_empty())
    .ok_or_else(|| InterviewError::InvalidConfiguration("description is required".into()))?;
  let job_info = job_parser::parse(description);
  let research_tips = job_parser::research_tips(&job_info);
  Ok(ParseOut { job_info, research_tips })
}

pub fn resources() -> ResourcesOut {
  let star_method = STAR_RESOURCE.rsplit(' ').next().unwrap_or(STAR_RESOURCE);
  let interview_questions = QUESTIONS_RESOURCE.rsplit(' ').next().unwrap_or(QUESTIONS_RESOURCE);
  ResourcesOut {
    star_method,
    interview_questions,
    salary_negotiation_tips: vec![
      "Research industry standards and company salary ranges before negotiating",
      "Consider the total compensation package, not just base salary",
      "Practice your negotiation conversation beforehand",
      "Be prepared to justify your salary request with specific examples",
      "Know your minimum acceptable offer before starting negotiations",
    ],
    body_language_tips: vec![
      "Maintain good eye contact - shows confidence and engagement",
      "Sit up straight with shoulders back - projects professionalism",
      "Use open gestures - avoid crossing arms or fidgeting",
      "Mirror the interviewer's energy level appropriately",
      "Smile genuinely when appropriate - shows enthusiasm",
    ],
  }
}
