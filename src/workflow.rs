//! Interview session state machine.
//!
//! Fixed pipeline per question:
//!
//! ```text
//! parse_job_description -> initialize_session -> select_question -> present_question
//!   -> collect_answer -> generate_feedback -> generate_followup -> check_completion
//!   -> (select_question | finalize_session)
//! ```
//!
//! `check_completion` is the only branching state. `collect_answer` is the only input
//! suspension point: with no pending response the machine pauses there and hands
//! control back to the caller (HTTP handler, console driver, test script).
//! Session state is mutated only in `generate_followup` (append + cursor bump) and
//! `finalize_session`.

use std::sync::Arc;

use chrono::Utc;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::Prompts;
use crate::domain::{Answer, DifficultyLevel, Feedback, InterviewSession, InterviewType, JobDescription, Question};
use crate::enrichment::{enrich_or, Enricher};
use crate::error::InterviewError;
use crate::feedback;
use crate::job_parser;
use crate::repository::QuestionRepository;
use crate::util::fill_template;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const DEFAULT_JOB_ROLE: &str = "Software Engineer";

/// Time and confidence used when a caller supplies only text.
pub const DEFAULT_TIME_SPENT: u32 = 120;
pub const DEFAULT_CONFIDENCE: u8 = 70;

/// States of the machine. `Done` is reached after `FinalizeSession`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
  ParseJobDescription,
  InitializeSession,
  SelectQuestion,
  PresentQuestion,
  CollectAnswer,
  GenerateFeedback,
  GenerateFollowup,
  CheckCompletion,
  FinalizeSession,
  Done,
}

/// Internal marker written by each state; only `CheckCompletion` routes on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Marker {
  Start,
  JobParsed,
  SessionInitialized,
  QuestionSelected,
  InterviewComplete,
  QuestionPresented,
  AnswerCollected,
  FeedbackGenerated,
  FollowupGenerated,
  ContinueInterview,
  SessionFinalized,
}

impl Step {
  fn next(self, marker: Marker) -> Step {
    match self {
      Step::ParseJobDescription => Step::InitializeSession,
      Step::InitializeSession => Step::SelectQuestion,
      Step::SelectQuestion => Step::PresentQuestion,
      Step::PresentQuestion => Step::CollectAnswer,
      Step::CollectAnswer => Step::GenerateFeedback,
      Step::GenerateFeedback => Step::GenerateFollowup,
      Step::GenerateFollowup => Step::CheckCompletion,
      Step::CheckCompletion if marker == Marker::ContinueInterview => Step::SelectQuestion,
      Step::CheckCompletion => Step::FinalizeSession,
      Step::FinalizeSession | Step::Done => Step::Done,
    }
  }
}

/// Caller-supplied configuration for one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
  pub job_role: String,
  pub difficulty: DifficultyLevel,
  #[serde(rename = "type")]
  pub kind: InterviewType,
  pub question_count: usize,
  pub job_description_text: Option<String>,
  /// Fixed seed for the question shuffle; entropy when absent.
  pub shuffle_seed: Option<u64>,
}

impl Default for RunConfig {
  fn default() -> Self {
    Self {
      job_role: DEFAULT_JOB_ROLE.into(),
      difficulty: DifficultyLevel::default(),
      kind: InterviewType::default(),
      question_count: DEFAULT_QUESTION_COUNT,
      job_description_text: None,
      shuffle_seed: None,
    }
  }
}

/// A candidate's response, as delivered by whichever surface collected it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnswerInput {
  pub text: String,
  pub time_spent: u32,
  pub confidence: u8,
}

impl AnswerInput {
  pub fn new(text: impl Into<String>, time_spent: u32, confidence: u8) -> Self {
    Self { text: text.into(), time_spent, confidence }
  }

  pub fn validate(&self) -> Result<(), InterviewError> {
    if !(1..=100).contains(&self.confidence) {
      return Err(InterviewError::InvalidAnswer(format!("confidence must be between 1 and 100, got {}", self.confidence)));
    }
    Ok(())
  }
}

/// Cross-step data for a single run.
#[derive(Clone, Debug, Default)]
pub struct WorkflowContext {
  pub config: RunConfig,
  pub research_tips: Vec<String>,
  pub question_presentation: Option<String>,
  pub followup_questions: Option<String>,
  pub overall_assessment: Option<String>,
  pub pending_answer: Option<AnswerInput>,
}

/// Everything one run of the machine carries between steps.
#[derive(Clone, Debug)]
pub struct WorkflowState {
  pub session: Option<InterviewSession>,
  pub current_question: Option<Question>,
  pub current_answer: Option<Answer>,
  pub feedback: Option<Feedback>,
  pub job_description: Option<JobDescription>,
  pub context: WorkflowContext,
  /// Next state to run.
  pub step: Step,
  /// Completed question iterations.
  pub iterations: usize,
  pub(crate) marker: Marker,
}

impl WorkflowState {
  pub fn new(config: RunConfig) -> Self {
    Self {
      session: None,
      current_question: None,
      current_answer: None,
      feedback: None,
      job_description: None,
      context: WorkflowContext { config, ..Default::default() },
      step: Step::ParseJobDescription,
      iterations: 0,
      marker: Marker::Start,
    }
  }

  pub fn session_id(&self) -> Option<&str> {
    self.session.as_ref().map(|s| s.id.as_str())
  }

  pub fn is_finished(&self) -> bool {
    self.step == Step::Done
  }

  /// True while paused in `collect_answer` for a question.
  pub fn awaiting_answer(&self) -> bool {
    self.step == Step::CollectAnswer && self.current_question.is_some() && self.context.pending_answer.is_none()
  }
}

/// Result of running a single state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
  Advanced,
  NeedsAnswer,
}

/// Where `advance` stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
  AwaitingAnswer,
  Finished,
}

/// Session ids: time-derived prefix plus a random suffix so parallel starts never collide.
pub fn new_session_id() -> String {
  let suffix = Uuid::new_v4().simple().to_string();
  format!("session_{}_{}", Utc::now().format("%Y%m%d_%H%M%S"), &suffix[..8])
}

#[derive(Clone)]
pub struct InterviewWorkflow {
  repo: Arc<QuestionRepository>,
  enricher: Arc<dyn Enricher>,
  prompts: Prompts,
}

impl InterviewWorkflow {
  pub fn new(repo: Arc<QuestionRepository>, enricher: Arc<dyn Enricher>, prompts: Prompts) -> Self {
    Self { repo, enricher, prompts }
  }

  pub fn repository(&self) -> &QuestionRepository {
    &self.repo
  }

  /// Create a run and drive it to the first answer (or to the end for an empty selection).
  #[instrument(level = "info", skip(self, config), fields(job_role = %config.job_role, kind = %config.kind, difficulty = %config.difficulty, count = config.question_count))]
  pub async fn start(&self, config: RunConfig) -> Result<WorkflowState, InterviewError> {
    let mut state = WorkflowState::new(config);
    self.advance(&mut state).await?;
    Ok(state)
  }

  /// Feed the response the machine is waiting for and resume.
  #[instrument(level = "info", skip(self, state, input), fields(session_id = ?state.session_id(), answer_len = input.text.len()))]
  pub async fn submit(&self, state: &mut WorkflowState, input: AnswerInput) -> Result<Progress, InterviewError> {
    if !state.awaiting_answer() {
      return Err(InterviewError::InvalidAnswer("session is not waiting for an answer".into()));
    }
    input.validate()?;
    state.context.pending_answer = Some(input);
    self.advance(state).await
  }

  /// Drive a whole session from a scripted list of responses. Stops early (paused)
  /// if the responses run out.
  pub async fn run<I>(&self, config: RunConfig, answers: I) -> Result<WorkflowState, InterviewError>
  where
    I: IntoIterator<Item = AnswerInput>,
  {
    let mut state = WorkflowState::new(config);
    let mut answers = answers.into_iter();
    loop {
      match self.advance(&mut state).await? {
        Progress::Finished => break,
        Progress::AwaitingAnswer => match answers.next() {
          Some(a) => {
            a.validate()?;
            state.context.pending_answer = Some(a);
          }
          None => break,
        },
      }
    }
    Ok(state)
  }

  /// Skip the remaining questions and finalize with whatever has been answered.
  #[instrument(level = "info", skip(self, state), fields(session_id = ?state.session_id(), step = ?state.step))]
  pub async fn finish_early(&self, state: &mut WorkflowState) -> Result<(), InterviewError> {
    if state.is_finished() {
      return Ok(());
    }
    if state.session.is_none() {
      return Err(InterviewError::SessionNotInitialized);
    }
    // Anything collected but not yet appended is dropped, keeping answers parallel to the cursor.
    state.current_answer = None;
    state.context.pending_answer = None;
    state.step = Step::FinalizeSession;
    self.advance(state).await.map(|_| ())
  }

  /// Run states until the machine pauses for input or finishes.
  pub async fn advance(&self, state: &mut WorkflowState) -> Result<Progress, InterviewError> {
    loop {
      if state.is_finished() {
        return Ok(Progress::Finished);
      }
      if self.step(state).await? == StepOutcome::NeedsAnswer {
        return Ok(Progress::AwaitingAnswer);
      }
    }
  }

  /// Run exactly one state and move the cursor to the next one.
  #[instrument(level = "debug", skip(self, state), fields(step = ?state.step, session_id = ?state.session_id()))]
  pub async fn step(&self, state: &mut WorkflowState) -> Result<StepOutcome, InterviewError> {
    let current = state.step;
    let outcome = match current {
      Step::ParseJobDescription => self.parse_job_description(state),
      Step::InitializeSession => self.initialize_session(state),
      Step::SelectQuestion => self.select_question(state)?,
      Step::PresentQuestion => self.present_question(state).await,
      Step::CollectAnswer => self.collect_answer(state),
      Step::GenerateFeedback => self.generate_feedback(state).await,
      Step::GenerateFollowup => self.generate_followup(state).await?,
      Step::CheckCompletion => self.check_completion(state),
      Step::FinalizeSession => self.finalize_session(state).await?,
      Step::Done => StepOutcome::Advanced,
    };
    if outcome == StepOutcome::Advanced {
      state.step = current.next(state.marker);
    }
    Ok(outcome)
  }

  fn parse_job_description(&self, state: &mut WorkflowState) -> StepOutcome {
    if let Some(text) = state.context.config.job_description_text.as_deref().filter(|t| !t.trim().is_empty()) {
      let job = job_parser::parse(text);
      state.context.research_tips = job_parser::research_tips(&job);
      state.job_description = Some(job);
    }
    state.marker = Marker::JobParsed;
    StepOutcome::Advanced
  }

  fn initialize_session(&self, state: &mut WorkflowState) -> StepOutcome {
    let cfg = &state.context.config;

    let (mut candidates, source) = match &state.job_description {
      Some(job) if !job.skills.is_empty() => (self.repo.filter_by_skills(&job.skills), "skills"),
      _ => (self.repo.filter_by_type(cfg.kind, Some(cfg.difficulty)), "type"),
    };

    let mut rng = match cfg.shuffle_seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    candidates.shuffle(&mut rng);
    candidates.truncate(cfg.question_count);

    let session = InterviewSession::new(new_session_id(), cfg.job_role.clone(), cfg.difficulty, cfg.kind, candidates);
    if session.questions.is_empty() {
      warn!(target: "interview", session_id = %session.id, %source, "No questions selected; session will finalize without answers");
    } else {
      info!(target: "interview", session_id = %session.id, %source, questions = session.questions.len(), "Session initialized");
    }

    state.session = Some(session);
    state.marker = Marker::SessionInitialized;
    StepOutcome::Advanced
  }

  fn select_question(&self, state: &mut WorkflowState) -> Result<StepOutcome, InterviewError> {
    let session = state.session.as_ref().ok_or(InterviewError::SessionNotInitialized)?;
    match session.current_question() {
      Some(q) => {
        debug!(target: "interview", question_id = %q.id, index = session.current_question_index, "Question selected");
        state.current_question = Some(q.clone());
        state.marker = Marker::QuestionSelected;
      }
      None => {
        state.current_question = None;
        state.marker = Marker::InterviewComplete;
      }
    }
    Ok(StepOutcome::Advanced)
  }

  async fn present_question(&self, state: &mut WorkflowState) -> StepOutcome {
    let Some(q) = state.current_question.as_ref() else {
      return StepOutcome::Advanced;
    };
    let prompt = fill_template(
      &self.prompts.presentation_template,
      &[
        ("question", q.text.as_str()),
        ("type", q.kind.as_str()),
        ("difficulty", q.difficulty.as_str()),
        ("category", q.category.as_str()),
      ],
    );
    let text = enrich_or(self.enricher.as_ref(), "question_presentation", &prompt, presentation_fallback(q)).await;
    state.context.question_presentation = Some(text);
    state.marker = Marker::QuestionPresented;
    StepOutcome::Advanced
  }

  fn collect_answer(&self, state: &mut WorkflowState) -> StepOutcome {
    let Some(q) = state.current_question.as_ref() else {
      return StepOutcome::Advanced;
    };
    let Some(input) = state.context.pending_answer.take() else {
      return StepOutcome::NeedsAnswer;
    };
    state.current_answer = Some(Answer::new(q.id.clone(), input.text, input.time_spent, input.confidence));
    state.marker = Marker::AnswerCollected;
    StepOutcome::Advanced
  }

  async fn generate_feedback(&self, state: &mut WorkflowState) -> StepOutcome {
    let (Some(q), Some(answer)) = (state.current_question.as_ref(), state.current_answer.as_ref()) else {
      return StepOutcome::Advanced;
    };

    let mut fb = feedback::score(answer, q);
    let score = fb.score.to_string();
    let strengths = fb.strengths.join(", ");
    let improvements = fb.improvements.join(", ");
    let prompt = fill_template(
      &self.prompts.feedback_template,
      &[
        ("question", q.text.as_str()),
        ("answer", answer.text.as_str()),
        ("score", score.as_str()),
        ("strengths", strengths.as_str()),
        ("improvements", improvements.as_str()),
      ],
    );
    let heuristic = fb.overall_assessment.clone();
    fb.overall_assessment = enrich_or(self.enricher.as_ref(), "feedback", &prompt, heuristic).await;

    info!(target: "interview", question_id = %q.id, score = fb.score, star = ?fb.star_method_compliance, "Answer scored");
    if let Some(answer) = state.current_answer.as_mut() {
      answer.feedback = Some(fb.clone());
    }
    state.feedback = Some(fb);
    state.marker = Marker::FeedbackGenerated;
    StepOutcome::Advanced
  }

  async fn generate_followup(&self, state: &mut WorkflowState) -> Result<StepOutcome, InterviewError> {
    let (Some(q), Some(answer)) = (state.current_question.as_ref(), state.current_answer.as_ref()) else {
      return Ok(StepOutcome::Advanced);
    };

    let prompt = fill_template(&self.prompts.followup_template, &[("question", q.text.as_str()), ("answer", answer.text.as_str())]);
    let text = enrich_or(self.enricher.as_ref(), "followup", &prompt, q.follow_up_prompts.join("\n")).await;
    state.context.followup_questions = if text.is_empty() { None } else { Some(text) };

    let session = state.session.as_mut().ok_or(InterviewError::SessionNotInitialized)?;
    if let Some(answer) = state.current_answer.take() {
      session.answers.push(answer);
      session.current_question_index += 1;
      state.iterations += 1;
    }
    state.marker = Marker::FollowupGenerated;
    Ok(StepOutcome::Advanced)
  }

  fn check_completion(&self, state: &mut WorkflowState) -> StepOutcome {
    state.marker = match &state.session {
      Some(s) if !s.is_complete() => Marker::ContinueInterview,
      _ => Marker::InterviewComplete,
    };
    StepOutcome::Advanced
  }

  async fn finalize_session(&self, state: &mut WorkflowState) -> Result<StepOutcome, InterviewError> {
    let session = state.session.as_mut().ok_or(InterviewError::SessionNotInitialized)?;
    session.end_time = Some(Utc::now());
    session.score = session.average_score();

    let scores: Vec<String> = session.answers.iter().filter_map(|a| a.score()).map(|s| s.to_string()).collect();
    let average = session.score.map(|s| format!("{s:.1}")).unwrap_or_else(|| "n/a".into());
    let question_count = session.questions.len().to_string();
    let scores = format!("[{}]", scores.join(", "));
    let prompt = fill_template(
      &self.prompts.summary_template,
      &[
        ("job_role", session.job_role.as_str()),
        ("question_count", question_count.as_str()),
        ("average_score", average.as_str()),
        ("scores", scores.as_str()),
      ],
    );
    let fallback = summary_fallback(session);
    info!(target: "interview", session_id = %session.id, answered = session.answers.len(), total = session.questions.len(), score = ?session.score, "Session finalized");

    let narrative = enrich_or(self.enricher.as_ref(), "session_summary", &prompt, fallback).await;
    state.context.overall_assessment = Some(narrative);
    state.current_question = None;
    state.marker = Marker::SessionFinalized;
    Ok(StepOutcome::Advanced)
  }
}

/// Deterministic presentation used when enrichment is off or fails.
pub fn presentation_fallback(q: &Question) -> String {
  let mut out = format!(
    "{}\n\nType: {} | Difficulty: {} | Category: {}",
    q.text, q.kind, q.difficulty, q.category
  );
  if q.is_star() {
    out.push_str("\nTip: structure your answer with the STAR method (Situation, Task, Action, Result).");
  }
  out.push_str(&format!("\nSuggested time: about {} minute(s).", (q.time_limit / 60).max(1)));
  out
}

/// Performance tier for an average score.
pub fn performance_summary(score: f64) -> &'static str {
  if score >= 80.0 {
    "Excellent! You're well-prepared for interviews."
  } else if score >= 60.0 {
    "Good performance with room for improvement."
  } else if score >= 40.0 {
    "Keep practicing - you're on the right track."
  } else {
    "Focus on fundamentals and practice more."
  }
}

fn summary_fallback(session: &InterviewSession) -> String {
  match session.score {
    Some(score) => format!(
      "Answered {} of {} questions for the {} role with an average score of {:.1}/100. {}",
      session.answers.len(),
      session.questions.len(),
      session.job_role,
      score,
      performance_summary(score)
    ),
    None => format!("No questions were answered for the {} role.", session.job_role),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::AnswerFormat;
  use crate::enrichment::DisabledEnricher;
  use crate::error::EnrichError;
  use async_trait::async_trait;
  use std::sync::atomic::{AtomicUsize, Ordering};

  /// Returns a different nonsense string on every call.
  #[derive(Default)]
  struct Chatty {
    calls: AtomicUsize,
  }

  #[async_trait]
  impl Enricher for Chatty {
    async fn complete(&self, _prompt: &str) -> Result<String, EnrichError> {
      let n = self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(format!("check_completion interview_complete {n}"))
    }
    fn name(&self) -> &'static str { "chatty" }
  }

  struct Broken;

  #[async_trait]
  impl Enricher for Broken {
    async fn complete(&self, _prompt: &str) -> Result<String, EnrichError> {
      Err(EnrichError::Empty)
    }
    fn name(&self) -> &'static str { "broken" }
  }

  fn workflow_with(enricher: Arc<dyn Enricher>) -> InterviewWorkflow {
    InterviewWorkflow::new(Arc::new(QuestionRepository::builtin()), enricher, Prompts::default())
  }

  fn workflow() -> InterviewWorkflow {
    workflow_with(Arc::new(DisabledEnricher))
  }

  fn config(kind: InterviewType, difficulty: DifficultyLevel, count: usize) -> RunConfig {
    RunConfig { kind, difficulty, question_count: count, shuffle_seed: Some(7), ..Default::default() }
  }

  fn answers(n: usize) -> Vec<AnswerInput> {
    (0..n)
      .map(|i| AnswerInput::new(format!("answer {i} where I implemented a fix and improved the result for the team"), 90, 60))
      .collect()
  }

  #[test]
  fn transitions_follow_fixed_sequence() {
    assert_eq!(Step::ParseJobDescription.next(Marker::JobParsed), Step::InitializeSession);
    assert_eq!(Step::GenerateFollowup.next(Marker::FollowupGenerated), Step::CheckCompletion);
    assert_eq!(Step::CheckCompletion.next(Marker::ContinueInterview), Step::SelectQuestion);
    assert_eq!(Step::CheckCompletion.next(Marker::InterviewComplete), Step::FinalizeSession);
    assert_eq!(Step::FinalizeSession.next(Marker::SessionFinalized), Step::Done);
  }

  #[tokio::test]
  async fn runs_exactly_n_iterations() {
    let wf = workflow();
    let state = wf.run(config(InterviewType::Mixed, DifficultyLevel::Intermediate, 3), answers(10)).await.unwrap();
    let session = state.session.as_ref().unwrap();
    assert!(state.is_finished());
    assert_eq!(state.iterations, 3);
    assert_eq!(session.current_question_index, 3);
    assert_eq!(session.answers.len(), 3);
    assert!(session.end_time.is_some());
    for (q, a) in session.questions.iter().zip(&session.answers) {
      assert_eq!(q.id, a.question_id);
      assert!(a.feedback.is_some());
    }
  }

  #[tokio::test]
  async fn enrichment_content_does_not_change_transitions() {
    let chatty = Arc::new(Chatty::default());
    for wf in [workflow(), workflow_with(chatty.clone()), workflow_with(Arc::new(Broken))] {
      let state = wf.run(config(InterviewType::Technical, DifficultyLevel::Intermediate, 3), answers(3)).await.unwrap();
      assert!(state.is_finished());
      assert_eq!(state.iterations, 3);
      let ids: Vec<_> = state.session.unwrap().answers.into_iter().map(|a| a.question_id).collect();
      assert_eq!(ids.len(), 3);
    }
    // presentation + feedback + follow-up per question, plus one summary
    assert_eq!(chatty.calls.load(Ordering::SeqCst), 3 * 3 + 1);
  }

  #[tokio::test]
  async fn enriched_text_replaces_assessment_but_not_score() {
    let plain = workflow().run(config(InterviewType::Hr, DifficultyLevel::Beginner, 1), answers(1)).await.unwrap();
    let rich = workflow_with(Arc::new(Chatty::default()))
      .run(config(InterviewType::Hr, DifficultyLevel::Beginner, 1), answers(1))
      .await
      .unwrap();
    let fb_plain = plain.feedback.unwrap();
    let fb_rich = rich.feedback.unwrap();
    assert_eq!(fb_plain.score, fb_rich.score);
    assert_eq!(fb_plain.strengths, fb_rich.strengths);
    assert_eq!(fb_plain.overall_assessment, feedback::assessment_for(fb_plain.score));
    assert!(fb_rich.overall_assessment.starts_with("check_completion"));
  }

  #[tokio::test]
  async fn pauses_at_collect_answer_and_resumes() {
    let wf = workflow();
    let mut state = wf.start(config(InterviewType::Behavioral, DifficultyLevel::Beginner, 2)).await.unwrap();
    assert!(state.awaiting_answer());
    assert_eq!(state.session.as_ref().unwrap().questions.len(), 2);
    assert!(state.context.question_presentation.as_deref().unwrap().contains("STAR"));

    let first = state.current_question.clone().unwrap();
    let progress = wf.submit(&mut state, AnswerInput::new("short", 60, 50)).await.unwrap();
    assert_eq!(progress, Progress::AwaitingAnswer);
    let session = state.session.as_ref().unwrap();
    assert_eq!(session.answers.len(), 1);
    assert_eq!(session.answers[0].question_id, first.id);
    assert_eq!(state.feedback.as_ref().unwrap().star_method_compliance, Some(false));

    let progress = wf.submit(&mut state, AnswerInput::new("short", 60, 50)).await.unwrap();
    assert_eq!(progress, Progress::Finished);
    assert!(state.session.as_ref().unwrap().score.is_some());
    assert!(wf.submit(&mut state, AnswerInput::new("late", 60, 50)).await.is_err());
  }

  #[tokio::test]
  async fn rejects_out_of_range_confidence_without_consuming_question() {
    let wf = workflow();
    let mut state = wf.start(config(InterviewType::Hr, DifficultyLevel::Beginner, 1)).await.unwrap();
    let err = wf.submit(&mut state, AnswerInput::new("x", 60, 0)).await.unwrap_err();
    assert!(matches!(err, InterviewError::InvalidAnswer(_)));
    assert!(state.awaiting_answer());
    assert!(state.session.as_ref().unwrap().answers.is_empty());
  }

  #[tokio::test]
  async fn empty_selection_finalizes_without_score() {
    let repo = Arc::new(QuestionRepository::new(vec![]));
    let wf = InterviewWorkflow::new(repo, Arc::new(DisabledEnricher), Prompts::default());
    let state = wf.start(config(InterviewType::Mixed, DifficultyLevel::Beginner, 5)).await.unwrap();
    assert!(state.is_finished());
    assert_eq!(state.iterations, 0);
    let session = state.session.as_ref().unwrap();
    assert!(session.score.is_none());
    assert!(session.end_time.is_some());
    assert!(state.context.overall_assessment.as_deref().unwrap().starts_with("No questions"));
  }

  #[tokio::test]
  async fn zero_question_count_finalizes_immediately() {
    let state = workflow().start(config(InterviewType::Mixed, DifficultyLevel::Beginner, 0)).await.unwrap();
    assert!(state.is_finished());
    assert!(state.session.unwrap().score.is_none());
  }

  fn scored_answer(id: &str, score: u8) -> Answer {
    let mut a = Answer::new(id, "text", 60, 50);
    a.feedback = Some(Feedback {
      score,
      strengths: vec![],
      improvements: vec![],
      star_method_compliance: None,
      suggestions: vec![],
      overall_assessment: String::new(),
    });
    a
  }

  #[tokio::test]
  async fn finalize_averages_feedback_scores() {
    let wf = workflow();
    let mut state = WorkflowState::new(RunConfig::default());
    let mut session = InterviewSession::new("s".into(), "dev".into(), DifficultyLevel::Beginner, InterviewType::Hr, vec![]);
    session.answers = vec![scored_answer("a", 80), scored_answer("b", 60), scored_answer("c", 100)];
    state.session = Some(session);
    state.step = Step::FinalizeSession;

    wf.step(&mut state).await.unwrap();
    assert_eq!(state.step, Step::Done);
    assert_eq!(state.session.unwrap().score, Some(80.0));
  }

  #[tokio::test]
  async fn job_description_skills_drive_selection() {
    let wf = workflow();
    let cfg = RunConfig {
      job_description_text: Some("Frontend Developer at Initech.\nStrong JavaScript skills, 3+ years experience".into()),
      question_count: 10,
      shuffle_seed: Some(1),
      ..Default::default()
    };
    let state = wf.start(cfg).await.unwrap();
    let job = state.job_description.as_ref().unwrap();
    assert_eq!(job.company, "Initech");
    assert!(!state.context.research_tips.is_empty());
    let session = state.session.as_ref().unwrap();
    assert!(!session.questions.is_empty());
    assert!(session.questions.iter().all(|q| q.text.to_lowercase().contains("java") || q.category.to_lowercase().contains("java")));
  }

  #[tokio::test]
  async fn same_seed_same_questions() {
    let wf = workflow();
    let a = wf.start(config(InterviewType::Mixed, DifficultyLevel::Intermediate, 4)).await.unwrap();
    let b = wf.start(config(InterviewType::Mixed, DifficultyLevel::Intermediate, 4)).await.unwrap();
    let ids = |s: &WorkflowState| s.session.as_ref().unwrap().questions.iter().map(|q| q.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&a), ids(&b));
    assert_ne!(a.session_id(), b.session_id());
  }

  #[tokio::test]
  async fn finish_early_keeps_answers_parallel_to_cursor() {
    let wf = workflow();
    let mut state = wf.start(config(InterviewType::Technical, DifficultyLevel::Beginner, 3)).await.unwrap();
    wf.submit(&mut state, AnswerInput::new("one answer", 60, 50)).await.unwrap();
    wf.finish_early(&mut state).await.unwrap();
    let session = state.session.as_ref().unwrap();
    assert!(state.is_finished());
    assert_eq!(session.answers.len(), 1);
    assert_eq!(session.current_question_index, 1);
    assert!(session.score.is_some());
  }

  #[test]
  fn presentation_fallback_mentions_star_for_star_questions() {
    let repo = QuestionRepository::builtin();
    let behav = repo.get("behav-001").unwrap();
    assert_eq!(behav.expected_answer_format, Some(AnswerFormat::Star));
    assert!(presentation_fallback(behav).contains("STAR"));
    assert!(!presentation_fallback(repo.get("hr-001").unwrap()).contains("STAR"));
  }

  #[test]
  fn session_ids_are_time_prefixed() {
    let id = new_session_id();
    assert!(id.starts_with("session_"));
    assert_eq!(id.len(), "session_20240101_120000_abcdef12".len());
  }
}
