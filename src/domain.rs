//! Domain models: questions, answers, feedback, sessions and parsed job descriptions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InterviewError;

/// Default per-question time budget, in seconds.
pub const DEFAULT_TIME_LIMIT: u32 = 300;

/// Which family of questions an interview draws from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
  Technical,
  Behavioral,
  Hr,
  Design,
  /// Every family; only meaningful for sessions, never on a single question.
  Mixed,
}
impl Default for InterviewType {
  fn default() -> Self { InterviewType::Mixed }
}

impl InterviewType {
  pub fn as_str(&self) -> &'static str {
    match self {
      InterviewType::Technical => "technical",
      InterviewType::Behavioral => "behavioral",
      InterviewType::Hr => "hr",
      InterviewType::Design => "design",
      InterviewType::Mixed => "mixed",
    }
  }
}

impl fmt::Display for InterviewType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for InterviewType {
  type Err = InterviewError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "technical" => Ok(InterviewType::Technical),
      "behavioral" => Ok(InterviewType::Behavioral),
      "hr" => Ok(InterviewType::Hr),
      "design" => Ok(InterviewType::Design),
      "mixed" => Ok(InterviewType::Mixed),
      other => Err(InterviewError::InvalidConfiguration(format!(
        "unknown interview type '{other}' (expected technical, behavioral, hr, design or mixed)"
      ))),
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
  Beginner,
  Intermediate,
  Advanced,
}
impl Default for DifficultyLevel {
  fn default() -> Self { DifficultyLevel::Intermediate }
}

impl DifficultyLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      DifficultyLevel::Beginner => "beginner",
      DifficultyLevel::Intermediate => "intermediate",
      DifficultyLevel::Advanced => "advanced",
    }
  }
}

impl fmt::Display for DifficultyLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for DifficultyLevel {
  type Err = InterviewError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "beginner" => Ok(DifficultyLevel::Beginner),
      "intermediate" => Ok(DifficultyLevel::Intermediate),
      "advanced" => Ok(DifficultyLevel::Advanced),
      other => Err(InterviewError::InvalidConfiguration(format!(
        "unknown difficulty '{other}' (expected beginner, intermediate or advanced)"
      ))),
    }
  }
}

/// How an answer to a question is expected to be structured.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnswerFormat {
  Star,
  Technical,
  General,
}

impl FromStr for AnswerFormat {
  type Err = InterviewError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "star" => Ok(AnswerFormat::Star),
      "technical" => Ok(AnswerFormat::Technical),
      "general" => Ok(AnswerFormat::General),
      other => Err(InterviewError::InvalidConfiguration(format!("unknown answer format '{other}'"))),
    }
  }
}

/// Immutable question-bank entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Question {
  pub id: String,
  pub text: String,
  #[serde(rename = "type")]
  pub kind: InterviewType,
  pub difficulty: DifficultyLevel,
  pub category: String,
  #[serde(default = "default_time_limit")]
  pub time_limit: u32,
  #[serde(default)]
  pub expected_answer_format: Option<AnswerFormat>,
  #[serde(default)]
  pub follow_up_prompts: Vec<String>,
}

fn default_time_limit() -> u32 { DEFAULT_TIME_LIMIT }

impl Question {
  pub fn is_star(&self) -> bool {
    self.expected_answer_format == Some(AnswerFormat::Star)
  }
}

/// Scoring result for one answer.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
  /// Always within 0..=100.
  pub score: u8,
  pub strengths: Vec<String>,
  pub improvements: Vec<String>,
  /// `None` when the question is not a STAR question.
  pub star_method_compliance: Option<bool>,
  pub suggestions: Vec<String>,
  pub overall_assessment: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Answer {
  pub question_id: String,
  pub text: String,
  /// Seconds.
  pub time_spent: u32,
  /// 1..=100.
  pub confidence: u8,
  pub timestamp: DateTime<Utc>,
  #[serde(default)]
  pub feedback: Option<Feedback>,
}

impl Answer {
  pub fn new(question_id: impl Into<String>, text: impl Into<String>, time_spent: u32, confidence: u8) -> Self {
    Self {
      question_id: question_id.into(),
      text: text.into(),
      time_spent,
      confidence,
      timestamp: Utc::now(),
      feedback: None,
    }
  }

  pub fn score(&self) -> Option<u8> {
    self.feedback.as_ref().map(|f| f.score)
  }
}

/// One candidate's run through a fixed list of questions.
///
/// `answers.len() == current_question_index` whenever the workflow is between steps,
/// and `current_question_index <= questions.len()`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterviewSession {
  pub id: String,
  pub job_role: String,
  pub difficulty: DifficultyLevel,
  #[serde(rename = "type")]
  pub kind: InterviewType,
  pub questions: Vec<Question>,
  pub current_question_index: usize,
  pub answers: Vec<Answer>,
  pub start_time: DateTime<Utc>,
  pub end_time: Option<DateTime<Utc>>,
  /// Mean of per-answer scores; set once at finalization, unset when nothing was answered.
  pub score: Option<f64>,
}

impl InterviewSession {
  pub fn new(id: String, job_role: String, difficulty: DifficultyLevel, kind: InterviewType, questions: Vec<Question>) -> Self {
    Self {
      id,
      job_role,
      difficulty,
      kind,
      questions,
      current_question_index: 0,
      answers: Vec::new(),
      start_time: Utc::now(),
      end_time: None,
      score: None,
    }
  }

  pub fn current_question(&self) -> Option<&Question> {
    self.questions.get(self.current_question_index)
  }

  pub fn is_complete(&self) -> bool {
    self.current_question_index >= self.questions.len()
  }

  pub fn question(&self, id: &str) -> Option<&Question> {
    self.questions.iter().find(|q| q.id == id)
  }

  /// Mean feedback score across answers, `None` if there is nothing to average.
  pub fn average_score(&self) -> Option<f64> {
    let scores: Vec<f64> = self.answers.iter().filter_map(|a| a.score()).map(f64::from).collect();
    if scores.is_empty() {
      None
    } else {
      Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
  }
}

/// Structured view of a raw job posting.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JobDescription {
  pub title: String,
  pub company: String,
  pub skills: Vec<String>,
  pub experience: String,
  pub description: String,
  pub industry: String,
}
