//! Loading agent configuration (prompts + optional extra questions) from TOML.
//!
//! See `AgentConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{AnswerFormat, DifficultyLevel, InterviewType, Question, DEFAULT_TIME_LIMIT};
use crate::error::InterviewError;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

/// Question entry accepted in TOML configuration. Enum fields stay strings here so a
/// single bad entry can be skipped instead of failing the whole file.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  pub id: String,
  pub text: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub difficulty: String,
  #[serde(default)] pub category: Option<String>,
  #[serde(default)] pub time_limit: Option<u32>,
  #[serde(default)] pub expected_answer_format: Option<String>,
  #[serde(default)] pub follow_up_prompts: Vec<String>,
}

impl QuestionCfg {
  pub fn to_question(&self) -> Result<Question, InterviewError> {
    if self.id.trim().is_empty() || self.text.trim().is_empty() {
      return Err(InterviewError::InvalidConfiguration("question id and text must be non-empty".into()));
    }
    let kind: InterviewType = self.kind.parse()?;
    if kind == InterviewType::Mixed {
      return Err(InterviewError::InvalidConfiguration("a question cannot have type 'mixed'".into()));
    }
    let expected_answer_format = match &self.expected_answer_format {
      Some(s) if !s.eq_ignore_ascii_case("none") => Some(s.parse::<AnswerFormat>()?),
      _ => None,
    };
    Ok(Question {
      id: self.id.clone(),
      text: self.text.clone(),
      kind,
      difficulty: self.difficulty.parse::<DifficultyLevel>()?,
      category: self.category.clone().unwrap_or_else(|| "General".into()),
      time_limit: self.time_limit.unwrap_or(DEFAULT_TIME_LIMIT),
      expected_answer_format,
      follow_up_prompts: self.follow_up_prompts.clone(),
    })
  }

  #[cfg(test)]
  pub fn for_test(id: &str, text: &str, kind: &str, difficulty: &str) -> Self {
    Self {
      id: id.into(),
      text: text.into(),
      kind: kind.into(),
      difficulty: difficulty.into(),
      category: None,
      time_limit: None,
      expected_answer_format: None,
      follow_up_prompts: vec![],
    }
  }
}

/// Prompts sent to the enrichment service. Placeholders use `{name}` syntax.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub system: String,
  pub presentation_template: String,
  pub feedback_template: String,
  pub followup_template: String,
  pub summary_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      system: "You are an experienced, encouraging technical interviewer. Be concise and concrete.".into(),
      presentation_template: "Present this interview question in a professional and engaging way:\n\nQuestion: {question}\nType: {type}\nDifficulty: {difficulty}\nCategory: {category}\n\nProvide any helpful context or tips for answering this question.\nIf this is a behavioral question, remind about the STAR method.".into(),
      feedback_template: "Enhance this interview feedback with more personalized insights:\n\nQuestion: {question}\nAnswer: {answer}\nCurrent Score: {score}\nCurrent Strengths: {strengths}\nCurrent Improvements: {improvements}\n\nProvide additional specific, actionable feedback that would help this candidate improve.".into(),
      followup_template: "Based on this interview answer, generate 2-3 relevant follow-up questions:\n\nOriginal Question: {question}\nCandidate's Answer: {answer}\n\nGenerate follow-up questions that would help assess the candidate's depth of knowledge and experience related to their answer.".into(),
      summary_template: "Generate an overall interview assessment based on these answers:\n\nJob Role: {job_role}\nNumber of Questions: {question_count}\nAverage Score: {average_score}\n\nIndividual Scores: {scores}\n\nProvide a comprehensive assessment of the candidate's performance, highlighting key strengths and areas for improvement.".into(),
    }
  }
}

/// Attempt to load `AgentConfig` from AGENT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
  let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AgentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "interview_backend", %path, questions = cfg.questions.len(), "Loaded agent config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "interview_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "interview_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_partial_toml_with_defaults() {
    let cfg: AgentConfig = toml::from_str(
      r#"
        [prompts]
        system = "Be brief."

        [[questions]]
        id = "rust-001"
        text = "Explain ownership."
        type = "technical"
        difficulty = "beginner"
        category = "Rust"
        expected_answer_format = "technical"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.prompts.system, "Be brief.");
    assert_eq!(cfg.prompts.followup_template, Prompts::default().followup_template);

    let q = cfg.questions[0].to_question().unwrap();
    assert_eq!(q.kind, InterviewType::Technical);
    assert_eq!(q.time_limit, DEFAULT_TIME_LIMIT);
    assert_eq!(q.expected_answer_format, Some(AnswerFormat::Technical));
  }

  #[test]
  fn mixed_is_not_a_question_type() {
    let cfg = QuestionCfg::for_test("x", "y", "mixed", "beginner");
    assert!(cfg.to_question().is_err());
  }
}
