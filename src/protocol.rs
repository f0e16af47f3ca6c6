//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, Feedback, InterviewSession, JobDescription, Question};
use crate::error::InterviewError;
use crate::workflow::{RunConfig, DEFAULT_JOB_ROLE, DEFAULT_QUESTION_COUNT};

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub difficulty: Option<String>,
}
#[derive(Serialize)]
pub struct QuestionsOut {
    pub questions: Vec<Question>,
}

/// Start request. Enum fields arrive as strings so bad values map to a 400, not a 422.
#[derive(Debug, Default, Deserialize)]
pub struct StartIn {
    pub job_role: Option<String>,
    pub difficulty: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub question_count: Option<usize>,
    pub job_description_text: Option<String>,
    pub seed: Option<u64>,
}

impl StartIn {
    pub fn into_config(self) -> Result<RunConfig, InterviewError> {
        let defaults = RunConfig::default();
        Ok(RunConfig {
            job_role: self
                .job_role
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_JOB_ROLE.into()),
            difficulty: match self.difficulty.as_deref() {
                Some(d) => d.parse()?,
                None => defaults.difficulty,
            },
            kind: match self.kind.as_deref() {
                Some(k) => k.parse()?,
                None => defaults.kind,
            },
            question_count: self.question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
            job_description_text: self.job_description_text.filter(|t| !t.trim().is_empty()),
            shuffle_seed: self.seed,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressOut {
    pub current_index: usize,
    pub total_questions: usize,
    pub completed: usize,
}

impl From<&InterviewSession> for ProgressOut {
    fn from(s: &InterviewSession) -> Self {
        Self {
            current_index: s.current_question_index,
            total_questions: s.questions.len(),
            completed: s.answers.len(),
        }
    }
}

#[derive(Serialize)]
pub struct SessionOut {
    pub session_id: String,
    pub current_question: Option<Question>,
    pub question_presentation: Option<String>,
    pub job_description: Option<JobDescription>,
    pub research_tips: Vec<String>,
    pub progress: ProgressOut,
    pub is_complete: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub session_id: String,
    pub question_id: String,
    pub answer_text: String,
    #[serde(default)]
    pub time_spent: Option<u32>,
    /// Wider than the domain type so out-of-range values reach validation.
    #[serde(default)]
    pub confidence: Option<u32>,
}

#[derive(Serialize)]
pub struct AnswerOut {
    pub feedback: Option<Feedback>,
    pub followup_questions: Option<String>,
    pub next_question: Option<Question>,
    pub question_presentation: Option<String>,
    pub progress: ProgressOut,
    pub is_complete: bool,
    /// Session narrative, present once the last answer is in.
    pub overall_assessment: Option<String>,
}

#[derive(Serialize)]
pub struct DetailedFeedback {
    pub question: Option<Question>,
    pub answer: Answer,
    pub feedback: Option<Feedback>,
}

#[derive(Serialize)]
pub struct ResultsOut {
    pub session: InterviewSession,
    pub overall_score: f64,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub overall_assessment: Option<String>,
    pub detailed_feedback: Vec<DetailedFeedback>,
}

#[derive(Debug, Deserialize)]
pub struct ParseIn {
    #[serde(default)]
    pub description: Option<String>,
}
#[derive(Serialize)]
pub struct ParseOut {
    pub job_info: JobDescription,
    pub research_tips: Vec<String>,
}

#[derive(Serialize)]
pub struct ResourcesOut {
    pub star_method: &'static str,
    pub interview_questions: &'static str,
    pub salary_negotiation_tips: Vec<&'static str>,
    pub body_language_tips: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DifficultyLevel, InterviewType};

    #[test]
    fn start_defaults_match_run_config() {
        let cfg = StartIn::default().into_config().unwrap();
        assert_eq!(cfg.job_role, DEFAULT_JOB_ROLE);
        assert_eq!(cfg.kind, InterviewType::Mixed);
        assert_eq!(cfg.difficulty, DifficultyLevel::Intermediate);
        assert_eq!(cfg.question_count, DEFAULT_QUESTION_COUNT);
        assert!(cfg.job_description_text.is_none());
    }

    #[test]
    fn start_rejects_unknown_type() {
        let req: StartIn = serde_json::from_str(r#"{"type":"frontend"}"#).unwrap();
        assert!(matches!(req.into_config(), Err(InterviewError::InvalidConfiguration(_))));
    }

    #[test]
    fn blank_job_description_is_dropped() {
        let req: StartIn = serde_json::from_str(r#"{"job_description_text":"   ","type":"HR"}"#).unwrap();
        let cfg = req.into_config().unwrap();
        assert!(cfg.job_description_text.is_none());
        assert_eq!(cfg.kind, InterviewType::Hr);
    }
}
