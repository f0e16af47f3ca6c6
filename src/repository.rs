//! Question repository: immutable bank with filtered lookups.
//!
//! All lookups preserve bank order and return an empty list rather than failing.

use std::collections::HashSet;

use tracing::{error, info};

use crate::config::QuestionCfg;
use crate::domain::{DifficultyLevel, InterviewType, Question};
use crate::seeds::seed_questions;

#[derive(Clone, Debug)]
pub struct QuestionRepository {
  questions: Vec<Question>,
}

impl QuestionRepository {
  pub fn new(questions: Vec<Question>) -> Self {
    Self { questions }
  }

  /// Built-in bank only.
  pub fn builtin() -> Self {
    Self::new(seed_questions())
  }

  /// Built-in bank followed by configured entries. Invalid or duplicate entries are skipped.
  pub fn with_configured(extra: &[QuestionCfg]) -> Self {
    let mut questions = seed_questions();
    let mut ids: HashSet<String> = questions.iter().map(|q| q.id.clone()).collect();

    for cfg in extra {
      match cfg.to_question() {
        Ok(q) if ids.contains(&q.id) => {
          error!(target: "interview", id = %q.id, "Skipping bank item: duplicate id.");
        }
        Ok(q) => {
          ids.insert(q.id.clone());
          questions.push(q);
        }
        Err(e) => {
          error!(target: "interview", id = %cfg.id, error = %e, "Skipping bank item: invalid entry.");
        }
      }
    }

    info!(target: "interview", total = questions.len(), configured = questions.len() - seed_questions().len(), "Question bank ready");
    Self::new(questions)
  }

  pub fn all(&self) -> &[Question] {
    &self.questions
  }

  pub fn len(&self) -> usize {
    self.questions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.questions.is_empty()
  }

  pub fn get(&self, id: &str) -> Option<&Question> {
    self.questions.iter().find(|q| q.id == id)
  }

  /// `Mixed` keeps every type; a difficulty, if given, narrows further.
  pub fn filter_by_type(&self, kind: InterviewType, difficulty: Option<DifficultyLevel>) -> Vec<Question> {
    self
      .questions
      .iter()
      .filter(|q| kind == InterviewType::Mixed || q.kind == kind)
      .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
      .cloned()
      .collect()
  }

  /// Questions whose category or text contains any of the skills (case-insensitive).
  pub fn filter_by_skills(&self, skills: &[String]) -> Vec<Question> {
    let skills: Vec<String> = skills.iter().map(|s| s.to_lowercase()).filter(|s| !s.is_empty()).collect();
    self
      .questions
      .iter()
      .filter(|q| {
        let category = q.category.to_lowercase();
        let text = q.text.to_lowercase();
        skills.iter().any(|s| category.contains(s.as_str()) || text.contains(s.as_str()))
      })
      .cloned()
      .collect()
  }
}

impl Default for QuestionRepository {
  fn default() -> Self {
    Self::builtin()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mixed_returns_every_question() {
    let repo = QuestionRepository::builtin();
    assert_eq!(repo.filter_by_type(InterviewType::Mixed, None), repo.all().to_vec());
  }

  #[test]
  fn type_and_difficulty_narrow_the_result() {
    let repo = QuestionRepository::builtin();
    let qs = repo.filter_by_type(InterviewType::Technical, Some(DifficultyLevel::Beginner));
    let ids: Vec<&str> = qs.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["tech-001", "tech-002", "tech-003"]);
    assert!(qs.iter().all(|q| q.kind == InterviewType::Technical && q.difficulty == DifficultyLevel::Beginner));
  }

  #[test]
  fn mixed_with_difficulty_spans_types() {
    let repo = QuestionRepository::builtin();
    let qs = repo.filter_by_type(InterviewType::Mixed, Some(DifficultyLevel::Advanced));
    let ids: Vec<&str> = qs.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["tech-201", "tech-202", "design-002"]);
  }

  #[test]
  fn skills_match_category_or_text_once_per_question() {
    let repo = QuestionRepository::builtin();
    let qs = repo.filter_by_skills(&["JavaScript".into(), "closures".into()]);
    let ids: Vec<&str> = qs.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["tech-001", "tech-002", "tech-102"]);
  }

  #[test]
  fn no_skill_match_is_empty_not_error() {
    let repo = QuestionRepository::builtin();
    assert!(repo.filter_by_skills(&["cobol".into()]).is_empty());
    assert!(repo.filter_by_skills(&[]).is_empty());
  }

  #[test]
  fn configured_entries_append_and_skip_duplicates() {
    let extra = vec![
      QuestionCfg::for_test("rust-001", "What does the borrow checker enforce?", "technical", "intermediate"),
      QuestionCfg::for_test("hr-001", "duplicate", "hr", "beginner"),
      QuestionCfg::for_test("bad-001", "bad type", "frontend", "beginner"),
    ];
    let repo = QuestionRepository::with_configured(&extra);
    assert_eq!(repo.len(), 20);
    assert_eq!(repo.all().last().map(|q| q.id.as_str()), Some("rust-001"));
    assert_eq!(repo.get("hr-001").map(|q| q.text.as_str()), Some("Why do you want to work for our company?"));
  }
}
