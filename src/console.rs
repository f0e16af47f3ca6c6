//! Text rendering and input helpers for the interactive console binary.
//!
//! Everything here is pure (or generic over `BufRead`) so the transcript format
//! can be tested without a terminal.

use std::io::{self, BufRead};

use crate::domain::{DifficultyLevel, Feedback, InterviewSession, InterviewType, Question};
use crate::workflow::performance_summary;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

pub fn type_for_choice(choice: &str) -> Option<InterviewType> {
  match choice.trim() {
    "1" => Some(InterviewType::Technical),
    "2" => Some(InterviewType::Behavioral),
    "3" => Some(InterviewType::Hr),
    "4" => Some(InterviewType::Design),
    "5" => Some(InterviewType::Mixed),
    _ => None,
  }
}

pub fn difficulty_for_choice(choice: &str) -> Option<DifficultyLevel> {
  match choice.trim() {
    "1" => Some(DifficultyLevel::Beginner),
    "2" => Some(DifficultyLevel::Intermediate),
    "3" => Some(DifficultyLevel::Advanced),
    _ => None,
  }
}

/// Read lines until two consecutive blank lines (or EOF). Trailing blank lines are dropped.
pub fn read_block<R: BufRead>(input: &mut R) -> io::Result<String> {
  let mut lines: Vec<String> = Vec::new();
  let mut line = String::new();
  loop {
    line.clear();
    if input.read_line(&mut line)? == 0 {
      break;
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).to_string();
    if trimmed.is_empty() && lines.last().is_some_and(|l| l.is_empty()) {
      break;
    }
    lines.push(trimmed);
  }
  while lines.last().is_some_and(|l| l.is_empty()) {
    lines.pop();
  }
  Ok(lines.join("\n"))
}

pub fn render_question(index: usize, total: usize, q: &Question, presentation: Option<&str>) -> String {
  let mut out = String::new();
  out.push_str(&format!("\nQuestion {} of {}\n", index + 1, total));
  out.push_str(&format!("{RULE}\n"));
  out.push_str(&format!("QUESTION ({} - {})\n", q.kind.as_str().to_uppercase(), q.difficulty.as_str().to_uppercase()));
  out.push_str(&format!("{RULE}\n"));
  out.push_str(&format!("\n{}\n", q.text));
  if let Some(p) = presentation.filter(|p| !p.trim().is_empty()) {
    out.push_str(&format!("\nContext: {p}\n"));
  }
  if q.is_star() {
    out.push_str("\nTIP: Use the STAR method (Situation, Task, Action, Result)\n");
  }
  if q.time_limit > 0 {
    out.push_str(&format!("\nSuggested time limit: {} minutes\n", q.time_limit / 60));
  }
  out.push_str(&format!("\n{THIN_RULE}\n"));
  out
}

pub fn render_feedback(fb: &Feedback) -> String {
  let mut out = String::new();
  out.push_str(&format!("\n{RULE}\n"));
  out.push_str(&format!("FEEDBACK - Score: {}/100\n", fb.score));
  out.push_str(&format!("{RULE}\n"));
  if !fb.strengths.is_empty() {
    out.push_str("\nSTRENGTHS:\n");
    for s in &fb.strengths {
      out.push_str(&format!("  * {s}\n"));
    }
  }
  if !fb.improvements.is_empty() {
    out.push_str("\nAREAS FOR IMPROVEMENT:\n");
    for s in &fb.improvements {
      out.push_str(&format!("  * {s}\n"));
    }
  }
  if let Some(star) = fb.star_method_compliance {
    let status = if star { "Good" } else { "Needs Improvement" };
    out.push_str(&format!("\nSTAR Method Compliance: {status}\n"));
  }
  out.push_str(&format!("\nOVERALL ASSESSMENT:\n   {}\n", fb.overall_assessment));
  if !fb.suggestions.is_empty() {
    out.push_str("\nHELPFUL RESOURCES:\n");
    for s in &fb.suggestions {
      out.push_str(&format!("  * {s}\n"));
    }
  }
  out.push_str(&format!("\n{THIN_RULE}\n"));
  out
}

pub fn render_results(session: &InterviewSession, narrative: Option<&str>) -> String {
  let mut out = String::new();
  out.push_str(&format!("\n{RULE}\n"));
  out.push_str("FINAL INTERVIEW RESULTS\n");
  out.push_str(&format!("{RULE}\n"));
  if let Some(score) = session.score {
    out.push_str(&format!("\nOverall Score: {score:.1}/100\n"));
  }
  out.push_str(&format!("Questions Answered: {}/{}\n", session.answers.len(), session.questions.len()));
  if let Some(end) = session.end_time {
    let minutes = (end - session.start_time).num_milliseconds() as f64 / 60_000.0;
    out.push_str(&format!("Total Time: {minutes:.1} minutes\n"));
  }

  if !session.answers.is_empty() {
    out.push_str("\nSCORE BREAKDOWN:\n");
    for (i, a) in session.answers.iter().enumerate() {
      let category = session.question(&a.question_id).map(|q| q.category.as_str()).unwrap_or("unknown");
      let score = a.score().map(|s| s.to_string()).unwrap_or_else(|| "-".into());
      out.push_str(&format!("  Q{}: {}/100 - {}\n", i + 1, score, category));
    }
  }

  if let Some(score) = session.score {
    out.push_str(&format!("\nPERFORMANCE SUMMARY:\n   {}\n", performance_summary(score)));
  }
  if let Some(n) = narrative.filter(|n| !n.trim().is_empty()) {
    out.push_str(&format!("\n{n}\n"));
  }
  out.push_str(&format!("\n{RULE}\n"));
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Answer, AnswerFormat};
  use crate::seeds::seed_questions;
  use std::io::Cursor;

  fn star_question() -> Question {
    seed_questions()
      .into_iter()
      .find(|q| q.expected_answer_format == Some(AnswerFormat::Star))
      .unwrap()
  }

  #[test]
  fn menu_choices_map_to_enums() {
    assert_eq!(type_for_choice("3"), Some(InterviewType::Hr));
    assert_eq!(type_for_choice(" 5 "), Some(InterviewType::Mixed));
    assert_eq!(type_for_choice("6"), None);
    assert_eq!(difficulty_for_choice("1"), Some(DifficultyLevel::Beginner));
    assert_eq!(difficulty_for_choice("x"), None);
  }

  #[test]
  fn block_ends_on_double_blank_line() {
    let mut input = Cursor::new("first line\n\nsecond paragraph\n\n\nignored\n");
    assert_eq!(read_block(&mut input).unwrap(), "first line\n\nsecond paragraph");
    let mut rest = String::new();
    input.read_line(&mut rest).unwrap();
    assert_eq!(rest, "ignored\n");
  }

  #[test]
  fn block_stops_at_eof() {
    let mut input = Cursor::new("only line\n");
    assert_eq!(read_block(&mut input).unwrap(), "only line");
    let mut empty = Cursor::new("");
    assert_eq!(read_block(&mut empty).unwrap(), "");
  }

  #[test]
  fn star_questions_show_the_tip() {
    let q = star_question();
    let text = render_question(0, 3, &q, Some("Think of a recent project."));
    assert!(text.contains("Question 1 of 3"));
    assert!(text.contains("TIP: Use the STAR method"));
    assert!(text.contains("Context: Think of a recent project."));
    assert!(text.contains(&format!("Suggested time limit: {} minutes", q.time_limit / 60)));
  }

  #[test]
  fn feedback_block_lists_sections() {
    let fb = Feedback {
      score: 65,
      strengths: vec!["Clear".into()],
      improvements: vec!["More numbers".into()],
      star_method_compliance: Some(false),
      suggestions: vec!["Read up".into()],
      overall_assessment: "Solid".into(),
    };
    let text = render_feedback(&fb);
    assert!(text.contains("FEEDBACK - Score: 65/100"));
    assert!(text.contains("  * Clear"));
    assert!(text.contains("STAR Method Compliance: Needs Improvement"));
    assert!(text.contains("HELPFUL RESOURCES:"));
  }

  #[test]
  fn results_show_breakdown_and_tier() {
    let questions: Vec<Question> = seed_questions().into_iter().take(2).collect();
    let mut session = InterviewSession::new(
      "s".into(),
      "Engineer".into(),
      DifficultyLevel::Intermediate,
      InterviewType::Mixed,
      questions.clone(),
    );
    let mut a = Answer::new(questions[0].id.clone(), "text", 60, 70);
    a.feedback = Some(Feedback { score: 82, ..Default::default() });
    session.answers.push(a);
    session.score = session.average_score();
    session.end_time = Some(session.start_time + chrono::Duration::seconds(90));

    let text = render_results(&session, None);
    assert!(text.contains("Overall Score: 82.0/100"));
    assert!(text.contains("Questions Answered: 1/2"));
    assert!(text.contains("Total Time: 1.5 minutes"));
    assert!(text.contains(&format!("Q1: 82/100 - {}", questions[0].category)));
    assert!(text.contains(performance_summary(82.0)));
  }
}
