//! Heuristic answer scorer.
//!
//! Five independent passes adjust a base score of 50 and append strengths or
//! improvements: length, content keywords, STAR structure (STAR questions only),
//! confidence alignment and time management. The last two never move the score.
//! The result is a pure function of its inputs.

use crate::domain::{Answer, Feedback, Question};
use crate::util::word_count;

const BASE_SCORE: i32 = 50;

pub const POSITIVE_KEYWORDS: &[&str] = &[
  "experience", "example", "result", "learned", "improved", "achieved",
  "implemented", "developed", "created", "solved", "optimized", "delivered",
];

/// Keywords per STAR component, in Situation/Task/Action/Result order.
pub const STAR_KEYWORDS: &[(&str, &[&str])] = &[
  ("situation", &["situation", "context", "background", "project", "challenge", "problem"]),
  ("task", &["task", "responsibility", "goal", "objective", "assigned", "needed"]),
  ("action", &["action", "did", "implemented", "decided", "approached", "used", "created"]),
  ("result", &["result", "outcome", "achieved", "improved", "increased", "decreased", "learned"]),
];

pub const STAR_RESOURCE: &str =
  "Learn more about the STAR method: https://www.thebalancemoney.com/what-is-the-star-interview-response-technique-2061629";
pub const QUESTIONS_RESOURCE: &str =
  "Review common interview questions: https://www.thebalancemoney.com/top-job-interview-questions-2061228";

pub const TOO_BRIEF: &str = "Answer is too brief - provide more detail and examples";
pub const TOO_LENGTHY: &str = "Answer is too lengthy - focus on key points and be more concise";
pub const GOOD_LENGTH: &str = "Good answer length and detail level";
pub const RICH_EXAMPLES: &str = "Rich in relevant examples and specific outcomes";
pub const SOME_EXAMPLES: &str = "Includes some relevant examples";
pub const NEEDS_EXAMPLES: &str = "Add more specific examples and concrete outcomes";
pub const STAR_FOLLOWED: &str = "Follows STAR method structure effectively";
pub const STAR_MISSING: &str = "Structure your answer using the STAR method (Situation, Task, Action, Result)";
pub const OVERCONFIDENT: &str =
  "Your confidence level seems higher than your answer quality - practice more or be more realistic";
pub const UNDERCONFIDENT: &str =
  "Your answer quality is good - you can be more confident in your responses";
pub const OVER_TIME: &str = "Work on being more concise - practice timing your responses";
pub const TOO_QUICK: &str = "Take more time to think through your answer before responding";
pub const GOOD_TIMING: &str = "Good time management for your response";

/// Running tally shared by the analysis passes.
struct Tally {
  score: i32,
  strengths: Vec<String>,
  improvements: Vec<String>,
}

impl Tally {
  fn strength(&mut self, delta: i32, msg: &str) {
    self.score += delta;
    self.strengths.push(msg.to_string());
  }

  fn improvement(&mut self, delta: i32, msg: &str) {
    self.score += delta;
    self.improvements.push(msg.to_string());
  }
}

/// Score one answer against its question.
pub fn score(answer: &Answer, question: &Question) -> Feedback {
  let text = answer.text.to_lowercase();
  let mut t = Tally { score: BASE_SCORE, strengths: Vec::new(), improvements: Vec::new() };

  analyze_length(word_count(&answer.text), &mut t);
  analyze_content(&text, &mut t);
  let star_method_compliance = if question.is_star() { Some(analyze_star(&text, &mut t)) } else { None };
  analyze_confidence(answer.confidence, &mut t);
  analyze_timing(answer.time_spent, question.time_limit, &mut t);

  let score = t.score.clamp(0, 100) as u8;

  Feedback {
    score,
    strengths: t.strengths,
    improvements: t.improvements,
    star_method_compliance,
    suggestions: suggestions(question.is_star()),
    overall_assessment: assessment_for(score).to_string(),
  }
}

fn analyze_length(words: usize, t: &mut Tally) {
  if words < 20 {
    t.improvement(-15, TOO_BRIEF);
  } else if words > 300 {
    t.improvement(-10, TOO_LENGTHY);
  } else {
    t.strength(10, GOOD_LENGTH);
  }
}

/// Number of distinct positive keywords present in the (lowercased) text.
pub fn keyword_hits(text: &str) -> usize {
  POSITIVE_KEYWORDS.iter().filter(|k| text.contains(*k)).count()
}

fn analyze_content(text: &str, t: &mut Tally) {
  match keyword_hits(text) {
    0 => t.improvement(-10, NEEDS_EXAMPLES),
    1 | 2 => t.strength(5, SOME_EXAMPLES),
    _ => t.strength(15, RICH_EXAMPLES),
  }
}

/// Number of STAR components with at least one keyword present.
pub fn star_components(text: &str) -> usize {
  STAR_KEYWORDS
    .iter()
    .filter(|(_, words)| words.iter().any(|w| text.contains(w)))
    .count()
}

fn analyze_star(text: &str, t: &mut Tally) -> bool {
  let compliant = star_components(text) >= 3;
  if compliant {
    t.strength(20, STAR_FOLLOWED);
  } else {
    t.improvement(-15, STAR_MISSING);
  }
  compliant
}

// Compared against the running (unclamped) score.
fn analyze_confidence(confidence: u8, t: &mut Tally) {
  if confidence > 80 && t.score < 60 {
    t.improvement(0, OVERCONFIDENT);
  } else if confidence < 50 && t.score > 70 {
    t.strength(0, UNDERCONFIDENT);
  }
}

fn analyze_timing(time_spent: u32, time_limit: u32, t: &mut Tally) {
  if time_spent > time_limit {
    t.improvement(0, OVER_TIME);
  } else if time_spent < 30 {
    t.improvement(0, TOO_QUICK);
  } else {
    t.strength(0, GOOD_TIMING);
  }
}

fn suggestions(star: bool) -> Vec<String> {
  let mut out = Vec::with_capacity(4);
  if star {
    out.push(STAR_RESOURCE.to_string());
  }
  out.push(QUESTIONS_RESOURCE.to_string());
  out.push("Practice your responses out loud to improve fluency".to_string());
  out.push("Research the company and role thoroughly before the interview".to_string());
  out
}

/// Four-tier message for a clamped score.
pub fn assessment_for(score: u8) -> &'static str {
  match score {
    80..=u8::MAX => "Excellent response! You demonstrate strong communication skills and relevant experience.",
    60..=79 => "Good response with room for improvement. Focus on the suggested areas to strengthen your answer.",
    40..=59 => "Adequate response but needs significant improvement. Practice with the suggested resources.",
    _ => "Response needs substantial work. Consider practicing more and reviewing interview best practices.",
  }
}
