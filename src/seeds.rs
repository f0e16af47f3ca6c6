//! Built-in question bank. Guarantees the app is useful without any external config.

use crate::domain::{AnswerFormat, DifficultyLevel, InterviewType, Question};

fn q(
  id: &str,
  text: &str,
  kind: InterviewType,
  difficulty: DifficultyLevel,
  category: &str,
  time_limit: u32,
  format: Option<AnswerFormat>,
  follow_ups: &[&str],
) -> Question {
  Question {
    id: id.into(),
    text: text.into(),
    kind,
    difficulty,
    category: category.into(),
    time_limit,
    expected_answer_format: format,
    follow_up_prompts: follow_ups.iter().map(|s| s.to_string()).collect(),
  }
}

pub fn seed_questions() -> Vec<Question> {
  use AnswerFormat::{Star, Technical as Tech};
  use DifficultyLevel::{Advanced, Beginner, Intermediate};
  use InterviewType::{Behavioral, Design, Hr, Technical};

  vec![
    // technical / beginner
    q("tech-001", "Explain the difference between let, const, and var in JavaScript.", Technical, Beginner, "JavaScript", 180, Some(Tech),
      &["Can you provide examples of when you would use each?", "What happens with hoisting in each case?"]),
    q("tech-002", "What is the difference between == and === in JavaScript?", Technical, Beginner, "JavaScript", 120, Some(Tech), &[]),
    q("tech-003", "Explain what a REST API is and its key principles.", Technical, Beginner, "Web Development", 240, Some(Tech), &[]),
    // technical / intermediate
    q("tech-101", "Implement a function to reverse a linked list.", Technical, Intermediate, "Data Structures", 300, Some(Tech),
      &["Can you do this iteratively and recursively?", "What's the time and space complexity?"]),
    q("tech-102", "Explain the concept of closures in JavaScript with examples.", Technical, Intermediate, "JavaScript", 300, Some(Tech), &[]),
    q("tech-103", "How would you optimize a slow database query?", Technical, Intermediate, "Database", 360, Some(Tech), &[]),
    // technical / advanced
    q("tech-201", "Design a system to handle millions of concurrent users for a social media platform.", Technical, Advanced, "System Design", 600, Some(Tech),
      &["How would you handle data consistency?", "What about caching strategies?", "How would you scale the database?"]),
    q("tech-202", "Implement a distributed cache with consistent hashing.", Technical, Advanced, "System Design", 900, Some(Tech), &[]),
    // behavioral
    q("behav-001", "Tell me about a time when you had to work with a difficult team member.", Behavioral, Intermediate, "Teamwork", 240, Some(Star),
      &["What was the outcome?", "What would you do differently?", "How did this experience change your approach to teamwork?"]),
    q("behav-002", "Describe a situation where you had to learn a new technology quickly.", Behavioral, Beginner, "Learning", 180, Some(Star), &[]),
    q("behav-003", "Tell me about a time when you made a mistake at work and how you handled it.", Behavioral, Intermediate, "Problem Solving", 240, Some(Star), &[]),
    q("behav-004", "Describe a time when you had to meet a tight deadline.", Behavioral, Beginner, "Time Management", 180, Some(Star), &[]),
    // hr
    q("hr-001", "Why do you want to work for our company?", Hr, Beginner, "Motivation", 120, None,
      &["What specifically attracts you to our mission?", "How do you see yourself contributing to our goals?"]),
    q("hr-002", "Where do you see yourself in 5 years?", Hr, Beginner, "Career Goals", 120, None, &[]),
    q("hr-003", "What are your salary expectations?", Hr, Intermediate, "Compensation", 90, None, &[]),
    q("hr-004", "Why are you leaving your current job?", Hr, Intermediate, "Career Change", 120, None, &[]),
    // design
    q("design-001", "How would you improve the user experience of our mobile app?", Design, Intermediate, "UX Design", 300, None,
      &["What research methods would you use?", "How would you measure success?"]),
    q("design-002", "Design a dashboard for a project management tool.", Design, Advanced, "UI Design", 480, None, &[]),
    q("design-003", "How would you conduct user research for a new feature?", Design, Intermediate, "User Research", 240, None, &[]),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn seed_ids_are_unique() {
    let qs = seed_questions();
    let ids: HashSet<_> = qs.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), qs.len());
    assert_eq!(qs.len(), 19);
  }

  #[test]
  fn behavioral_seeds_expect_star_answers() {
    for q in seed_questions().iter().filter(|q| q.kind == InterviewType::Behavioral) {
      assert!(q.is_star(), "{} should be STAR", q.id);
    }
  }
}
