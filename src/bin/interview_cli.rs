//! Interview practice · interactive console
//!
//! Runs the same workflow as the HTTP server against stdin/stdout.
//! Uses OpenAI enrichment when OPENAI_API_KEY is set, template text otherwise.
//! Logs go to stderr (LOG_LEVEL, default "warn").

use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing::{info, instrument};

use interview_backend::console::{
  difficulty_for_choice, read_block, render_feedback, render_question, render_results, type_for_choice,
};
use interview_backend::state::AppState;
use interview_backend::telemetry;
use interview_backend::workflow::{AnswerInput, Progress, RunConfig, DEFAULT_JOB_ROLE, DEFAULT_QUESTION_COUNT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_cli_tracing();

  let stdin = io::stdin();
  let mut input = stdin.lock();

  print_banner();
  let config = match configure(&mut input) {
    Ok(c) => c,
    Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
      println!("\nGoodbye!");
      return Ok(());
    }
    Err(e) => return Err(e.into()),
  };

  let state = AppState::new();
  if let Err(e) = run_interview(&state, config, &mut input).await {
    println!("Error during interview: {e}");
  }
  Ok(())
}

fn print_banner() {
  println!("============================================================");
  println!("INTERVIEW PREPARATION BOT");
  println!("============================================================\n");
}

/// Prompt until the reply is one of `options` (any reply when `options` is empty).
fn ask<R: BufRead>(input: &mut R, prompt: &str, options: &[&str]) -> io::Result<String> {
  loop {
    print!("{prompt}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      return Err(io::ErrorKind::UnexpectedEof.into());
    }
    let reply = line.trim().to_string();
    if options.is_empty() || options.contains(&reply.as_str()) {
      return Ok(reply);
    }
    println!("Please choose from: {}", options.join(", "));
  }
}

fn configure<R: BufRead>(input: &mut R) -> io::Result<RunConfig> {
  println!("INTERVIEW CONFIGURATION");
  println!("------------------------------");

  let job_role = ask(input, &format!("Enter job role (default: {DEFAULT_JOB_ROLE})"), &[])?;

  println!("\nInterview Types:\n1. Technical\n2. Behavioral\n3. HR/General\n4. Design\n5. Mixed (All types)");
  let kind = ask(input, "Choose interview type (1-5)", &["1", "2", "3", "4", "5"])?;

  println!("\nDifficulty Levels:\n1. Beginner\n2. Intermediate\n3. Advanced");
  let difficulty = ask(input, "Choose difficulty (1-3)", &["1", "2", "3"])?;

  let question_count = loop {
    let reply = ask(input, &format!("Number of questions (default: {DEFAULT_QUESTION_COUNT})"), &[])?;
    if reply.is_empty() {
      break DEFAULT_QUESTION_COUNT;
    }
    match reply.parse::<usize>() {
      Ok(n) if n > 0 => break n,
      _ => println!("Please enter a positive number"),
    }
  };

  let mut job_description_text = None;
  if ask(input, "Do you have a job description to analyze? (y/n)", &["y", "n"])? == "y" {
    println!("\nPaste the job description (press Enter twice when done):");
    job_description_text = Some(read_block(input)?).filter(|t| !t.trim().is_empty());
  }

  let defaults = RunConfig::default();
  Ok(RunConfig {
    job_role: if job_role.is_empty() { defaults.job_role } else { job_role },
    kind: type_for_choice(&kind).unwrap_or(defaults.kind),
    difficulty: difficulty_for_choice(&difficulty).unwrap_or(defaults.difficulty),
    question_count,
    job_description_text,
    shuffle_seed: None,
  })
}

fn collect_answer<R: BufRead>(input: &mut R) -> io::Result<(String, u8)> {
  println!("Type your answer (press Enter twice when done):");
  let text = read_block(input)?;
  loop {
    match ask(input, "Rate your confidence (1-100)", &[])?.parse::<u8>() {
      Ok(c) if (1..=100).contains(&c) => return Ok((text, c)),
      Ok(_) => println!("Please enter a number between 1 and 100"),
      Err(_) => println!("Please enter a valid number"),
    }
  }
}

#[instrument(level = "info", skip_all, fields(job_role = %config.job_role, kind = %config.kind))]
async fn run_interview<R: BufRead>(
  state: &AppState,
  config: RunConfig,
  input: &mut R,
) -> Result<(), Box<dyn std::error::Error>> {
  println!("\nStarting interview...");
  let run = state.workflow.start(config).await?;
  let session_id = run.session_id().unwrap_or_default().to_string();
  let handle = state.store.put(&session_id, run).await;
  let mut run = handle.lock().await;

  let total = run.session.as_ref().map(|s| s.questions.len()).unwrap_or(0);
  println!("\nInterview initialized with {total} questions");
  if let Some(job) = &run.job_description {
    println!("\nDetected role: {} at {} ({} industry)", job.title, job.company, job.industry);
    for tip in &run.context.research_tips {
      println!("  * {tip}");
    }
  }

  while run.awaiting_answer() {
    let index = run.session.as_ref().map(|s| s.current_question_index).unwrap_or(0);
    if let Some(q) = &run.current_question {
      print!("{}", render_question(index, total, q, run.context.question_presentation.as_deref()));
    }

    let started = Instant::now();
    let (text, confidence) = match collect_answer(input) {
      Ok(a) => a,
      Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
        state.workflow.finish_early(&mut run).await?;
        break;
      }
      Err(e) => return Err(e.into()),
    };
    let elapsed = u32::try_from(started.elapsed().as_secs()).unwrap_or(u32::MAX);

    let progress = state.workflow.submit(&mut run, AnswerInput::new(text, elapsed, confidence)).await?;
    if let Some(fb) = &run.feedback {
      print!("{}", render_feedback(fb));
    }
    if let Some(f) = run.context.followup_questions.as_deref().filter(|f| !f.trim().is_empty()) {
      println!("Possible follow-ups:\n{f}");
    }

    if progress == Progress::AwaitingAnswer {
      let stop = match ask(input, "Continue to next question? (y/n)", &["y", "n"]) {
        Ok(reply) => reply == "n",
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => true,
        Err(e) => return Err(e.into()),
      };
      if stop {
        state.workflow.finish_early(&mut run).await?;
      }
    }
  }

  if let Some(session) = &run.session {
    print!("{}", render_results(session, run.context.overall_assessment.as_deref()));
    info!(target: "interview", session_id = %session.id, answered = session.answers.len(), "Console interview finished");
  }
  Ok(())
}
