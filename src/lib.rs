//! Interview practice backend.
//!
//! A question bank, a heuristic answer scorer, a job-description parser and an
//! explicit interview state machine, served over HTTP and from a console binary.

pub mod config;
pub mod console;
pub mod domain;
pub mod enrichment;
pub mod error;
pub mod feedback;
pub mod job_parser;
pub mod logic;
pub mod openai;
pub mod protocol;
pub mod repository;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;
pub mod workflow;
