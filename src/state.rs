//! Application state: question bank, session store, enrichment client and workflow.
//!
//! This module owns:
//!   - the question repository (built-in bank + TOML additions)
//!   - the session store (created here, handed to every handler)
//!   - the enrichment capability (OpenAI when configured, disabled otherwise)
//!   - the workflow that ties them together

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{load_agent_config_from_env, AgentConfig};
use crate::enrichment::{DisabledEnricher, Enricher};
use crate::openai::OpenAI;
use crate::repository::QuestionRepository;
use crate::store::SessionStore;
use crate::workflow::InterviewWorkflow;

#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<InterviewWorkflow>,
    pub store: SessionStore,
}

impl AppState {
    /// Build state from env: load config, build the bank, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_agent_config_from_env().unwrap_or_default();
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: AgentConfig) -> Self {
        let AgentConfig { prompts, questions } = cfg;
        let repo = Arc::new(QuestionRepository::with_configured(&questions));

        let enricher: Arc<dyn Enricher> = match OpenAI::from_env(&prompts.system) {
            Some(oa) => {
                info!(target: "interview_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI enrichment enabled.");
                Arc::new(oa)
            }
            None => {
                info!(target: "interview_backend", "OpenAI disabled (no OPENAI_API_KEY). Using template text.");
                Arc::new(DisabledEnricher)
            }
        };

        Self::with_parts(InterviewWorkflow::new(repo, enricher, prompts), SessionStore::new())
    }

    pub fn with_parts(workflow: InterviewWorkflow, store: SessionStore) -> Self {
        Self { workflow: Arc::new(workflow), store }
    }

    pub fn repository(&self) -> &QuestionRepository {
        self.workflow.repository()
    }
}
