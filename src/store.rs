//! In-memory session store.
//!
//! One workflow run per session id, each behind its own mutex so steps of the same
//! session are serialized while unrelated sessions proceed in parallel. No eviction.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument};

use crate::error::InterviewError;
use crate::workflow::WorkflowState;

pub type SessionHandle = Arc<Mutex<WorkflowState>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the run stored under `id` and return its handle.
    #[instrument(level = "debug", skip(self, state))]
    pub async fn put(&self, id: &str, state: WorkflowState) -> SessionHandle {
        let handle = Arc::new(Mutex::new(state));
        self.inner.write().await.insert(id.to_string(), handle.clone());
        debug!(target: "interview", %id, "Session stored");
        handle
    }

    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.inner.read().await.get(id).cloned()
    }

    /// Like `get`, but unknown ids become `SessionNotFound`.
    pub async fn require(&self, id: &str) -> Result<SessionHandle, InterviewError> {
        self.get(id).await.ok_or_else(|| InterviewError::SessionNotFound(id.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}
