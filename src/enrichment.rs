//! Text-generation capability used to enrich workflow output.
//!
//! The workflow only ever sees `dyn Enricher`. Failures are absorbed by the caller,
//! which falls back to the deterministic text it would have produced anyway.

use async_trait::async_trait;
use tracing::warn;

use crate::error::EnrichError;
use crate::util::trunc_for_log;

#[async_trait]
pub trait Enricher: Send + Sync {
  /// Prompt in, free-form text out.
  async fn complete(&self, prompt: &str) -> Result<String, EnrichError>;

  /// Short label for logs.
  fn name(&self) -> &'static str;
}

/// Enrichment turned off; every call reports `Disabled` so callers use their fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledEnricher;

#[async_trait]
impl Enricher for DisabledEnricher {
  async fn complete(&self, _prompt: &str) -> Result<String, EnrichError> {
    Err(EnrichError::Disabled)
  }

  fn name(&self) -> &'static str { "disabled" }
}

/// Ask the enricher, or return `fallback` when it fails or answers with blank text.
pub async fn enrich_or(enricher: &dyn Enricher, purpose: &str, prompt: &str, fallback: String) -> String {
  match enricher.complete(prompt).await {
    Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
    Ok(_) => {
      warn!(target: "enrichment", %purpose, enricher = enricher.name(), "Empty enrichment; using fallback.");
      fallback
    }
    Err(EnrichError::Disabled) => fallback,
    Err(e) => {
      warn!(target: "enrichment", %purpose, enricher = enricher.name(), error = %e, prompt = %trunc_for_log(prompt, 60), "Enrichment failed; using fallback.");
      fallback
    }
  }
}
