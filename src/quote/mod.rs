//! Quote generation pipeline.
//!
//! Turns a free-text transcript into priced, confidence-scored tasks:
//! extraction (LLM function calling), material resolution (semantic catalog
//! search), pricing (markup + VAT), and confidence scoring.

mod confidence;
mod extract;
mod pricing;
mod resolve;
mod types;

pub use confidence::{confidence_score, confidence_tier, ConfidenceTier};
pub use extract::{ExtractedMaterial, ExtractedTask, TranscriptAnalysis};
pub use pricing::{format_duration, margin_protected_price, ProjectKind};
pub use resolve::MaterialResolver;
pub use types::{Material, Task, UnitPrice};

use std::sync::Arc;

use crate::catalog::MaterialCatalog;
use crate::config::Config;
use crate::llm::LlmClient;

/// Generates proposals from transcripts.
///
/// Holds its collaborators behind `Arc`s; construct once at startup and
/// share through application state.
pub struct ProposalGenerator {
    llm: Arc<dyn LlmClient>,
    resolver: MaterialResolver,
    model: String,
}

impl ProposalGenerator {
    /// Create a generator over the given LLM and catalog.
    pub fn new(llm: Arc<dyn LlmClient>, catalog: Arc<dyn MaterialCatalog>, config: &Config) -> Self {
        Self {
            llm,
            resolver: MaterialResolver::new(
                catalog,
                config.resolver_concurrency,
                config.upstream_timeout,
            ),
            model: config.extraction_model.clone(),
        }
    }

    /// Generate a priced proposal from a free-text transcript.
    pub async fn generate(&self, transcript: &str) -> anyhow::Result<Vec<Task>> {
        let analysis = extract::extract(self.llm.as_ref(), &self.model, transcript).await?;
        let kind = ProjectKind::from_renovation_flag(analysis.is_renovation);

        tracing::debug!(
            "Extracted {} tasks (renovation: {})",
            analysis.tasks.len(),
            analysis.is_renovation
        );

        let mut tasks = Vec::with_capacity(analysis.tasks.len());
        for extracted in &analysis.tasks {
            let materials = self.resolver.resolve_all(&extracted.materials).await;

            tasks.push(Task {
                margin_protected_price: pricing::margin_protected_price(&materials, kind),
                confidence_score: confidence::confidence_score(&materials, &extracted.label),
                estimated_duration: pricing::format_duration(extracted.estimated_hours),
                label: extracted.label.clone(),
                materials,
            });
        }

        Ok(tasks)
    }
}
