//! Material catalog: embedding generation and semantic search.
//!
//! The catalog itself lives in Supabase (pgvector). This module owns the two
//! external calls needed to query it (embedding the query text, then the
//! similarity-search RPC) behind a narrow trait so the quoting pipeline can
//! be exercised without the external services.

mod embed;
mod supabase;
mod types;

pub use embed::EmbeddingClient;
pub use supabase::SupabaseClient;
pub use types::{FeedbackRow, MaterialRow, QuoteRow, UserType, Verdict};

use async_trait::async_trait;
use std::sync::Arc;

/// Fixed similarity threshold for catalog matches.
pub const MATCH_THRESHOLD: f64 = 0.78;

/// Semantic lookup of catalog materials.
#[async_trait]
pub trait MaterialCatalog: Send + Sync {
    /// Return up to `limit` catalog rows ranked by similarity to `query`.
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<MaterialRow>>;
}

/// Production catalog: embeds the query and runs the Supabase RPC.
pub struct SemanticCatalog {
    supabase: Arc<SupabaseClient>,
    embedder: Arc<EmbeddingClient>,
}

impl SemanticCatalog {
    /// Create a new semantic catalog over the given clients.
    pub fn new(supabase: Arc<SupabaseClient>, embedder: Arc<EmbeddingClient>) -> Self {
        Self { supabase, embedder }
    }
}

#[async_trait]
impl MaterialCatalog for SemanticCatalog {
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<MaterialRow>> {
        let embedding = self.embedder.embed(query).await?;
        self.supabase
            .search_materials(&embedding, MATCH_THRESHOLD, limit)
            .await
    }
}
