//! Supabase client for PostgREST table and RPC access.

use reqwest::Client;

use super::types::{FeedbackRow, MaterialRow, QuoteRow};

/// Supabase client for catalog search and quote/feedback rows.
pub struct SupabaseClient {
    client: Client,
    url: String,
    service_role_key: String,
}

impl SupabaseClient {
    /// Create a new Supabase client.
    pub fn new(url: &str, service_role_key: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
        }
    }

    /// Get the PostgREST URL.
    fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    /// Search catalog materials by embedding similarity.
    pub async fn search_materials(
        &self,
        embedding: &[f32],
        threshold: f64,
        limit: usize,
    ) -> anyhow::Result<Vec<MaterialRow>> {
        // Format embedding as a Postgres vector literal
        let embedding_str = format!(
            "[{}]",
            embedding
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );

        let body = serde_json::json!({
            "query_embedding": embedding_str,
            "match_threshold": threshold,
            "match_count": limit,
        });

        let resp = self
            .client
            .post(format!("{}/rpc/search_materials_semantic", self.rest_url()))
            .header("apikey", &self.service_role_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.service_role_key),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            anyhow::bail!("Failed to search materials: {} - {}", status, text);
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get a quote by its external identifier.
    pub async fn get_quote(&self, quote_id: &str) -> anyhow::Result<Option<QuoteRow>> {
        let resp = self
            .client
            .get(format!(
                "{}/quotes?quote_id=eq.{}",
                self.rest_url(),
                urlencoding::encode(quote_id)
            ))
            .header("apikey", &self.service_role_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.service_role_key),
            )
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            anyhow::bail!("Failed to fetch quote: {} - {}", status, text);
        }

        let quotes: Vec<QuoteRow> = serde_json::from_str(&text)?;
        Ok(quotes.into_iter().next())
    }

    /// Insert a feedback row and return the stored representation.
    pub async fn insert_feedback(&self, feedback: &FeedbackRow) -> anyhow::Result<FeedbackRow> {
        let resp = self
            .client
            .post(format!("{}/feedback", self.rest_url()))
            .header("apikey", &self.service_role_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.service_role_key),
            )
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(feedback)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            anyhow::bail!("Failed to insert feedback: {} - {}", status, text);
        }

        let rows: Vec<FeedbackRow> = serde_json::from_str(&text)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No feedback row returned"))
    }
}
