//! Runtime configuration loaded from environment variables.
//!
//! All external collaborators (OpenAI, Supabase) are configured here once at
//! startup; handlers receive the constructed clients through shared state
//! rather than building them per request.

use anyhow::Context;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
    /// OpenAI API key, used for both chat completions and embeddings.
    pub openai_api_key: String,
    /// Supabase project URL.
    pub supabase_url: String,
    /// Supabase service-role key for PostgREST access.
    pub supabase_service_role_key: String,
    /// Model used for transcript analysis.
    pub extraction_model: String,
    /// Model used for material-name embeddings.
    pub embedding_model: String,
    /// Maximum concurrent material resolutions per task.
    pub resolver_concurrency: usize,
    /// Timeout applied to each external call during material resolution.
    pub upstream_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Required: `OPENAI_API_KEY`, `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY`.
    /// Everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(p) => p.parse::<u16>().context("PORT must be a valid port number")?,
            Err(_) => 3000,
        };

        let openai_api_key =
            std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
        let supabase_url = std::env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?;
        let supabase_service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY")
            .context("SUPABASE_SERVICE_ROLE_KEY must be set")?;

        let extraction_model =
            std::env::var("EXTRACTION_MODEL").unwrap_or_else(|_| "gpt-4".to_string());
        let embedding_model = std::env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| "text-embedding-3-small".to_string());

        let resolver_concurrency = match std::env::var("RESOLVER_CONCURRENCY") {
            Ok(n) => {
                let n = n
                    .parse::<usize>()
                    .context("RESOLVER_CONCURRENCY must be a positive integer")?;
                anyhow::ensure!(n > 0, "RESOLVER_CONCURRENCY must be at least 1");
                n
            }
            Err(_) => 4,
        };

        let upstream_timeout = match std::env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(s) => Duration::from_secs(
                s.parse::<u64>()
                    .context("UPSTREAM_TIMEOUT_SECS must be an integer number of seconds")?,
            ),
            Err(_) => Duration::from_secs(30),
        };

        Ok(Self {
            host,
            port,
            openai_api_key,
            supabase_url,
            supabase_service_role_key,
            extraction_model,
            embedding_model,
            resolver_concurrency,
            upstream_timeout,
        })
    }
}
