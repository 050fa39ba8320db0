//! HTTP server wiring: shared state, router, startup, and shutdown.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::{EmbeddingClient, MaterialCatalog, SemanticCatalog, SupabaseClient};
use crate::config::Config;
use crate::llm::{LlmClient, OpenAiClient};
use crate::quote::ProposalGenerator;

use super::feedback;
use super::materials;
use super::proposal;
use super::types::HealthResponse;

/// Shared application state.
///
/// All external clients are constructed once here and injected into the
/// handlers; nothing is built per request.
pub struct AppState {
    pub config: Config,
    pub generator: ProposalGenerator,
    pub catalog: Arc<dyn MaterialCatalog>,
    pub store: Arc<SupabaseClient>,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    let embedder = Arc::new(EmbeddingClient::new(
        config.openai_api_key.clone(),
        config.embedding_model.clone(),
    ));
    let store = Arc::new(SupabaseClient::new(
        &config.supabase_url,
        &config.supabase_service_role_key,
    ));
    let catalog: Arc<dyn MaterialCatalog> =
        Arc::new(SemanticCatalog::new(Arc::clone(&store), embedder));
    let generator = ProposalGenerator::new(llm, Arc::clone(&catalog), &config);

    let state = Arc::new(AppState {
        config: config.clone(),
        generator,
        catalog,
        store,
    });

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/proposal", post(proposal::generate_proposal))
        .route("/api/materials", get(materials::search_materials))
        .route("/api/feedback", post(feedback::submit_feedback))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
