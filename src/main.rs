use quoteforge::{api, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quoteforge=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    api::routes::serve(config).await
}
