//! HTTP server exposing the body-analysis pipeline.

use std::sync::Arc;

use anyhow::Context;
use scanfit::config::Config;
use scanfit::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scanfit=info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    if config.api_key.is_none() {
        tracing::warn!(
            "OPENAI_API_KEY is not set; analysis requests will fail until it is configured"
        );
    }

    let analyzer = Arc::new(config.build_analyzer().context("failed to build HTTP client")?);
    tracing::info!(model = %config.model, "Starting scanfit server");

    server::serve(config.bind_addr, analyzer)
        .await
        .context("server error")
}
