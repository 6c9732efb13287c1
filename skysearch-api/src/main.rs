use anyhow::Context;
use skysearch_api::{app, AppState};
use skysearch_infra::{AmadeusClient, Config};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "skysearch_api=debug,skysearch_infra=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    if !config.provider.has_credentials() {
        tracing::warn!("AMADEUS_CLIENT_ID / AMADEUS_CLIENT_SECRET not set; provider calls will fail authentication");
    }

    let provider = AmadeusClient::new(config.provider.clone()).context("Failed to build provider client")?;
    let app = app(AppState::new(Arc::new(provider)));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
