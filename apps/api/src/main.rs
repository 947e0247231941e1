mod config;
mod contacts;
mod errors;
mod llm_client;
mod models;
mod notify;
mod routes;
mod state;
mod wisher;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::contacts::XataClient;
use crate::llm_client::LlmClient;
use crate::notify::NovuClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wisher::scheduler::spawn_daily_scan;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let contacts = XataClient::new(
        &config.xata_database_url,
        &config.xata_branch,
        config.xata_api_key.clone(),
    );
    let llm = LlmClient::new(&config.openai_api_url, config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let novu = NovuClient::new(&config.novu_api_url, config.novu_api_key.clone());

    let state = AppState {
        contacts: Arc::new(contacts),
        suggestions: Arc::new(llm),
        notifier: Arc::new(novu),
        security_key: Arc::from(config.security_key.as_str()),
    };

    let app = build_router(state.clone()).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server started on port {}", config.port);

    info!("Starting cron job...");
    spawn_daily_scan(state);

    axum::serve(listener, app).await?;

    Ok(())
}
