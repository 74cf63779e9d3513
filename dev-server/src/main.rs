//! Development server for ui work
//!
//! Runs the mock api on a fixed port with demo content, accounts and reviews
//! in every moderation state. Data lives in memory and is rebuilt on every
//! start.
//!
//! Usage: cargo run -p dev-server
//!
//! `DEV_SERVER_PORT` (or a `.env` file) overrides the default port 8000.

use anyhow::{Context, Result};
use test_helpers::mock::DevDataset;
use tracing::info;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = mock_api::telemetry::get_subscriber("info".into());
    mock_api::telemetry::init_subscriber(subscriber)?;

    let port = match std::env::var("DEV_SERVER_PORT") {
        Ok(port) => port.parse().context("DEV_SERVER_PORT must be a port")?,
        Err(_) => DEFAULT_PORT,
    };

    info!("🚀 Starting development server");
    let app = test_helpers::spawn_app_on_port(port).await;
    info!("✅ API server running on http://127.0.0.1:{}", app.port);

    info!("📊 Setting up development data...");
    mock_api::store::seed::demo_content(&app.store);
    let dataset = DevDataset::create(&app).await?;

    info!("🎯 Development server ready!");
    info!("   API: http://127.0.0.1:{}", app.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://127.0.0.1:{} trunk serve",
        app.port
    );
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
