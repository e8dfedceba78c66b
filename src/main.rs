//! cosvalue - Creatures of Sonaria trade value lookup
//!
//! Terminal front end: look up a creature's value, demand and stability
//! and get trading tips derived from them.

use anyhow::Context;
use cosvalue::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The TUI owns stdout, so logs go to a file
    let log_dir = cosvalue::config::log_dir().context("locating log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "cosvalue.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosvalue=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default().context("loading configuration")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        policy = ?config.tips.policy,
        "Starting cosvalue"
    );

    // Run the application
    let mut app = App::new(config).await.context("starting terminal UI")?;
    app.run().await?;

    tracing::info!("Exiting");
    Ok(())
}
