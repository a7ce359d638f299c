//! TomeBridge - Main entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tomebridge_engine::api::{run, Cli};
use tomebridge_engine::infrastructure::notifications::TracingNotifier;
use tomebridge_engine::infrastructure::ports::NotificationPort;
use tomebridge_engine::infrastructure::settings::{load_dotenv, ImportSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment files first so RUST_LOG from them applies.
    load_dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tomebridge_engine=info,notify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = ImportSettings::from_env();
    tracing::debug!(?settings, "Loaded settings");

    let notifier: Arc<dyn NotificationPort> = Arc::new(TracingNotifier);
    if let Err(err) = run(cli, settings, notifier.as_ref()).await {
        notifier.error(&format!("Process failed: {err:#}"));
        return Err(err);
    }
    Ok(())
}
