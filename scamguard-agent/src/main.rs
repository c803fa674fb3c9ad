//! Scamguard Agent
//!
//! Local scan orchestration service for the browser extension: JSON message
//! surface for the UI, cached scan results, and the background watchlist
//! poller.

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scamguard_agent::{
    routes, AppState, Config, LogNotifier, MemoryStore, Notifier, RpcBackend, SettingsStore,
    SqliteStore, StateStore, WatchlistPoller, WebhookNotifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scamguard_agent=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!(?config, "Loaded configuration");

    match config.db_path.clone() {
        Some(path) => {
            let store = SqliteStore::open(&path)?;
            tracing::info!(%path, "Using SQLite store");
            serve(config, store).await
        }
        None => {
            tracing::info!("No SCAMGUARD_DB set, using in-memory store");
            serve(config, MemoryStore::new()).await
        }
    }
}

async fn serve<S>(config: Config, store: S) -> Result<()>
where
    S: SettingsStore + StateStore + 'static,
{
    let notifier: Box<dyn Notifier> = match &config.notify_webhook {
        Some(url) => Box::new(WebhookNotifier::new(url.clone())),
        None => Box::new(LogNotifier::new()),
    };

    // Create app state
    let state = Arc::new(AppState::new(store, RpcBackend::new(), notifier));

    // Start the watchlist poller
    let poller = WatchlistPoller::new(state.clone());
    tokio::spawn(async move { poller.run().await });

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = format!("127.0.0.1:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Agent listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
