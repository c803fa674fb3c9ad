//! HTTP routes for the agent
//!
//! The local HTTP surface stands in for the extension-runtime message
//! channel: one JSON message endpoint plus a settings endpoint for the
//! external sign-in flow.

mod message;
mod settings;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::backend::Backend;
use crate::notify::Notifier;
use crate::state::AppState;
use crate::store::{SettingsStore, StateStore};

/// Create the router with all routes
pub fn create_router<S, B, N>(state: Arc<AppState<S, B, N>>) -> Router
where
    S: SettingsStore + StateStore + 'static,
    B: Backend + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/message", post(message::handle_message))
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::put_settings),
        )
        .with_state(state)
}
