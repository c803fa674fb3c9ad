//! Inbound message endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::backend::Backend;
use crate::notify::Notifier;
use crate::router::{self, Envelope};
use crate::state::AppState;
use crate::store::{SettingsStore, StateStore};

/// POST /api/message
///
/// Always resolves to an envelope with HTTP 200; the router converts every
/// handler failure into `{success:false, error}` rather than an HTTP error,
/// because the caller's exchange must resolve exactly once.
pub async fn handle_message<S, B, N>(
    State(state): State<Arc<AppState<S, B, N>>>,
    Json(message): Json<Value>,
) -> Json<Envelope>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    Json(router::dispatch(state.as_ref(), message).await)
}
