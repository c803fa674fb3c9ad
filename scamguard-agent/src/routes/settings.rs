//! Settings endpoints
//!
//! The synced settings scope is written by the external sign-in flow (or by
//! the user manually); this is its doorway into the agent.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::backend::Backend;
use crate::error::AgentError;
use crate::notify::Notifier;
use crate::state::AppState;
use crate::store::{Settings, SettingsStore, StateStore};

/// GET /api/settings
pub async fn get_settings<S, B, N>(
    State(state): State<Arc<AppState<S, B, N>>>,
) -> Result<Json<Settings>, AgentError>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    Ok(Json(state.store.settings()?))
}

/// PUT /api/settings
pub async fn put_settings<S, B, N>(
    State(state): State<Arc<AppState<S, B, N>>>,
    Json(settings): Json<Settings>,
) -> Result<Json<serde_json::Value>, AgentError>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    state.store.put_settings(&settings)?;
    Ok(Json(json!({ "success": true })))
}
