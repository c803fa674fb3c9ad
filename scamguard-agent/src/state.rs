//! Agent state management

use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::backend::Backend;
use crate::notify::Notifier;
use crate::store::{SettingsStore, StateStore};

/// Completion push sent back toward the originating UI surface,
/// fire-and-forget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub result: Value,
}

/// Shared application state, generic over the store, backend, and notifier
/// seams so tests can substitute each independently.
pub struct AppState<S, B, N> {
    pub store: S,
    pub backend: B,
    pub notifier: N,
    events: broadcast::Sender<CompletionEvent>,
}

impl<S, B, N> AppState<S, B, N>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    pub fn new(store: S, backend: B, notifier: N) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            store,
            backend,
            notifier,
            events,
        }
    }

    /// Subscribe to completion pushes.
    pub fn subscribe(&self) -> broadcast::Receiver<CompletionEvent> {
        self.events.subscribe()
    }

    /// Best-effort push; a send with no receivers means the original caller
    /// is no longer addressable, which is fine.
    pub fn push(&self, event: CompletionEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("completion push dropped: no listeners");
        }
    }
}
