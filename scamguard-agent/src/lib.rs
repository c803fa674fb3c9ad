//! Scamguard Agent
//!
//! Client-side scan orchestration: routes scan requests from UI surfaces to
//! the remote analysis backend, caches and normalizes results, and runs the
//! watchlist polling loop that surfaces new risk alerts without duplicate
//! notifications.

pub mod auth;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod notify;
pub mod poller;
pub mod router;
pub mod routes;
pub mod rpc;
pub mod state;
pub mod store;

pub use backend::{Backend, Credentials};
pub use config::Config;
pub use error::AgentError;
pub use notify::{HostNotification, LogNotifier, Notifier, WebhookNotifier};
pub use poller::{PollOutcome, WatchlistPoller, POLL_INTERVAL};
pub use router::{dispatch, Envelope};
pub use rpc::{RpcBackend, RpcClient};
pub use state::{AppState, CompletionEvent};
pub use store::{CacheEntry, MemoryStore, Settings, SettingsStore, SqliteStore, StateStore};
