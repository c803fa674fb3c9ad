//! Watchlist poller
//!
//! Recurring background job that surfaces new monitoring alerts as host
//! notifications. It has no UI surface waiting on it, so every failure mode
//! is logged and swallowed; the one load-bearing ordering is that the alert
//! id is persisted *before* the notification is raised, which keeps the
//! cycle at-most-once even if the process dies mid-cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use crate::auth;
use crate::backend::Backend;
use crate::error::AgentError;
use crate::notify::{HostNotification, Notifier};
use crate::state::AppState;
use crate::store::{SettingsStore, StateStore};

/// Fixed polling period. Host timers are coarse; nothing here is suitable
/// for sub-minute responsiveness.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// What one polling cycle did, for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Preference flags disabled polling; silent no-op, not an error.
    Disabled,
    /// No stored credential; swallowed, the poller never surfaces errors.
    SignedOut,
    /// Backend or storage failure; logged and swallowed.
    Failed,
    /// No unread alerts.
    NoAlerts,
    /// Newest alert is below the configured severity threshold.
    BelowThreshold,
    /// Newest alert was already surfaced in an earlier cycle.
    AlreadyNotified,
    /// Exactly one notification raised for this alert id.
    Notified(String),
}

pub struct WatchlistPoller<S, B, N> {
    state: Arc<AppState<S, B, N>>,
    /// Serializes the read-compare-persist-notify sequence; cycles never
    /// overlap even on a multithreaded executor.
    cycle_lock: Mutex<()>,
}

impl<S, B, N> WatchlistPoller<S, B, N>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    pub fn new(state: Arc<AppState<S, B, N>>) -> Self {
        Self {
            state,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Run forever on the fixed schedule.
    pub async fn run(&self) {
        let mut interval = tokio::time::interval(POLL_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            let outcome = self.cycle().await;
            tracing::debug!(?outcome, "watchlist poll cycle finished");
        }
    }

    /// One polling cycle. Infallible by design: there is nowhere to report
    /// an error to.
    pub async fn cycle(&self) -> PollOutcome {
        let _guard = self.cycle_lock.lock().await;

        let settings = match self.state.store.settings() {
            Ok(s) => s,
            Err(error) => {
                tracing::warn!(%error, "watchlist poll: settings read failed");
                return PollOutcome::Failed;
            }
        };

        if !settings.watchlist_alerts || !settings.notifications_enabled {
            return PollOutcome::Disabled;
        }

        let creds = match auth::require_credentials(&self.state.store) {
            Ok(c) => c,
            Err(AgentError::NotSignedIn) => {
                tracing::debug!("watchlist poll skipped: not signed in");
                return PollOutcome::SignedOut;
            }
            Err(error) => {
                tracing::warn!(%error, "watchlist poll: credential read failed");
                return PollOutcome::Failed;
            }
        };

        let alerts = match self.state.backend.monitoring_alerts(&creds, true).await {
            Ok(a) => a,
            Err(error) => {
                tracing::warn!(%error, "watchlist poll: alert fetch failed");
                return PollOutcome::Failed;
            }
        };

        // Alerts arrive newest first; only the head is ever surfaced.
        let Some(newest) = alerts.first() else {
            return PollOutcome::NoAlerts;
        };

        if newest.severity < settings.alert_level {
            return PollOutcome::BelowThreshold;
        }

        match self.state.store.last_notified_alert() {
            Ok(last) if last.as_deref() == Some(newest.alert_id.as_str()) => {
                return PollOutcome::AlreadyNotified;
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%error, "watchlist poll: dedup state read failed");
                return PollOutcome::Failed;
            }
        }

        // Persist first: if the notification call fails or the process is
        // torn down right after, the alert is still never surfaced twice.
        if let Err(error) = self.state.store.set_last_notified_alert(&newest.alert_id) {
            tracing::warn!(%error, "watchlist poll: dedup state write failed");
            return PollOutcome::Failed;
        }

        let notification = HostNotification::from_alert(newest);
        if let Err(error) = self.state.notifier.notify(&notification).await {
            tracing::warn!(%error, alert_id = %newest.alert_id, "host notification failed");
        } else {
            tracing::info!(alert_id = %newest.alert_id, "watchlist alert surfaced");
        }

        PollOutcome::Notified(newest.alert_id.clone())
    }
}
