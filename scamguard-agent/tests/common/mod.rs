//! Common test utilities for agent integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum_test::TestServer;

use scamguard_agent::{
    backend::{Backend, Credentials, ProfileScanArgs, SecurityScanRecord, WatchlistAddArgs},
    routes, AgentError, AppState, HostNotification, MemoryStore, Notifier, Settings,
    SettingsStore,
};
use scamguard_core::{
    ProfileInsight, RawEmailScan, RawLinkScan, RawMessageScan, RawProfileScan, WatchlistAlert,
};

/// Mock backend that records every call and serves configurable canned
/// responses.
#[derive(Clone)]
pub struct MockBackend {
    /// Function paths invoked, in order
    pub calls: Arc<RwLock<Vec<String>>>,
    pub profile: Arc<RwLock<RawProfileScan>>,
    pub link: Arc<RwLock<RawLinkScan>>,
    pub email: Arc<RwLock<RawEmailScan>>,
    pub message: Arc<RwLock<RawMessageScan>>,
    pub alerts: Arc<RwLock<Vec<WatchlistAlert>>>,
    /// When set, alert fetches fail with a backend error
    pub fail_alerts: Arc<AtomicBool>,
    /// When set, best-effort history writes fail
    pub fail_saves: Arc<AtomicBool>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            profile: Arc::new(RwLock::new(RawProfileScan {
                trust_score: 88,
                risk_level: "real".to_string(),
                insights: vec![ProfileInsight {
                    kind: "info".to_string(),
                    message: "account is several years old".to_string(),
                }],
                scam_phrases: vec![],
                reasoning: "profile history is consistent".to_string(),
            })),
            link: Arc::new(RwLock::new(RawLinkScan {
                safety_score: 95,
                risk_level: "safe".to_string(),
                recommendation: "No issues found".to_string(),
                threats: vec![],
            })),
            email: Arc::new(RwLock::new(RawEmailScan {
                trust_score: 70,
                risk_level: "legitimate".to_string(),
                recommendation: "Sender checks out".to_string(),
                risks: vec![],
            })),
            message: Arc::new(RwLock::new(RawMessageScan {
                risk_score: 10,
                risk_level: "low".to_string(),
                detected_patterns: vec![],
                recommendation: "Nothing suspicious".to_string(),
            })),
            alerts: Arc::new(RwLock::new(Vec::new())),
            fail_alerts: Arc::new(AtomicBool::new(false)),
            fail_saves: Arc::new(AtomicBool::new(false)),
        }
    }

    fn record(&self, path: &str) {
        self.calls.write().unwrap().push(path.to_string());
    }

    /// Number of recorded calls to a given function path.
    pub fn count(&self, path: &str) -> usize {
        self.calls.read().unwrap().iter().filter(|c| *c == path).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn scan_profile(
        &self,
        _creds: &Credentials,
        _args: ProfileScanArgs,
    ) -> Result<RawProfileScan, AgentError> {
        self.record("scans:scanProfile");
        Ok(self.profile.read().unwrap().clone())
    }

    async fn scan_link(
        &self,
        _creds: &Credentials,
        _url: &str,
        _context: Option<&str>,
    ) -> Result<RawLinkScan, AgentError> {
        self.record("security:scanLink");
        Ok(self.link.read().unwrap().clone())
    }

    async fn verify_email(
        &self,
        _creds: &Credentials,
        _email: &str,
    ) -> Result<RawEmailScan, AgentError> {
        self.record("security:verifyEmail");
        Ok(self.email.read().unwrap().clone())
    }

    async fn scan_message(
        &self,
        _creds: &Credentials,
        _text: &str,
        _source: &str,
    ) -> Result<RawMessageScan, AgentError> {
        self.record("messageScans:scanMessage");
        Ok(self.message.read().unwrap().clone())
    }

    async fn monitoring_alerts(
        &self,
        _creds: &Credentials,
        _unread_only: bool,
    ) -> Result<Vec<WatchlistAlert>, AgentError> {
        self.record("monitoring:getMonitoringAlerts");
        if self.fail_alerts.load(Ordering::SeqCst) {
            return Err(AgentError::Backend("monitoring unavailable".to_string()));
        }
        Ok(self.alerts.read().unwrap().clone())
    }

    async fn add_to_watchlist(
        &self,
        _creds: &Credentials,
        _args: WatchlistAddArgs,
    ) -> Result<(), AgentError> {
        self.record("monitoring:addToWatchlist");
        Ok(())
    }

    async fn save_scan_result(
        &self,
        _creds: &Credentials,
        _result: &scamguard_core::ScanResult,
    ) -> Result<(), AgentError> {
        self.record("scans:saveScanResult");
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AgentError::Backend("history write failed".to_string()));
        }
        Ok(())
    }

    async fn save_security_scan(
        &self,
        _creds: &Credentials,
        _record: &SecurityScanRecord,
    ) -> Result<(), AgentError> {
        self.record("security:saveSecurityScan");
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AgentError::Backend("history write failed".to_string()));
        }
        Ok(())
    }
}

/// Notifier that captures raised notifications.
#[derive(Clone)]
pub struct RecordingNotifier {
    pub sent: Arc<RwLock<Vec<HostNotification>>>,
    pub fail: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &HostNotification) -> Result<(), AgentError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AgentError::Backend("notification channel down".to_string()));
        }
        self.sent.write().unwrap().push(notification.clone());
        Ok(())
    }
}

pub type TestState = Arc<AppState<MemoryStore, MockBackend, RecordingNotifier>>;

/// Create app state over in-memory stores with a mock backend.
pub fn test_state() -> (TestState, MockBackend, RecordingNotifier) {
    let backend = MockBackend::new();
    let notifier = RecordingNotifier::new();
    let state = Arc::new(AppState::new(
        MemoryStore::new(),
        backend.clone(),
        notifier.clone(),
    ));
    (state, backend, notifier)
}

/// Store a credential and backend URL, as the external sign-in flow would.
pub fn sign_in(state: &TestState) {
    state
        .store
        .put_settings(&Settings {
            auth_token: Some("test-token".to_string()),
            backend_url: Some("https://backend.example.test".to_string()),
            ..Settings::default()
        })
        .unwrap();
}

/// Create a test server with mock backend and recording notifier.
pub fn create_test_server() -> (TestServer, TestState, MockBackend, RecordingNotifier) {
    let (state, backend, notifier) = test_state();
    let app = routes::create_router(state.clone());
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, state, backend, notifier)
}
