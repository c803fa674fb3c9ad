//! Analysis backend seam
//!
//! The router and the poller talk to the backend through this trait; the
//! production implementation is [`crate::rpc::RpcBackend`], tests substitute
//! a recording mock.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use scamguard_core::{
    RawEmailScan, RawLinkScan, RawMessageScan, RawProfileScan, ScanResult, ThreatRisk,
    WatchlistAlert,
};

use crate::error::AgentError;

/// Per-request credential, produced by the auth gate from the synced
/// settings. The token is required before the gate hands one out; the base
/// URL may still be unset, which the wire client rejects as `NotConfigured`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    pub base_url: Option<String>,
}

/// Arguments for `scans:scanProfile`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileScanArgs {
    pub profile_url: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_data: Option<Value>,
}

/// Arguments for `monitoring:addToWatchlist`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistAddArgs {
    pub profile_url: String,
    pub platform: String,
    pub check_frequency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_trust_score: Option<u8>,
}

/// Best-effort record for `security:saveSecurityScan`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScanRecord {
    pub scan_type: String,
    pub subject: String,
    pub risk_level: ThreatRisk,
    pub score: u8,
}

/// The remote analysis backend, one method per consumed RPC function.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn scan_profile(
        &self,
        creds: &Credentials,
        args: ProfileScanArgs,
    ) -> Result<RawProfileScan, AgentError>;

    async fn scan_link(
        &self,
        creds: &Credentials,
        url: &str,
        context: Option<&str>,
    ) -> Result<RawLinkScan, AgentError>;

    async fn verify_email(
        &self,
        creds: &Credentials,
        email: &str,
    ) -> Result<RawEmailScan, AgentError>;

    async fn scan_message(
        &self,
        creds: &Credentials,
        text: &str,
        source: &str,
    ) -> Result<RawMessageScan, AgentError>;

    /// Unread monitoring alerts, newest first.
    async fn monitoring_alerts(
        &self,
        creds: &Credentials,
        unread_only: bool,
    ) -> Result<Vec<WatchlistAlert>, AgentError>;

    async fn add_to_watchlist(
        &self,
        creds: &Credentials,
        args: WatchlistAddArgs,
    ) -> Result<(), AgentError>;

    /// Best-effort history write; callers log and swallow failures.
    async fn save_scan_result(
        &self,
        creds: &Credentials,
        result: &ScanResult,
    ) -> Result<(), AgentError>;

    /// Best-effort history write; callers log and swallow failures.
    async fn save_security_scan(
        &self,
        creds: &Credentials,
        record: &SecurityScanRecord,
    ) -> Result<(), AgentError>;
}
