//! Remote call client for the analysis backend
//!
//! The backend exposes three RPC verbs; every call is a single HTTP POST of
//! `{path, args}` to `{baseUrl}/api/{verb}` with the bearer credential
//! attached. An unset base URL fails fast with `NotConfigured` rather than
//! attempting a request to an undefined target. No retries anywhere: a failed
//! call requires a new explicit user action.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use scamguard_core::{
    RawEmailScan, RawLinkScan, RawMessageScan, RawProfileScan, ScanResult, WatchlistAlert,
};

use crate::backend::{
    Backend, Credentials, ProfileScanArgs, SecurityScanRecord, WatchlistAddArgs,
};
use crate::error::AgentError;

/// The three backend verbs. `query` is an idempotent read, `mutation` a
/// durable write, `action` side-effecting and possibly non-idempotent.
#[derive(Debug, Clone, Copy)]
pub enum RpcVerb {
    Query,
    Mutation,
    Action,
}

impl RpcVerb {
    fn as_str(&self) -> &'static str {
        match self {
            RpcVerb::Query => "query",
            RpcVerb::Mutation => "mutation",
            RpcVerb::Action => "action",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcResponse {
    status: String,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error_message: Option<String>,
}

/// HTTP client for the backend RPC surface.
pub struct RpcClient {
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    async fn call(
        &self,
        creds: &Credentials,
        verb: RpcVerb,
        path: &str,
        args: Value,
    ) -> Result<Value, AgentError> {
        let base = creds
            .base_url
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .ok_or(AgentError::NotConfigured)?;

        let url = format!("{}/api/{}", base.trim_end_matches('/'), verb.as_str());
        tracing::debug!(%url, %path, "backend call");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&creds.token)
            .json(&json!({ "path": path, "args": args }))
            .send()
            .await
            .map_err(|e| AgentError::Backend(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Backend(format!("HTTP {} from {}", status, path)));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Backend(format!("malformed response: {}", e)))?;

        if body.status != "success" {
            return Err(AgentError::Backend(
                body.error_message
                    .unwrap_or_else(|| format!("{} returned status {}", path, body.status)),
            ));
        }

        Ok(body.value)
    }

    pub async fn query(
        &self,
        creds: &Credentials,
        path: &str,
        args: Value,
    ) -> Result<Value, AgentError> {
        self.call(creds, RpcVerb::Query, path, args).await
    }

    pub async fn mutation(
        &self,
        creds: &Credentials,
        path: &str,
        args: Value,
    ) -> Result<Value, AgentError> {
        self.call(creds, RpcVerb::Mutation, path, args).await
    }

    pub async fn action(
        &self,
        creds: &Credentials,
        path: &str,
        args: Value,
    ) -> Result<Value, AgentError> {
        self.call(creds, RpcVerb::Action, path, args).await
    }
}

impl Default for RpcClient {
    fn default() -> Self {
        Self::new()
    }
}

fn decode<T: serde::de::DeserializeOwned>(path: &str, value: Value) -> Result<T, AgentError> {
    serde_json::from_value(value)
        .map_err(|e| AgentError::Backend(format!("unexpected {} result shape: {}", path, e)))
}

fn encode<T: serde::Serialize>(args: &T) -> Result<Value, AgentError> {
    serde_json::to_value(args).map_err(|e| AgentError::Internal(e.to_string()))
}

/// Production [`Backend`] over the RPC client.
pub struct RpcBackend {
    client: RpcClient,
}

impl RpcBackend {
    pub fn new() -> Self {
        Self {
            client: RpcClient::new(),
        }
    }
}

impl Default for RpcBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for RpcBackend {
    async fn scan_profile(
        &self,
        creds: &Credentials,
        args: ProfileScanArgs,
    ) -> Result<RawProfileScan, AgentError> {
        let path = "scans:scanProfile";
        let value = self.client.action(creds, path, encode(&args)?).await?;
        decode(path, value)
    }

    async fn scan_link(
        &self,
        creds: &Credentials,
        url: &str,
        context: Option<&str>,
    ) -> Result<RawLinkScan, AgentError> {
        let path = "security:scanLink";
        let value = self
            .client
            .action(creds, path, json!({ "url": url, "context": context }))
            .await?;
        decode(path, value)
    }

    async fn verify_email(
        &self,
        creds: &Credentials,
        email: &str,
    ) -> Result<RawEmailScan, AgentError> {
        let path = "security:verifyEmail";
        let value = self
            .client
            .action(creds, path, json!({ "email": email }))
            .await?;
        decode(path, value)
    }

    async fn scan_message(
        &self,
        creds: &Credentials,
        text: &str,
        source: &str,
    ) -> Result<RawMessageScan, AgentError> {
        let path = "messageScans:scanMessage";
        let value = self
            .client
            .action(creds, path, json!({ "messageText": text, "source": source }))
            .await?;
        decode(path, value)
    }

    async fn monitoring_alerts(
        &self,
        creds: &Credentials,
        unread_only: bool,
    ) -> Result<Vec<WatchlistAlert>, AgentError> {
        let path = "monitoring:getMonitoringAlerts";
        let value = self
            .client
            .query(creds, path, json!({ "unreadOnly": unread_only }))
            .await?;
        decode(path, value)
    }

    async fn add_to_watchlist(
        &self,
        creds: &Credentials,
        args: WatchlistAddArgs,
    ) -> Result<(), AgentError> {
        self.client
            .mutation(creds, "monitoring:addToWatchlist", encode(&args)?)
            .await?;
        Ok(())
    }

    async fn save_scan_result(
        &self,
        creds: &Credentials,
        result: &ScanResult,
    ) -> Result<(), AgentError> {
        self.client
            .mutation(creds, "scans:saveScanResult", encode(result)?)
            .await?;
        Ok(())
    }

    async fn save_security_scan(
        &self,
        creds: &Credentials,
        record: &SecurityScanRecord,
    ) -> Result<(), AgentError> {
        self.client
            .mutation(creds, "security:saveSecurityScan", encode(record)?)
            .await?;
        Ok(())
    }
}
