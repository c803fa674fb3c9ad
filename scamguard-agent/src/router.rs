//! Request router
//!
//! Single entry point for every UI surface. `dispatch` receives one tagged
//! message, runs the matching handler, and always resolves to exactly one
//! envelope: handler failures are caught here and converted, never thrown
//! past the boundary, because the channel back to the caller is a single
//! request/response exchange.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use scamguard_core::{
    extract_email, EmailReport, LinkReport, MessageReport, ScanResult, SubjectKey,
};

use crate::auth;
use crate::backend::{Backend, ProfileScanArgs, SecurityScanRecord, WatchlistAddArgs};
use crate::cache;
use crate::error::AgentError;
use crate::notify::Notifier;
use crate::state::{AppState, CompletionEvent};
use crate::store::{SettingsStore, StateStore};

/// Uniform response envelope for every inbound message.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    fn fail(error: AgentError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileScanRequest {
    profile_url: String,
    #[serde(default = "default_platform")]
    platform: String,
    #[serde(default)]
    profile_data: Option<Value>,
}

fn default_platform() -> String {
    "unknown".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkScanRequest {
    url: String,
    #[serde(default)]
    context: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmailScanRequest {
    email_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageScanRequest {
    text: String,
    #[serde(default = "default_source")]
    source: String,
}

fn default_source() -> String {
    "extension".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetScanResultRequest {
    profile_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchlistAddRequest {
    profile_url: String,
    #[serde(default = "default_platform")]
    platform: String,
    #[serde(default = "default_check_frequency")]
    check_frequency: String,
    #[serde(default)]
    initial_trust_score: Option<u8>,
}

fn default_check_frequency() -> String {
    "daily".to_string()
}

/// Dispatch one inbound message to its handler and fold the outcome into an
/// envelope.
pub async fn dispatch<S, B, N>(state: &AppState<S, B, N>, message: Value) -> Envelope
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    let Some(action) = message.get("action").and_then(Value::as_str).map(String::from) else {
        return Envelope::fail(AgentError::MissingInput("action".to_string()));
    };
    let context = message
        .get("context")
        .and_then(Value::as_str)
        .map(String::from);

    let outcome = match action.as_str() {
        "performScan" => profile_scan(state, &message, context).await,
        "scanLink" => link_scan(state, &message, context).await,
        "scanEmail" => email_scan(state, &message, context).await,
        "scanMessage" => message_scan(state, &message, context).await,
        "getScanResult" => get_scan_result(state, &message),
        "addToWatchlist" => add_to_watchlist(state, &message).await,
        other => Err(AgentError::UnknownAction(other.to_string())),
    };

    match outcome {
        Ok(result) => Envelope::ok(result),
        Err(error) => {
            tracing::warn!(%action, %error, "request failed");
            Envelope::fail(error)
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(message: &Value) -> Result<T, AgentError> {
    serde_json::from_value(message.clone()).map_err(|e| AgentError::MissingInput(e.to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, AgentError> {
    serde_json::to_value(value).map_err(|e| AgentError::Internal(e.to_string()))
}

fn non_empty(value: &str, field: &str) -> Result<(), AgentError> {
    if value.trim().is_empty() {
        Err(AgentError::MissingInput(field.to_string()))
    } else {
        Ok(())
    }
}

/// `performScan`: the one cached path. Gate, then cache, then network.
async fn profile_scan<S, B, N>(
    state: &AppState<S, B, N>,
    message: &Value,
    context: Option<String>,
) -> Result<Value, AgentError>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    let creds = auth::require_credentials(&state.store)?;
    let req: ProfileScanRequest = parse(message)?;
    non_empty(&req.profile_url, "profileUrl")?;

    let key = SubjectKey::profile(&req.profile_url);

    // Fresh hit: no network and no completion push. The user has already
    // seen the alert for this subject within the TTL window.
    if let Some(cached) = cache::lookup(&state.store, key.as_str(), Utc::now())? {
        tracing::debug!(key = %key, "profile scan served from cache");
        return to_value(&cached);
    }

    let raw = state
        .backend
        .scan_profile(
            &creds,
            ProfileScanArgs {
                profile_url: req.profile_url,
                platform: req.platform,
                profile_data: req.profile_data,
            },
        )
        .await?;

    let result = ScanResult::from_raw(key, &raw, Utc::now());
    cache::store(&state.store, &result)?;

    if let Err(error) = state.backend.save_scan_result(&creds, &result).await {
        tracing::warn!(%error, "failed to persist scan result to history");
    }

    let value = to_value(&result)?;
    state.push(CompletionEvent {
        action: "scanComplete",
        context,
        result: value.clone(),
    });
    Ok(value)
}

/// `scanLink`: always a fresh remote evaluation, never cached.
async fn link_scan<S, B, N>(
    state: &AppState<S, B, N>,
    message: &Value,
    context: Option<String>,
) -> Result<Value, AgentError>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    let creds = auth::require_credentials(&state.store)?;
    let req: LinkScanRequest = parse(message)?;
    non_empty(&req.url, "url")?;

    let raw = state
        .backend
        .scan_link(&creds, &req.url, req.context.as_deref())
        .await?;
    let report = LinkReport::from_raw(&raw);

    let record = SecurityScanRecord {
        scan_type: "link".to_string(),
        subject: req.url,
        risk_level: report.risk_level,
        score: report.trust_score,
    };
    if let Err(error) = state.backend.save_security_scan(&creds, &record).await {
        tracing::warn!(%error, "failed to persist link scan to history");
    }

    let value = to_value(&report)?;
    state.push(CompletionEvent {
        action: "linkScanComplete",
        context,
        result: value.clone(),
    });
    Ok(value)
}

/// `scanEmail`: extracts the address from the pasted text, then a fresh
/// remote evaluation.
async fn email_scan<S, B, N>(
    state: &AppState<S, B, N>,
    message: &Value,
    context: Option<String>,
) -> Result<Value, AgentError>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    let creds = auth::require_credentials(&state.store)?;
    let req: EmailScanRequest = parse(message)?;
    non_empty(&req.email_text, "emailText")?;

    let address = extract_email(&req.email_text)
        .ok_or_else(|| AgentError::MissingInput("no email address found".to_string()))?;

    let raw = state.backend.verify_email(&creds, &address).await?;
    let report = EmailReport::from_raw(&raw);

    let record = SecurityScanRecord {
        scan_type: "email".to_string(),
        subject: address,
        risk_level: report.risk_level,
        score: report.trust_score,
    };
    if let Err(error) = state.backend.save_security_scan(&creds, &record).await {
        tracing::warn!(%error, "failed to persist email scan to history");
    }

    let value = to_value(&report)?;
    state.push(CompletionEvent {
        action: "emailScanComplete",
        context,
        result: value.clone(),
    });
    Ok(value)
}

/// `scanMessage`: passthrough risk level, never cached. The backend persists
/// message scans itself.
async fn message_scan<S, B, N>(
    state: &AppState<S, B, N>,
    message: &Value,
    context: Option<String>,
) -> Result<Value, AgentError>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    let creds = auth::require_credentials(&state.store)?;
    let req: MessageScanRequest = parse(message)?;
    non_empty(&req.text, "text")?;

    let raw = state
        .backend
        .scan_message(&creds, &req.text, &req.source)
        .await?;
    let report = MessageReport::from_raw(&raw);

    let value = to_value(&report)?;
    state.push(CompletionEvent {
        action: "messageScanComplete",
        context,
        result: value.clone(),
    });
    Ok(value)
}

/// `getScanResult`: cache-only, no auth, no network. A miss is a successful
/// null result, not an error.
fn get_scan_result<S, B, N>(
    state: &AppState<S, B, N>,
    message: &Value,
) -> Result<Value, AgentError>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    let req: GetScanResultRequest = parse(message)?;
    non_empty(&req.profile_url, "profileUrl")?;

    let key = SubjectKey::profile(&req.profile_url);
    match cache::lookup(&state.store, key.as_str(), Utc::now())? {
        Some(result) => to_value(&result),
        None => Ok(Value::Null),
    }
}

/// `addToWatchlist`: durable backend mutation, acknowledged with a flag.
async fn add_to_watchlist<S, B, N>(
    state: &AppState<S, B, N>,
    message: &Value,
) -> Result<Value, AgentError>
where
    S: SettingsStore + StateStore,
    B: Backend,
    N: Notifier,
{
    let creds = auth::require_credentials(&state.store)?;
    let req: WatchlistAddRequest = parse(message)?;
    non_empty(&req.profile_url, "profileUrl")?;

    state
        .backend
        .add_to_watchlist(
            &creds,
            WatchlistAddArgs {
                profile_url: req.profile_url,
                platform: req.platform,
                check_frequency: req.check_frequency,
                initial_trust_score: req.initial_trust_score,
            },
        )
        .await?;

    Ok(json!({ "added": true }))
}
