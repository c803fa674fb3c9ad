//! Risk vocabularies and verdict normalization
//!
//! The backend speaks a different risk vocabulary per scan type; every UI
//! surface and the notification policy consume exactly two normalized scales.
//! The profile track and the link/email track deliberately use different
//! label sets (a historical split downstream UI code branches on), so the
//! serialized strings here must not change.

use serde::{Deserialize, Serialize};

/// Normalized risk level for the profile track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileRisk {
    Low,
    Medium,
    High,
}

impl ProfileRisk {
    /// Map the backend's profile verdict (`real` / `suspicious` / `fake`).
    ///
    /// Anything unrecognized is treated as `high`: an unknown verdict from
    /// the scoring service is not a reason to tell the user a profile looks
    /// fine.
    pub fn from_verdict(raw: &str) -> Self {
        match raw {
            "real" => ProfileRisk::Low,
            "suspicious" => ProfileRisk::Medium,
            _ => ProfileRisk::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileRisk::Low => "low",
            ProfileRisk::Medium => "medium",
            ProfileRisk::High => "high",
        }
    }
}

/// Normalized risk level for the link/email track.
///
/// Serializes as `safe` / `suspicious` / `high_risk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatRisk {
    Safe,
    Suspicious,
    HighRisk,
}

impl ThreatRisk {
    /// Map the backend's link verdict (`safe` / `suspicious` / `dangerous`).
    pub fn from_link_verdict(raw: &str) -> Self {
        match raw {
            "safe" => ThreatRisk::Safe,
            "suspicious" => ThreatRisk::Suspicious,
            _ => ThreatRisk::HighRisk,
        }
    }

    /// Map the backend's email verdict (`legitimate` / `fake` / other).
    pub fn from_email_verdict(raw: &str) -> Self {
        match raw {
            "legitimate" => ThreatRisk::Safe,
            "fake" => ThreatRisk::HighRisk,
            _ => ThreatRisk::Suspicious,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatRisk::Safe => "safe",
            ThreatRisk::Suspicious => "suspicious",
            ThreatRisk::HighRisk => "high_risk",
        }
    }
}

/// Watchlist alert severity, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}
