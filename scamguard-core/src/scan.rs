//! Backend response shapes and the normalized reports built from them
//!
//! The backend returns a different result schema per scan type. The raw
//! shapes below mirror the wire format exactly (camelCase fields); each has a
//! normalized counterpart that every UI surface can consume without knowing
//! which scan produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::risk::{ProfileRisk, ThreatRisk};
use crate::subject::SubjectKey;

/// Upper bound on flags surfaced to the UI.
pub const MAX_FLAGS: usize = 6;

/// Flags taken from generic insights when nothing is tagged warning/critical.
const FALLBACK_FLAGS: usize = 4;

/// One entry of the backend's profile insight list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInsight {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// Raw `scans:scanProfile` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfileScan {
    pub trust_score: u8,
    pub risk_level: String,
    #[serde(default)]
    pub insights: Vec<ProfileInsight>,
    #[serde(default)]
    pub scam_phrases: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

/// One entry of the backend's link threat list.
#[derive(Debug, Clone, Deserialize)]
pub struct Threat {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Raw `security:scanLink` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLinkScan {
    pub safety_score: u8,
    pub risk_level: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub threats: Vec<Threat>,
}

/// Raw `security:verifyEmail` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEmailScan {
    pub trust_score: u8,
    pub risk_level: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub risks: Vec<String>,
}

/// Raw `messageScans:scanMessage` response. The risk level is already
/// three-level and passes through unmapped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessageScan {
    pub risk_score: u8,
    pub risk_level: String,
    #[serde(default)]
    pub detected_patterns: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
}

/// Normalized profile scan record. This is the shape the cache persists and
/// the popup renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub subject_key: String,
    pub risk_level: ProfileRisk,
    pub trust_score: u8,
    pub flags: Vec<String>,
    pub narrative: String,
    pub scanned_at: DateTime<Utc>,
}

impl ScanResult {
    pub fn from_raw(subject_key: SubjectKey, raw: &RawProfileScan, scanned_at: DateTime<Utc>) -> Self {
        let narrative = if raw.reasoning.is_empty() && !raw.scam_phrases.is_empty() {
            format!("Scam phrases detected: {}", raw.scam_phrases.join(", "))
        } else {
            raw.reasoning.clone()
        };

        Self {
            subject_key: subject_key.into_string(),
            risk_level: ProfileRisk::from_verdict(&raw.risk_level),
            trust_score: raw.trust_score,
            flags: extract_flags(&raw.insights),
            narrative,
            scanned_at,
        }
    }
}

/// Pick the flags shown for a profile scan.
///
/// Warning/critical insights win and are truncated to [`MAX_FLAGS`]; when the
/// backend tagged nothing as concerning, the first few informational entries
/// are used instead so the list is never empty while the backend had
/// something to say.
pub fn extract_flags(insights: &[ProfileInsight]) -> Vec<String> {
    let flagged: Vec<String> = insights
        .iter()
        .filter(|i| i.kind == "warning" || i.kind == "critical")
        .map(|i| i.message.clone())
        .take(MAX_FLAGS)
        .collect();

    if !flagged.is_empty() {
        return flagged;
    }

    insights
        .iter()
        .take(FALLBACK_FLAGS)
        .map(|i| i.message.clone())
        .collect()
}

/// Normalized link scan report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    pub risk_level: ThreatRisk,
    pub trust_score: u8,
    pub is_phishing: bool,
    pub is_malware: bool,
    pub details: String,
}

impl LinkReport {
    pub fn from_raw(raw: &RawLinkScan) -> Self {
        Self {
            risk_level: ThreatRisk::from_link_verdict(&raw.risk_level),
            trust_score: raw.safety_score,
            is_phishing: raw.threats.iter().any(|t| t.kind == "phishing"),
            is_malware: raw.threats.iter().any(|t| t.kind == "malware"),
            details: raw
                .threats
                .first()
                .map(|t| t.description.clone())
                .unwrap_or_else(|| raw.recommendation.clone()),
        }
    }
}

/// Normalized email verification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReport {
    pub risk_level: ThreatRisk,
    pub trust_score: u8,
    pub details: String,
    pub risks: Vec<String>,
}

impl EmailReport {
    pub fn from_raw(raw: &RawEmailScan) -> Self {
        Self {
            risk_level: ThreatRisk::from_email_verdict(&raw.risk_level),
            trust_score: raw.trust_score,
            details: raw.recommendation.clone(),
            risks: raw.risks.clone(),
        }
    }
}

/// Normalized free-text message report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReport {
    pub risk_level: String,
    pub risk_score: u8,
    pub patterns: Vec<String>,
    pub recommendation: String,
}

impl MessageReport {
    pub fn from_raw(raw: &RawMessageScan) -> Self {
        Self {
            risk_level: raw.risk_level.clone(),
            risk_score: raw.risk_score,
            patterns: raw.detected_patterns.clone(),
            recommendation: raw.recommendation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(kind: &str, message: &str) -> ProfileInsight {
        ProfileInsight {
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn flags_prefer_warning_and_critical() {
        let insights = vec![
            insight("info", "joined recently"),
            insight("warning", "stock photo avatar"),
            insight("critical", "known scam template"),
        ];
        assert_eq!(
            extract_flags(&insights),
            vec!["stock photo avatar", "known scam template"]
        );
    }

    #[test]
    fn flags_truncate_to_six() {
        let insights: Vec<ProfileInsight> = (0..10)
            .map(|i| insight("warning", &format!("flag {i}")))
            .collect();
        assert_eq!(extract_flags(&insights).len(), MAX_FLAGS);
    }

    #[test]
    fn flags_fall_back_to_informational() {
        let insights: Vec<ProfileInsight> = (0..5)
            .map(|i| insight("info", &format!("note {i}")))
            .collect();
        let flags = extract_flags(&insights);
        assert_eq!(flags.len(), 4);
        assert_eq!(flags[0], "note 0");
    }

    #[test]
    fn flags_empty_only_without_insights() {
        assert!(extract_flags(&[]).is_empty());
    }

    #[test]
    fn link_report_derives_threat_booleans() {
        let raw = RawLinkScan {
            safety_score: 12,
            risk_level: "dangerous".to_string(),
            recommendation: "Do not enter credentials".to_string(),
            threats: vec![Threat {
                kind: "phishing".to_string(),
                description: "Fake login page".to_string(),
            }],
        };
        let report = LinkReport::from_raw(&raw);
        assert_eq!(report.risk_level, ThreatRisk::HighRisk);
        assert_eq!(report.trust_score, 12);
        assert!(report.is_phishing);
        assert!(!report.is_malware);
        assert_eq!(report.details, "Fake login page");
    }

    #[test]
    fn link_report_details_fall_back_to_recommendation() {
        let raw = RawLinkScan {
            safety_score: 90,
            risk_level: "safe".to_string(),
            recommendation: "Looks fine".to_string(),
            threats: vec![],
        };
        assert_eq!(LinkReport::from_raw(&raw).details, "Looks fine");
    }

    #[test]
    fn narrative_falls_back_to_scam_phrases() {
        let raw = RawProfileScan {
            trust_score: 20,
            risk_level: "fake".to_string(),
            insights: vec![],
            scam_phrases: vec!["wire me money".to_string()],
            reasoning: String::new(),
        };
        let result = ScanResult::from_raw(
            SubjectKey::profile("https://site/u/alice"),
            &raw,
            Utc::now(),
        );
        assert_eq!(result.narrative, "Scam phrases detected: wire me money");
        assert_eq!(result.risk_level, ProfileRisk::High);
    }
}
