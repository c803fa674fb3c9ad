//! Tests for risk normalization against the exact wire vocabulary
//!
//! Downstream UI code branches on these string literals; the serialized
//! labels are contract, not presentation.

use scamguard_core::{
    EmailReport, LinkReport, MessageReport, ProfileRisk, RawEmailScan, RawLinkScan,
    RawMessageScan, Severity, ThreatRisk, WatchlistAlert,
};

#[test]
fn profile_track_serializes_low_medium_high() {
    assert_eq!(
        serde_json::to_string(&ProfileRisk::from_verdict("real")).unwrap(),
        "\"low\""
    );
    assert_eq!(
        serde_json::to_string(&ProfileRisk::from_verdict("suspicious")).unwrap(),
        "\"medium\""
    );
    assert_eq!(
        serde_json::to_string(&ProfileRisk::from_verdict("fake")).unwrap(),
        "\"high\""
    );
}

#[test]
fn threat_track_serializes_safe_suspicious_high_risk() {
    assert_eq!(serde_json::to_string(&ThreatRisk::Safe).unwrap(), "\"safe\"");
    assert_eq!(
        serde_json::to_string(&ThreatRisk::Suspicious).unwrap(),
        "\"suspicious\""
    );
    assert_eq!(
        serde_json::to_string(&ThreatRisk::HighRisk).unwrap(),
        "\"high_risk\""
    );
}

#[test]
fn link_report_matches_wire_example() {
    let raw: RawLinkScan = serde_json::from_value(serde_json::json!({
        "safetyScore": 12,
        "riskLevel": "dangerous",
        "recommendation": "Avoid this site",
        "threats": [{"type": "phishing", "description": "Fake login page"}]
    }))
    .unwrap();

    let report = serde_json::to_value(LinkReport::from_raw(&raw)).unwrap();
    assert_eq!(
        report,
        serde_json::json!({
            "riskLevel": "high_risk",
            "trustScore": 12,
            "isPhishing": true,
            "isMalware": false,
            "details": "Fake login page"
        })
    );
}

#[test]
fn email_report_keeps_risks_list() {
    let raw: RawEmailScan = serde_json::from_value(serde_json::json!({
        "trustScore": 35,
        "riskLevel": "something-new",
        "recommendation": "Verify the sender out of band",
        "risks": ["domain registered last week"]
    }))
    .unwrap();

    let report = EmailReport::from_raw(&raw);
    assert_eq!(report.risk_level, ThreatRisk::Suspicious);
    assert_eq!(report.risks, vec!["domain registered last week"]);
    assert_eq!(report.details, "Verify the sender out of band");
}

#[test]
fn message_report_passes_risk_level_through() {
    let raw: RawMessageScan = serde_json::from_value(serde_json::json!({
        "riskScore": 80,
        "riskLevel": "high",
        "detectedPatterns": ["urgency", "gift cards"],
        "recommendation": "Do not respond"
    }))
    .unwrap();

    let report = MessageReport::from_raw(&raw);
    assert_eq!(report.risk_level, "high");
    assert_eq!(report.risk_score, 80);
    assert_eq!(report.patterns, vec!["urgency", "gift cards"]);
}

#[test]
fn alert_severity_parses_from_wire() {
    let alert: WatchlistAlert = serde_json::from_value(serde_json::json!({
        "alertId": "alert-9",
        "severity": "critical",
        "title": "Watched profile changed",
        "details": "Display name and photos replaced"
    }))
    .unwrap();
    assert_eq!(alert.severity, Severity::Critical);
}
