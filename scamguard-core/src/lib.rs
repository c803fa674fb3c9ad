//! Scamguard Core Library
//!
//! Pure domain logic for the scan orchestration agent:
//! - Risk vocabularies and the normalization of backend verdicts
//! - Raw backend response shapes and the normalized reports built from them
//! - Deterministic subject keys used for caching
//! - Watchlist alert model

pub mod alert;
pub mod risk;
pub mod scan;
pub mod subject;

pub use alert::WatchlistAlert;
pub use risk::{ProfileRisk, Severity, ThreatRisk};
pub use scan::{
    EmailReport, LinkReport, MessageReport, ProfileInsight, RawEmailScan, RawLinkScan,
    RawMessageScan, RawProfileScan, ScanResult, Threat,
};
pub use subject::{extract_email, SubjectKey};
