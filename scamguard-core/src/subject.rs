//! Deterministic cache keys for scan subjects
//!
//! A subject key is derived from the request input alone, never from the
//! scan result, so a cache lookup can happen before any backend call. Keys
//! are scan-type-prefixed: a profile URL and a link URL that share the same
//! string must not collide.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email regex")
});

/// Scan-type-scoped cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey(String);

impl SubjectKey {
    pub fn profile(url: &str) -> Self {
        Self(format!("profile:{}", url.trim()))
    }

    pub fn link(url: &str) -> Self {
        Self(format!("link:{}", url.trim()))
    }

    pub fn email(address: &str) -> Self {
        Self(format!("email:{}", address.trim().to_lowercase()))
    }

    /// Free-text messages have no natural identifier; a v5 UUID of the text
    /// keeps the key deterministic and bounded in length.
    pub fn message(text: &str) -> Self {
        Self(format!(
            "message:{}",
            Uuid::new_v5(&Uuid::NAMESPACE_OID, text.as_bytes())
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the first email address from free text (the email scan accepts a
/// pasted message body, not just a bare address).
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_lowercase())
}
