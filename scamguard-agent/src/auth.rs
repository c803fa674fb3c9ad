//! Auth gate
//!
//! Every backend-requiring handler runs this before touching the cache or
//! the network, so a signed-out user always sees the sign-in prompt instead
//! of a stale cached result masking the missing credential. The cache-only
//! `getScanResult` lookup is exempt.

use crate::backend::Credentials;
use crate::error::AgentError;
use crate::store::SettingsStore;

/// Read the stored credential, failing with `NotSignedIn` when absent.
pub fn require_credentials<S: SettingsStore>(store: &S) -> Result<Credentials, AgentError> {
    let settings = store.settings()?;

    let token = settings
        .auth_token
        .filter(|t| !t.trim().is_empty())
        .ok_or(AgentError::NotSignedIn)?;

    Ok(Credentials {
        token,
        base_url: settings.backend_url,
    })
}
