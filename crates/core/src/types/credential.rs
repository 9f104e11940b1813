//! Retailer credential types.
//!
//! A credential is a bearer token captured out-of-band from the retailer's
//! mobile app. The core only ever reads credentials; writes happen at the
//! token-capture boundary. There is no refresh logic anywhere in this
//! codebase - an expired token is detected, never renewed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// A stored retailer access/refresh token pair for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailerCredential {
    /// The user this credential belongs to.
    pub user_id: UserId,
    /// Opaque bearer token. Empty means "not configured".
    pub access_token: String,
    /// Refresh token, if one was captured alongside the access token.
    pub refresh_token: Option<String>,
    /// When the access token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl RetailerCredential {
    /// Create a credential for a user from a captured token pair.
    #[must_use]
    pub fn new(
        user_id: UserId,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            user_id,
            access_token: access_token.into(),
            refresh_token,
            expires_at,
        }
    }

    /// Whether an access token is present.
    ///
    /// A credential without an access token is "not configured": every
    /// external operation degrades to an empty/no-op result instead of
    /// failing.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Whether the token has expired as of `now`.
    ///
    /// A credential with no expiry timestamp is treated as not expired.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn credential(token: &str, expires_at: Option<DateTime<Utc>>) -> RetailerCredential {
        RetailerCredential::new(UserId::new(1), token, None, expires_at)
    }

    #[test]
    fn test_empty_token_is_not_configured() {
        assert!(!credential("", None).is_configured());
        assert!(credential("tok_abc123", None).is_configured());
    }

    #[test]
    fn test_expiry_in_past() {
        let now = Utc::now();
        let cred = credential("tok_abc123", Some(now - Duration::hours(1)));
        assert!(cred.is_expired(now));
    }

    #[test]
    fn test_expiry_in_future() {
        let now = Utc::now();
        let cred = credential("tok_abc123", Some(now + Duration::hours(24)));
        assert!(!cred.is_expired(now));
    }

    #[test]
    fn test_no_expiry_is_never_expired() {
        assert!(!credential("tok_abc123", None).is_expired(Utc::now()));
    }
}
