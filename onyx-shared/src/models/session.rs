use serde::{Deserialize, Serialize};

use super::UserProfile;

/// The one canonical shape persisted in browser storage.
///
/// Earlier builds of the site stored a bare token string under the same key;
/// [`StoredSession::parse`] migrates that form on read but it is never
/// written back out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    /// Opaque bearer token attached to every authenticated request.
    pub access_token: String,

    /// Profile cached at login for offline-ish rendering; always superseded
    /// by a fresh status check when one succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl StoredSession {
    /// Build a session from a freshly issued token.
    #[must_use]
    pub fn new(access_token: impl Into<String>, user: Option<UserProfile>) -> Self {
        Self {
            access_token: access_token.into(),
            user,
        }
    }

    /// Decode a persisted credential, tolerating every malformed input.
    ///
    /// Returns `None` rather than erroring: a credential we cannot read is
    /// indistinguishable from no credential at all.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(session) = serde_json::from_str::<Self>(trimmed) {
            if session.access_token.is_empty() {
                return None;
            }
            return Some(session);
        }
        // Legacy raw-token form. Anything JSON-ish that failed to decode
        // above is malformed, not a token.
        if trimmed.starts_with('{') || trimmed.starts_with('[') || trimmed.starts_with('"') {
            return None;
        }
        Some(Self::new(trimmed, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_shape() {
        let session = StoredSession::parse(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(session.access_token, "abc");
        assert!(session.user.is_none());
    }

    #[test]
    fn parse_canonical_shape_with_cached_profile() {
        let raw = r#"{"access_token":"abc","user":{"email":"a@b.com","paid":true}}"#;
        let session = StoredSession::parse(raw).unwrap();
        assert_eq!(session.user.unwrap().email, "a@b.com");
    }

    #[test]
    fn parse_migrates_legacy_raw_token() {
        let session = StoredSession::parse("abc123").unwrap();
        assert_eq!(session.access_token, "abc123");
        assert!(session.user.is_none());
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(StoredSession::parse("").is_none());
        assert!(StoredSession::parse("   ").is_none());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(StoredSession::parse("{not json").is_none());
        assert!(StoredSession::parse(r#"{"wrong_key":"abc"}"#).is_none());
        assert!(StoredSession::parse(r#"["abc"]"#).is_none());
        assert!(StoredSession::parse(r#""quoted""#).is_none());
    }

    #[test]
    fn parse_rejects_empty_token() {
        assert!(StoredSession::parse(r#"{"access_token":""}"#).is_none());
    }

    #[test]
    fn serialized_form_is_the_canonical_shape() {
        let session = StoredSession::new("abc", None);
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(json, r#"{"access_token":"abc"}"#);
        assert_eq!(StoredSession::parse(&json).unwrap(), session);
    }
}
