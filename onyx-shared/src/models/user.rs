use serde::{Deserialize, Serialize};

/// Server-supplied account record. Read-only from the client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// The account's email address.
    pub email: String,

    /// Preferred display name, when the user has set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Entitlement flag gating the main workspace view.
    #[serde(default)]
    pub paid: bool,

    /// Raw subscription state reported by billing (`active`, `expired`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<String>,
}

impl UserProfile {
    /// Name shown in the header: display name when present, email otherwise.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Request to authenticate with email/password credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// The account's email address.
    pub email: String,

    /// The account's password.
    pub password: String,
}

/// Response from a successful login or signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Opaque bearer token proving identity on subsequent requests.
    pub token: String,

    /// Profile of the account that just authenticated.
    pub user: UserProfile,
}

/// Request to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    /// Full name of the person signing up.
    pub name: String,

    /// The account's email address.
    pub email: String,

    /// The account's password.
    pub password: String,

    /// Optional company name collected on the signup form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Response from `GET /api/auth/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthStatusResponse {
    /// Whether the presented credential is still valid.
    #[serde(default = "default_authenticated")]
    pub authenticated: bool,

    /// Profile for the authenticated account, absent when the check failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

// Older backend builds omit the flag on success and only send `user`.
fn default_authenticated() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str, display_name: Option<&str>, paid: bool) -> UserProfile {
        UserProfile {
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
            paid,
            subscription_status: None,
        }
    }

    #[test]
    fn display_label_prefers_display_name() {
        let user = profile("a@b.com", Some("Ada"), true);
        assert_eq!(user.display_label(), "Ada");
    }

    #[test]
    fn display_label_falls_back_to_email() {
        let user = profile("a@b.com", None, true);
        assert_eq!(user.display_label(), "a@b.com");
    }

    #[test]
    fn profile_paid_flag_defaults_to_false() {
        let user: UserProfile = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert!(!user.paid);
        assert_eq!(user.display_name, None);
    }

    #[test]
    fn status_response_without_flag_counts_as_authenticated() {
        let status: AuthStatusResponse =
            serde_json::from_str(r#"{"user":{"email":"a@b.com","paid":true}}"#).unwrap();
        assert!(status.authenticated);
        assert_eq!(status.user.unwrap().email, "a@b.com");
    }

    #[test]
    fn status_response_explicit_denial() {
        let status: AuthStatusResponse =
            serde_json::from_str(r#"{"authenticated":false}"#).unwrap();
        assert!(!status.authenticated);
        assert!(status.user.is_none());
    }

    #[test]
    fn login_response_roundtrip() {
        let response = LoginResponse {
            token: "abc".to_string(),
            user: profile("a@b.com", Some("Ada"), true),
        };
        let json = serde_json::to_string(&response).unwrap();
        let decoded: LoginResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, response);
        assert_eq!(decoded.token, "abc");
    }

    #[test]
    fn signup_request_omits_missing_company() {
        let request = SignupRequest {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            password: "correct-horse".to_string(),
            company: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("company"));
    }
}
