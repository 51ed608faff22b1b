//! Session gate: the single authority for "is this visitor allowed to see
//! this page, and as whom."
//!
//! Persists the credential under one localStorage key, decides the view a
//! page boots into, and owns the invalidate-on-401 rule. Pages never touch
//! storage or re-implement 401 handling themselves.

use gloo_storage::{LocalStorage, Storage};
use shared::models::{StoredSession, UserProfile};
use thiserror::Error;

/// The one localStorage key holding the serialized [`StoredSession`].
pub const SESSION_KEY: &str = "onyx-session";

/// Where an invalidated or logged-out visitor lands.
const LOGIN_PATH: &str = "/";

/// Everything that can go wrong talking to the backend, normalized at the
/// HTTP boundary so page code only ever sees these four cases.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Fetch threw or timed out. Indistinguishable from "not signed in"
    /// wherever a view state is being decided.
    #[error("Unable to connect to server")]
    Network,

    /// The credential was rejected; local state has already been reset.
    #[error("Your session has expired. Please sign in again.")]
    Auth,

    /// Client-side field check failed. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx with a message body; shown to the user verbatim.
    #[error("{0}")]
    Server(String),
}

/// Outcome of a status check against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// The credential was accepted and a profile came back.
    Authenticated(UserProfile),
    /// No credential, a rejected credential, or any failure at all.
    Unauthenticated,
}

/// The mutually exclusive UI mode a page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Visitor has no valid session; show the sign-in surface.
    Unauthenticated,
    /// Signed in but not entitled; show the payment surface.
    Unpaid,
    /// Signed in and entitled; show the workspace.
    Ready,
}

/// Map a status result to the view a page must render. Pure.
#[must_use]
pub fn resolve_view_state(status: &AuthStatus) -> ViewState {
    match status {
        AuthStatus::Unauthenticated => ViewState::Unauthenticated,
        AuthStatus::Authenticated(user) if !user.paid => ViewState::Unpaid,
        AuthStatus::Authenticated(_) => ViewState::Ready,
    }
}

/// Read the persisted credential. Absent or malformed reads as `None`;
/// nothing escapes this boundary.
#[must_use]
pub fn load_credential() -> Option<StoredSession> {
    let raw = LocalStorage::raw().get_item(SESSION_KEY).ok().flatten()?;
    StoredSession::parse(&raw)
}

/// Persist the credential in the canonical shape.
pub fn store_credential(session: &StoredSession) {
    if let Ok(raw) = serde_json::to_string(session) {
        let _ = LocalStorage::raw().set_item(SESSION_KEY, &raw);
    }
}

/// Refresh the profile cached alongside the credential after a successful
/// status check, so a later boot renders with current data.
pub fn cache_profile(user: &UserProfile) {
    if let Some(mut session) = load_credential() {
        session.user = Some(user.clone());
        store_credential(&session);
    }
}

/// Remove the persisted credential. Returns whether anything was removed,
/// which is what makes invalidation idempotent: of several concurrent 401
/// handlers only the first finds a key to delete.
pub fn clear_credential() -> bool {
    let storage = LocalStorage::raw();
    let present = matches!(storage.get_item(SESSION_KEY), Ok(Some(_)));
    if present {
        let _ = storage.remove_item(SESSION_KEY);
    }
    present
}

/// The invalidate-on-401 rule: clear the credential and send the browser
/// back to the entry point. Navigation fires at most once no matter how many
/// in-flight requests all come back 401.
pub fn invalidate() {
    if clear_credential() {
        redirect_to_login();
    }
}

/// Full-page navigation to the unauthenticated entry point.
pub(crate) fn redirect_to_login() {
    navigate_to(LOGIN_PATH);
}

/// Full-page navigation.
pub(crate) fn navigate_to(path: &str) {
    // Browser tests run inside the page under test; navigating away would
    // tear the runner down mid-suite.
    if cfg!(test) {
        return;
    }
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

/// Field checks for the sign-in form. Runs before any network I/O.
pub fn validate_login(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Please enter both email and password".to_string(),
        ));
    }
    Ok(())
}

/// Field checks for the signup form. Runs before any network I/O.
pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("Please enter your name".to_string()));
    }
    if !is_valid_email(email) {
        return Err(ApiError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    if password.chars().count() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters.".to_string(),
        ));
    }
    Ok(())
}

/// Minimum length of a new decision's free-form description.
pub const MIN_DECISION_CHARS: usize = 50;

/// Field check for the new-decision form. Runs before any network I/O.
pub fn validate_decision_content(content: &str) -> Result<(), ApiError> {
    if content.trim().chars().count() < MIN_DECISION_CHARS {
        return Err(ApiError::Validation(
            "Please provide at least 50 characters describing your decision.".to_string(),
        ));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// Header value carrying the bearer credential.
#[must_use]
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(paid: bool) -> UserProfile {
        UserProfile {
            email: "a@b.com".to_string(),
            display_name: None,
            paid,
            subscription_status: None,
        }
    }

    #[test]
    fn unauthenticated_status_resolves_to_unauthenticated_view() {
        assert_eq!(
            resolve_view_state(&AuthStatus::Unauthenticated),
            ViewState::Unauthenticated
        );
    }

    #[test]
    fn unpaid_profile_never_reaches_ready() {
        let status = AuthStatus::Authenticated(profile(false));
        assert_eq!(resolve_view_state(&status), ViewState::Unpaid);
    }

    #[test]
    fn paid_profile_resolves_to_ready() {
        let status = AuthStatus::Authenticated(profile(true));
        assert_eq!(resolve_view_state(&status), ViewState::Ready);
    }

    #[test]
    fn login_validation_rejects_empty_fields() {
        assert!(matches!(
            validate_login("", "secret"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_login("a@b.com", ""),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_login("   ", "secret"),
            Err(ApiError::Validation(_))
        ));
        assert!(validate_login("a@b.com", "secret").is_ok());
    }

    #[test]
    fn signup_validation_checks_email_and_password_length() {
        assert!(validate_signup("Ada", "a@b.com", "longenough").is_ok());
        assert!(matches!(
            validate_signup("", "a@b.com", "longenough"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_signup("Ada", "not-an-email", "longenough"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_signup("Ada", "a@b.com", "short"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn decision_content_needs_fifty_characters() {
        let short = "Should we hire?";
        assert!(matches!(
            validate_decision_content(short),
            Err(ApiError::Validation(_))
        ));

        let padded = format!("{}{}", " ".repeat(40), "Should we hire?");
        assert!(matches!(
            validate_decision_content(&padded),
            Err(ApiError::Validation(_))
        ));

        let long = "Should we hire a second engineer now or wait until the seed round closes?";
        assert!(validate_decision_content(long).is_ok());
    }

    #[test]
    fn email_shape_checks() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.io"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn bearer_header_format() {
        assert_eq!(bearer_value("abc"), "Bearer abc");
    }

    #[test]
    fn api_error_messages() {
        assert_eq!(ApiError::Network.to_string(), "Unable to connect to server");
        assert_eq!(
            ApiError::Server("Invalid credentials".to_string()).to_string(),
            "Invalid credentials"
        );
        assert_eq!(
            ApiError::Validation("Please enter your name".to_string()).to_string(),
            "Please enter your name"
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::api::OnyxClient;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn invalidation_clears_the_credential_exactly_once() {
        store_credential(&StoredSession::new("tok-once", None));
        assert!(load_credential().is_some());

        // The first 401 handler finds the key and removes it; any handler
        // racing behind it finds nothing, so navigation fires at most once.
        assert!(clear_credential());
        assert!(load_credential().is_none());
        assert!(!clear_credential());
    }

    #[wasm_bindgen_test]
    async fn logout_clears_local_state_when_the_server_is_unreachable() {
        store_credential(&StoredSession::new("tok-offline", None));

        // Port 9 refuses connections, so the logout POST fails on the wire.
        OnyxClient::new("http://127.0.0.1:9").logout().await;

        assert!(load_credential().is_none());
        assert!(!clear_credential());
    }
}
