use once_cell::unsync::OnceCell;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    ActivityResponse, AuthStatusResponse, CheckoutSessionResponse, CommitDecisionRequest,
    CreateDecisionRequest, CreateDecisionResponse, DashboardResponse, DecisionDetailResponse,
    ErrorResponse, FollowupMessage, FollowupRequest, FollowupResponse, LibraryResponse,
    LoginRequest, LoginResponse, NewProspect, PipelineResponse, ProspectUpdate, SettingsUpdate,
    SignupRequest, StoredSession, UnderstandingUpdate, UserProfile, VerifyPaymentResponse,
    WorkspaceSettings,
};

use crate::config::FrontendConfig;
use crate::session::{self, ApiError, AuthStatus};

const GENERIC_SERVER_ERROR: &str = "Something went wrong. Please try again.";

thread_local! {
    static SHARED_CLIENT: OnceCell<OnyxClient> = OnceCell::new();
}

/// Lightweight API client for Onyx web interactions.
///
/// Every authenticated call funnels through [`OnyxClient::send_authenticated`],
/// which attaches the bearer credential and applies the invalidate-on-401
/// rule; call sites never handle 401 themselves.
#[derive(Clone, Debug)]
pub struct OnyxClient {
    base_url: String,
    client: Client,
}

impl OnyxClient {
    /// Create a new API client with the provided base URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// The one client instance shared by every page of this document.
    #[must_use]
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| Self::new(FrontendConfig::new().api_base_url()))
                .clone()
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(request: RequestBuilder) -> RequestBuilder {
        match session::load_credential() {
            Some(credential) => request.header(
                AUTHORIZATION,
                session::bearer_value(&credential.access_token),
            ),
            None => request,
        }
    }

    async fn send_authenticated(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = Self::authorize(request)
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            session::invalidate();
            return Err(ApiError::Auth);
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.status().is_success() {
            response.json::<T>().await.map_err(|_| ApiError::Network)
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn expect_success(response: Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn server_error(response: Response) -> ApiError {
        match response.json::<ErrorResponse>().await {
            Ok(body) if body.has_message() => ApiError::Server(body.message),
            _ => ApiError::Server(GENERIC_SERVER_ERROR.to_string()),
        }
    }

    /// Check whether the given credential is still accepted.
    ///
    /// Never fails: transport errors and non-2xx responses all read as
    /// [`AuthStatus::Unauthenticated`]. A 401 additionally drops the stale
    /// credential, without navigating, since the caller is about to render
    /// the signed-out view anyway.
    pub async fn fetch_status(&self, credential: &StoredSession) -> AuthStatus {
        let request = self
            .client
            .get(self.api_url("auth/status"))
            .header(
                AUTHORIZATION,
                session::bearer_value(&credential.access_token),
            );
        let Ok(response) = request.send().await else {
            return AuthStatus::Unauthenticated;
        };
        let code = response.status();
        if code == StatusCode::UNAUTHORIZED {
            session::clear_credential();
            return AuthStatus::Unauthenticated;
        }
        let body = response.json::<AuthStatusResponse>().await.ok();
        let status = interpret_status(code, body);
        if let AuthStatus::Authenticated(ref user) = status {
            session::cache_profile(user);
        }
        status
    }

    /// Authenticate with email/password credentials.
    ///
    /// Validates fields first (no network call on a validation failure),
    /// then persists the returned credential and profile on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        session::validate_login(email, password)?;
        let payload = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self
            .client
            .post(self.api_url("auth/login"))
            .json(&payload)
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        let body: LoginResponse = Self::decode(response).await?;
        session::store_credential(&StoredSession::new(
            body.token.clone(),
            Some(body.user.clone()),
        ));
        Ok(body.user)
    }

    /// Create a new account; on success the visitor is signed in.
    pub async fn signup(&self, payload: &SignupRequest) -> Result<UserProfile, ApiError> {
        session::validate_signup(&payload.name, &payload.email, &payload.password)?;
        let response = self
            .client
            .post(self.api_url("auth/signup"))
            .json(payload)
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        let body: LoginResponse = Self::decode(response).await?;
        session::store_credential(&StoredSession::new(
            body.token.clone(),
            Some(body.user.clone()),
        ));
        Ok(body.user)
    }

    /// Terminate the current session.
    ///
    /// Best effort on the wire: the server call's outcome is ignored, and
    /// local state is cleared unconditionally so the visitor is never left
    /// stranded in a signed-in-looking UI.
    pub async fn logout(&self) {
        let request = Self::authorize(self.client.post(self.api_url("auth/logout")));
        let _ = request.send().await;
        session::clear_credential();
        session::redirect_to_login();
    }

    /// Daily summary and agent status for the workspace.
    pub async fn get_dashboard(&self) -> Result<DashboardResponse, ApiError> {
        let response = self
            .send_authenticated(self.client.get(self.api_url("workspace/dashboard")))
            .await?;
        Self::decode(response).await
    }

    /// Prospects grouped by pipeline stage.
    pub async fn get_pipeline(&self) -> Result<PipelineResponse, ApiError> {
        let response = self
            .send_authenticated(self.client.get(self.api_url("workspace/pipeline")))
            .await?;
        Self::decode(response).await
    }

    /// Recent activity stream entries.
    pub async fn get_activity(&self) -> Result<ActivityResponse, ApiError> {
        let response = self
            .send_authenticated(self.client.get(self.api_url("workspace/activity")))
            .await?;
        Self::decode(response).await
    }

    /// Current workspace settings.
    pub async fn get_settings(&self) -> Result<WorkspaceSettings, ApiError> {
        let response = self
            .send_authenticated(self.client.get(self.api_url("workspace/settings")))
            .await?;
        Self::decode(response).await
    }

    /// Apply a partial settings update (pause/resume the agent).
    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<(), ApiError> {
        let response = self
            .send_authenticated(
                self.client
                    .patch(self.api_url("workspace/settings"))
                    .json(update),
            )
            .await?;
        Self::expect_success(response).await
    }

    /// Add a prospect to the pipeline by hand.
    pub async fn add_prospect(&self, prospect: &NewProspect) -> Result<(), ApiError> {
        let response = self
            .send_authenticated(self.client.post(self.api_url("prospects")).json(prospect))
            .await?;
        Self::expect_success(response).await
    }

    /// Update a prospect's stage or priority.
    pub async fn update_prospect(
        &self,
        prospect_id: &str,
        update: &ProspectUpdate,
    ) -> Result<(), ApiError> {
        let response = self
            .send_authenticated(
                self.client
                    .patch(self.api_url(&format!("prospects/{prospect_id}")))
                    .json(update),
            )
            .await?;
        Self::expect_success(response).await
    }

    /// Remove a prospect from the pipeline.
    pub async fn delete_prospect(&self, prospect_id: &str) -> Result<(), ApiError> {
        let response = self
            .send_authenticated(
                self.client
                    .delete(self.api_url(&format!("prospects/{prospect_id}"))),
            )
            .await?;
        Self::expect_success(response).await
    }

    /// The decision currently being worked through, if any.
    ///
    /// A 404 means no decision is in flight, which is a normal state for a
    /// fresh account, not an error.
    pub async fn get_active_decision(&self) -> Result<DecisionDetailResponse, ApiError> {
        let response = self
            .send_authenticated(self.client.get(self.api_url("decisions/active")))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(DecisionDetailResponse::default());
        }
        Self::decode(response).await
    }

    /// Committed decisions, newest first.
    pub async fn get_library(&self) -> Result<LibraryResponse, ApiError> {
        let response = self
            .send_authenticated(self.client.get(self.api_url("decisions/library")))
            .await?;
        Self::decode(response).await
    }

    /// Full detail for one decision from the library.
    pub async fn get_decision(&self, decision_id: &str) -> Result<DecisionDetailResponse, ApiError> {
        let response = self
            .send_authenticated(
                self.client
                    .get(self.api_url(&format!("decisions/library/{decision_id}"))),
            )
            .await?;
        Self::decode(response).await
    }

    /// Start a new decision from a free-form description.
    ///
    /// Validates the description length first (no network call when it is
    /// too short), and returns the new decision's id.
    pub async fn create_decision(&self, content: &str) -> Result<String, ApiError> {
        session::validate_decision_content(content)?;
        let payload = CreateDecisionRequest {
            content: content.trim().to_string(),
        };
        let response = self
            .send_authenticated(
                self.client
                    .post(self.api_url("decisions/create"))
                    .json(&payload),
            )
            .await?;
        let body: CreateDecisionResponse = Self::decode(response).await?;
        match body.decision_id {
            Some(id) if body.success => Ok(id),
            _ => Err(ApiError::Server(GENERIC_SERVER_ERROR.to_string())),
        }
    }

    /// Save the user's corrected framing of an active decision.
    pub async fn confirm_understanding(
        &self,
        decision_id: &str,
        update: &UnderstandingUpdate,
    ) -> Result<(), ApiError> {
        let response = self
            .send_authenticated(
                self.client
                    .post(self.api_url(&format!(
                        "decisions/{decision_id}/confirm-understanding"
                    )))
                    .json(update),
            )
            .await?;
        Self::expect_success(response).await
    }

    /// Commit a decision to the library, with an optional note.
    pub async fn commit_decision(&self, decision_id: &str, note: &str) -> Result<(), ApiError> {
        let payload = CommitDecisionRequest {
            note: note.trim().to_string(),
        };
        let response = self
            .send_authenticated(
                self.client
                    .post(self.api_url(&format!("decisions/{decision_id}/commit")))
                    .json(&payload),
            )
            .await?;
        Self::expect_success(response).await
    }

    /// Delete a decision outright.
    pub async fn delete_decision(&self, decision_id: &str) -> Result<(), ApiError> {
        let response = self
            .send_authenticated(
                self.client
                    .delete(self.api_url(&format!("decisions/{decision_id}"))),
            )
            .await?;
        Self::expect_success(response).await
    }

    /// Ask a follow-up question about an analyzed decision.
    pub async fn ask_followup(
        &self,
        decision_id: &str,
        question: &str,
    ) -> Result<FollowupMessage, ApiError> {
        let payload = FollowupRequest {
            question: question.trim().to_string(),
        };
        let response = self
            .send_authenticated(
                self.client
                    .post(self.api_url(&format!("decisions/{decision_id}/ask-followup")))
                    .json(&payload),
            )
            .await?;
        let body: FollowupResponse = Self::decode(response).await?;
        match body.answer {
            Some(answer) if body.success => Ok(answer),
            _ => Err(ApiError::Server(GENERIC_SERVER_ERROR.to_string())),
        }
    }

    /// Start a hosted checkout session for the upgrade flow.
    pub async fn create_checkout(&self) -> Result<CheckoutSessionResponse, ApiError> {
        let response = self
            .send_authenticated(self.client.post(self.api_url("payment/create-checkout")))
            .await?;
        Self::decode(response).await
    }

    /// Confirm the entitlement after returning from hosted checkout.
    pub async fn verify_payment(&self) -> Result<VerifyPaymentResponse, ApiError> {
        let response = self
            .send_authenticated(self.client.post(self.api_url("payment/verify")))
            .await?;
        Self::decode(response).await
    }
}

/// Decide a status-check outcome from response code and decoded body.
///
/// Any code >= 400 reads as unauthenticated regardless of what the body
/// claims; a 2xx without a usable profile does too.
fn interpret_status(code: StatusCode, body: Option<AuthStatusResponse>) -> AuthStatus {
    if !code.is_success() {
        return AuthStatus::Unauthenticated;
    }
    match body {
        Some(AuthStatusResponse {
            authenticated: true,
            user: Some(user),
        }) => AuthStatus::Authenticated(user),
        _ => AuthStatus::Unauthenticated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_body(paid: bool) -> AuthStatusResponse {
        AuthStatusResponse {
            authenticated: true,
            user: Some(UserProfile {
                email: "a@b.com".to_string(),
                display_name: None,
                paid,
                subscription_status: None,
            }),
        }
    }

    #[test]
    fn client_normalizes_base_url() {
        let client = OnyxClient::new("/api/");
        assert_eq!(client.api_url("auth/status"), "/api/auth/status");
        assert_eq!(client.api_url("/auth/login"), "/api/auth/login");
    }

    #[test]
    fn api_url_builds_prospect_paths() {
        let client = OnyxClient::new("/api");
        assert_eq!(
            client.api_url(&format!("prospects/{}", "p-42")),
            "/api/prospects/p-42"
        );
    }

    #[test]
    fn error_statuses_read_as_unauthenticated_regardless_of_body() {
        for code in [
            StatusCode::BAD_REQUEST,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert_eq!(
                interpret_status(code, Some(status_body(true))),
                AuthStatus::Unauthenticated,
                "status {code} must not authenticate"
            );
        }
    }

    #[test]
    fn success_with_profile_authenticates() {
        let status = interpret_status(StatusCode::OK, Some(status_body(true)));
        let AuthStatus::Authenticated(user) = status else {
            panic!("expected authenticated status");
        };
        assert_eq!(user.email, "a@b.com");
    }

    #[test]
    fn success_without_profile_stays_unauthenticated() {
        assert_eq!(
            interpret_status(StatusCode::OK, None),
            AuthStatus::Unauthenticated
        );
        let denied = AuthStatusResponse {
            authenticated: false,
            user: None,
        };
        assert_eq!(
            interpret_status(StatusCode::OK, Some(denied)),
            AuthStatus::Unauthenticated
        );
    }
}
