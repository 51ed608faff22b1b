//! Request and response payloads for the Onyx REST API.

pub mod decision;
pub mod errors;
pub mod payment;
pub mod session;
pub mod user;
pub mod workspace;

pub use decision::{
    CommitDecisionRequest, CreateDecisionRequest, CreateDecisionResponse, Decision,
    DecisionDetailResponse, DecisionOption, FollowupMessage, FollowupRequest, FollowupResponse,
    LibraryResponse, Recommendation, UnderstandingUpdate,
};
pub use errors::ErrorResponse;
pub use payment::{CheckoutSessionResponse, VerifyPaymentResponse};
pub use session::StoredSession;
pub use user::{
    AuthStatusResponse, LoginRequest, LoginResponse, SignupRequest, UserProfile,
};
pub use workspace::{
    ActivityItem, ActivityResponse, AgentStatus, DashboardResponse, DashboardSummary, NewProspect,
    Pipeline, PipelineResponse, Prospect, ProspectUpdate, SettingsUpdate, WorkspaceSettings,
};
