use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A decision the user is working through (or has committed).
///
/// Most fields start empty: the backend fills in goal, constraints and the
/// rest as its analysis of the free-form description progresses, so the
/// client tolerates any of them being absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Decision {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_horizon: Option<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_metric: Option<String>,
    /// `cautious`, `balanced` or `bold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<String>,
    /// `active` while being worked on, `committed` once decided.
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<DateTime<Utc>>,
}

impl Decision {
    /// Whether this decision has been committed to the library.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.status == "committed"
    }

    /// Title shown in lists and headers.
    #[must_use]
    pub fn title_label(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled Decision")
    }
}

/// One candidate course of action, stress-tested by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionOption {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upside: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downside: Option<String>,
    #[serde(default)]
    pub key_assumptions: Vec<String>,
    /// `robust`, `balanced` or `fragile`; absent reads as `balanced`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragility_score: Option<String>,
}

impl DecisionOption {
    /// Fragility shown on the option badge.
    #[must_use]
    pub fn fragility_label(&self) -> &str {
        self.fragility_score.as_deref().unwrap_or("balanced")
    }
}

/// The backend's pick among the analyzed options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub recommended_option_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_not_alternatives: Option<String>,
}

impl Recommendation {
    /// Resolve the recommended option within the decision's option set.
    #[must_use]
    pub fn recommended_in<'a>(&self, options: &'a [DecisionOption]) -> Option<&'a DecisionOption> {
        options
            .iter()
            .find(|option| option.id == self.recommended_option_id)
    }
}

/// One message in a decision's follow-up thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowupMessage {
    /// `user` or `system`.
    #[serde(default)]
    pub author_type: String,
    #[serde(default)]
    pub content: String,
}

impl FollowupMessage {
    /// Speaker label rendered above the message.
    #[must_use]
    pub fn author_label(&self) -> &'static str {
        if self.author_type == "user" { "You" } else { "Onyx" }
    }
}

/// Response from `GET decisions/active` and `GET decisions/library/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionDetailResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(default)]
    pub options: Vec<DecisionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    #[serde(default)]
    pub followups: Vec<FollowupMessage>,
}

/// Response from `GET decisions/library`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryResponse {
    #[serde(default)]
    pub decisions: Vec<Decision>,
}

/// Request to start a new decision from a free-form description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDecisionRequest {
    pub content: String,
}

/// Response from `POST decisions/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDecisionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_id: Option<String>,
}

/// Corrected framing sent via `POST decisions/{id}/confirm-understanding`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnderstandingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_horizon: Option<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_metric: Option<String>,
}

/// Request body for `POST decisions/{id}/commit`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitDecisionRequest {
    #[serde(default)]
    pub note: String,
}

/// Request body for `POST decisions/{id}/ask-followup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowupRequest {
    pub question: String,
}

/// Response from `POST decisions/{id}/ask-followup`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<FollowupMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_tolerates_sparse_body() {
        let decision: Decision = serde_json::from_str(r#"{"id":"d-1"}"#).unwrap();
        assert_eq!(decision.title_label(), "Untitled Decision");
        assert!(decision.constraints.is_empty());
        assert!(!decision.is_committed());
    }

    #[test]
    fn committed_status_is_recognized() {
        let decision: Decision =
            serde_json::from_str(r#"{"id":"d-1","status":"committed"}"#).unwrap();
        assert!(decision.is_committed());
    }

    #[test]
    fn fragility_defaults_to_balanced() {
        let option: DecisionOption =
            serde_json::from_str(r#"{"id":"o-1","name":"Stay"}"#).unwrap();
        assert_eq!(option.fragility_label(), "balanced");

        let scored: DecisionOption =
            serde_json::from_str(r#"{"id":"o-2","name":"Go","fragility_score":"fragile"}"#)
                .unwrap();
        assert_eq!(scored.fragility_label(), "fragile");
    }

    #[test]
    fn recommendation_resolves_its_option() {
        let options = vec![
            DecisionOption {
                id: "o-1".to_string(),
                name: "Stay".to_string(),
                ..DecisionOption::default()
            },
            DecisionOption {
                id: "o-2".to_string(),
                name: "Go".to_string(),
                ..DecisionOption::default()
            },
        ];
        let recommendation = Recommendation {
            recommended_option_id: "o-2".to_string(),
            ..Recommendation::default()
        };
        assert_eq!(recommendation.recommended_in(&options).unwrap().name, "Go");

        let dangling = Recommendation {
            recommended_option_id: "o-9".to_string(),
            ..Recommendation::default()
        };
        assert!(dangling.recommended_in(&options).is_none());
    }

    #[test]
    fn followup_author_labels() {
        let user = FollowupMessage {
            author_type: "user".to_string(),
            content: "What about hiring?".to_string(),
        };
        assert_eq!(user.author_label(), "You");

        let system = FollowupMessage {
            author_type: "system".to_string(),
            content: "Hiring trades speed for cash.".to_string(),
        };
        assert_eq!(system.author_label(), "Onyx");
    }

    #[test]
    fn detail_response_tolerates_missing_sections() {
        let detail: DecisionDetailResponse = serde_json::from_str("{}").unwrap();
        assert!(detail.decision.is_none());
        assert!(detail.options.is_empty());
        assert!(detail.recommendation.is_none());
        assert!(detail.followups.is_empty());
    }
}
