use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily outreach counters shown in the "today" card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Conversations the agent opened today.
    #[serde(default)]
    pub conversations_started: u32,
    /// Replies received today.
    #[serde(default)]
    pub replies: u32,
    /// Prospects that qualified today.
    #[serde(default)]
    pub qualified_leads: u32,
}

/// Whether the outreach agent is running, paused or stopped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentStatus {
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_paused: bool,
}

impl AgentStatus {
    /// Label rendered next to the status dot.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_paused {
            "Paused"
        } else if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Response from `GET /api/workspace/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardResponse {
    #[serde(default)]
    pub summary: DashboardSummary,
    #[serde(default)]
    pub status: AgentStatus,
}

/// A prospect card in the pipeline board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prospect {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub company: String,
    /// `high`, `medium` or `normal`; absent means `normal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Prospects grouped by pipeline stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pipeline {
    #[serde(default)]
    pub found: Vec<Prospect>,
    #[serde(default)]
    pub contacted: Vec<Prospect>,
    #[serde(default)]
    pub talking: Vec<Prospect>,
    #[serde(default)]
    pub ready: Vec<Prospect>,
}

impl Pipeline {
    /// Stage name / column pairs in board order.
    #[must_use]
    pub fn stages(&self) -> [(&'static str, &[Prospect]); 4] {
        [
            ("Found", &self.found),
            ("Contacted", &self.contacted),
            ("Talking", &self.talking),
            ("Ready", &self.ready),
        ]
    }
}

/// Response from `GET /api/workspace/pipeline`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineResponse {
    #[serde(default)]
    pub pipeline: Pipeline,
}

/// One entry in the activity stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityItem {
    pub id: String,
    #[serde(default)]
    pub activity_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Response from `GET /api/workspace/activity`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityResponse {
    #[serde(default)]
    pub activities: Vec<ActivityItem>,
}

/// Response from `GET /api/workspace/settings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceSettings {
    #[serde(default)]
    pub is_paused: bool,
}

/// Partial update sent via `PATCH /api/workspace/settings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,
}

/// Partial update sent via `PATCH /api/prospects/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProspectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

/// Request to add a prospect to the pipeline by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProspect {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub company: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_status_label() {
        let running = AgentStatus {
            is_active: true,
            is_paused: false,
        };
        assert_eq!(running.label(), "Active");

        // Paused wins even when the backend still reports active.
        let paused = AgentStatus {
            is_active: true,
            is_paused: true,
        };
        assert_eq!(paused.label(), "Paused");

        assert_eq!(AgentStatus::default().label(), "Inactive");
    }

    #[test]
    fn dashboard_response_tolerates_sparse_body() {
        let response: DashboardResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.summary.conversations_started, 0);
        assert!(!response.status.is_active);
    }

    #[test]
    fn pipeline_stages_keep_board_order() {
        let pipeline = Pipeline {
            ready: vec![Prospect {
                id: "6".to_string(),
                first_name: "Alex".to_string(),
                company: "BigCorp".to_string(),
                priority: Some("high".to_string()),
            }],
            ..Pipeline::default()
        };
        let stages = pipeline.stages();
        assert_eq!(stages[0].0, "Found");
        assert_eq!(stages[3].0, "Ready");
        assert_eq!(stages[3].1.len(), 1);
    }

    #[test]
    fn settings_update_skips_unset_fields() {
        let update = SettingsUpdate { is_paused: None };
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");

        let update = SettingsUpdate {
            is_paused: Some(true),
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"is_paused":true}"#
        );
    }

    #[test]
    fn activity_item_decodes_timestamps() {
        let raw = r#"{
            "id": "1",
            "activity_type": "reply_received",
            "description": "Mark replied",
            "created_at": "2026-08-27T10:00:00Z"
        }"#;
        let item: ActivityItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.description, "Mark replied");
    }
}
