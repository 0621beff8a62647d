use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    /// Statuses a reviewer may set.
    pub fn is_decision(self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Rejected)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusChange {
    #[schema(example = "approved")]
    pub status: LeaveStatus,
    #[schema(example = "MGR1")]
    pub changed_by: String,
    #[schema(example = "2025-01-20T09:30:00Z", format = "date-time", value_type = String)]
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "4d7f5b2e-8a51-4c55-b0f4-3b8f7b0e2c11",
        "employee_id": "E1",
        "type": "annual",
        "start_date": "2025-02-01",
        "end_date": "2025-02-05",
        "reason": "Family visit",
        "submitted_by": "E1",
        "status": "approved",
        "status_history": [
            { "status": "pending", "changed_by": "E1", "changed_at": "2025-01-15T08:00:00Z" },
            { "status": "approved", "changed_by": "MGR1", "changed_at": "2025-01-20T09:30:00Z" }
        ],
        "deleted": false,
        "created_at": "2025-01-15T08:00:00Z"
    })
)]
pub struct LeaveRequest {
    pub id: String,

    #[schema(example = "E1")]
    pub employee_id: String,

    #[serde(rename = "type")]
    #[schema(example = "annual")]
    pub leave_type: String,

    #[schema(example = "2025-02-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    #[schema(example = "2025-02-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,

    #[serde(default)]
    #[schema(nullable = true)]
    pub reason: Option<String>,

    #[schema(example = "E1")]
    pub submitted_by: String,

    pub status: LeaveStatus,

    /// Every status the request has held, oldest first
    pub status_history: Vec<StatusChange>,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time", value_type = Option<String>)]
    pub deleted_at: Option<DateTime<Utc>>,

    #[schema(example = "2025-01-15T08:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_parsing_ignores_case() {
        assert_eq!(LeaveStatus::from_str("APPROVED"), Ok(LeaveStatus::Approved));
        assert_eq!(LeaveStatus::from_str("Rejected"), Ok(LeaveStatus::Rejected));
        assert_eq!(LeaveStatus::from_str("pending"), Ok(LeaveStatus::Pending));
        assert!(LeaveStatus::from_str("cancelled").is_err());
    }

    #[test]
    fn status_is_stored_lowercase() {
        assert_eq!(LeaveStatus::Approved.as_ref(), "approved");
        assert_eq!(LeaveStatus::Rejected.to_string(), "rejected");
        assert_eq!(serde_json::to_value(LeaveStatus::Pending).unwrap(), "pending");
    }

    #[test]
    fn only_approved_and_rejected_are_decisions() {
        assert!(LeaveStatus::Approved.is_decision());
        assert!(LeaveStatus::Rejected.is_decision());
        assert!(!LeaveStatus::Pending.is_decision());
    }
}
