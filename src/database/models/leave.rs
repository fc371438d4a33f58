use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: LeaveKind,
    /// Days for DailyLeave; hours (fractional allowed) for HourlyPass and
    /// RemoteWork.
    pub amount: f64,
    pub status: LeaveStatus,
    pub calendar_date: NaiveDate,
    pub description: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestInput {
    pub user_id: Uuid,
    pub kind: LeaveKind,
    pub amount: f64,
    pub calendar_date: NaiveDate,
    pub description: Option<String>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum LeaveKind {
        DailyLeave => "daily_leave",
        HourlyPass => "hourly_pass",
        RemoteWork => "remote_work",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum LeaveStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}
