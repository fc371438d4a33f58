use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// One timestamped clock action by one person. Immutable once created;
/// the event log is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Epoch milliseconds; the sole ordering key for pairing.
    pub timestamp_ms: i64,
    pub kind: EventKind,
    /// Local calendar date the event is attributed to. Authoritative for
    /// grouping even when it disagrees with the timestamp's UTC date
    /// (manual entries, timezone edges).
    pub calendar_date: NaiveDate,
    /// Presentational HH:MM, never used in computation.
    pub display_time: String,
    pub created_at: DateTime<Utc>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum EventKind {
        ClockIn => "clock_in",
        ClockOut => "clock_out",
        PassStart => "pass_start",
        PassEnd => "pass_end",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEventInput {
    pub user_id: Uuid,
    pub timestamp_ms: i64,
    pub kind: EventKind,
    pub calendar_date: NaiveDate,
    pub display_time: String,
}
