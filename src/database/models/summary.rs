use serde::Serialize;

/// Reconciled work figures for one person over one month. Derived on
/// demand from events + approved requests + the month's duty quota;
/// never persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSummary {
    pub physical_work_minutes: f64,
    pub pass_minutes: f64,
    pub remote_minutes: f64,
    pub net_work_minutes: f64,
    pub overtime_minutes: f64,
    pub deficit_minutes: f64,
    pub daily_leave_days: i64,
    pub is_incomplete: bool,
    pub net_work: String,
    pub overtime: String,
    pub deficit: String,
}

/// One admin alert: a person whose event log contains at least one day
/// with a malformed clock sequence.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteAlert {
    pub user_id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub dates: Vec<chrono::NaiveDate>,
}
