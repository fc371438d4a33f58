use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin-configured expected duty hours for one calendar month. Months
/// without a row fall back to `Config::duty_hours_default`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DutyQuota {
    pub year: i32,
    pub month: i32,
    pub duty_hours: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyQuotaInput {
    pub year: i32,
    pub month: i32,
    pub duty_hours: f64,
}
