use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;

use crate::database::models::{DutyQuota, DutyQuotaInput};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_duty_quota(&self, year: i32, month: i32) -> Result<Option<DutyQuota>> {
        let quota = sqlx::query_as::<_, DutyQuota>(
            r#"
            SELECT
                year, month, duty_hours, updated_at
            FROM
                duty_quotas
            WHERE
                year = $1
                AND month = $2
            "#,
        )
        .bind(year)
        .bind(month)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quota)
    }

    /// Resolve the duty-hour quota for a month, falling back to the
    /// configured default when no row exists.
    pub async fn resolve_duty_hours(&self, year: i32, month: i32, default: f64) -> Result<f64> {
        Ok(self
            .get_duty_quota(year, month)
            .await?
            .map(|q| q.duty_hours)
            .unwrap_or(default))
    }

    pub async fn set_duty_quota(&self, input: DutyQuotaInput) -> Result<DutyQuota> {
        let quota = sqlx::query_as::<_, DutyQuota>(
            r#"
            INSERT INTO
                duty_quotas (year, month, duty_hours, updated_at)
            VALUES
                ($1, $2, $3, $4)
            ON CONFLICT (year, month) DO UPDATE
            SET
                duty_hours = EXCLUDED.duty_hours,
                updated_at = EXCLUDED.updated_at
            RETURNING
                year, month, duty_hours, updated_at
            "#,
        )
        .bind(input.year)
        .bind(input.month)
        .bind(input.duty_hours)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(quota)
    }
}
