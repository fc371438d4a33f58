use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{AttendanceEvent, AttendanceEventInput};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one clock action. Events are immutable; there is no update.
    pub async fn create_event(&self, input: AttendanceEventInput) -> Result<AttendanceEvent> {
        let event = sqlx::query_as::<_, AttendanceEvent>(
            r#"
            INSERT INTO
                attendance_events (user_id, timestamp_ms, kind, calendar_date, display_time)
            VALUES
                ($1, $2, $3, $4, $5)
            RETURNING
                id, user_id, timestamp_ms, kind, calendar_date, display_time, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.timestamp_ms)
        .bind(input.kind)
        .bind(input.calendar_date)
        .bind(input.display_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Events for one person, optionally bounded by calendar date. Ordered
    /// by timestamp so callers get a stable event log.
    pub async fn get_events(
        &self,
        user_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceEvent>> {
        let mut query = r#"
            SELECT
                id, user_id, timestamp_ms, kind, calendar_date, display_time, created_at
            FROM
                attendance_events
            WHERE
                user_id = $1
            "#
        .to_string();

        if start_date.is_some() {
            query.push_str(" AND calendar_date >= $2");
        }
        if end_date.is_some() {
            query.push_str(&format!(
                " AND calendar_date <= ${}",
                if start_date.is_some() { 3 } else { 2 }
            ));
        }
        query.push_str(" ORDER BY timestamp_ms");

        let mut prepared = sqlx::query_as::<_, AttendanceEvent>(&query).bind(user_id);
        if let Some(sd) = start_date {
            prepared = prepared.bind(sd);
        }
        if let Some(ed) = end_date {
            prepared = prepared.bind(ed);
        }

        let events = prepared.fetch_all(&self.pool).await?;

        Ok(events)
    }

    /// All events falling inside a date range, across every person. Used by
    /// month-wide reporting and CSV export.
    pub async fn get_events_in_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AttendanceEvent>> {
        let events = sqlx::query_as::<_, AttendanceEvent>(
            r#"
            SELECT
                id, user_id, timestamp_ms, kind, calendar_date, display_time, created_at
            FROM
                attendance_events
            WHERE
                calendar_date >= $1
                AND calendar_date <= $2
            ORDER BY
                user_id, timestamp_ms
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
