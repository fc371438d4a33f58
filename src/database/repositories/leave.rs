use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{LeaveRequest, LeaveRequestInput, LeaveStatus};

#[derive(Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new leave request. Requests always start out pending.
    pub async fn create_request(&self, input: LeaveRequestInput) -> Result<LeaveRequest> {
        let now = Utc::now();

        let request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            INSERT INTO
                leave_requests (user_id, kind, amount, status, calendar_date, description, created_at, updated_at)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING
                id, user_id, kind, amount, status, calendar_date, description,
                reviewed_by, review_notes, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.kind)
        .bind(input.amount)
        .bind(LeaveStatus::Pending)
        .bind(input.calendar_date)
        .bind(input.description)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// Get leave requests with optional filtering
    pub async fn get_requests(
        &self,
        user_id: Option<Uuid>,
        status: Option<LeaveStatus>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<LeaveRequest>> {
        let mut query = r#"
            SELECT
                id, user_id, kind, amount, status, calendar_date, description,
                reviewed_by, review_notes, created_at, updated_at
            FROM
                leave_requests
            "#
        .to_string();

        let mut conditions = vec![];
        let mut params: Vec<String> = Vec::new();

        if let Some(uid) = user_id {
            conditions.push(format!("user_id = ${}::uuid", params.len() + 1));
            params.push(uid.to_string());
        }

        if let Some(s) = status {
            conditions.push(format!("status = ${}", params.len() + 1));
            params.push(s.to_string());
        }

        if let Some(sd) = start_date {
            conditions.push(format!("calendar_date >= ${}::date", params.len() + 1));
            params.push(sd.to_string());
        }

        if let Some(ed) = end_date {
            conditions.push(format!("calendar_date <= ${}::date", params.len() + 1));
            params.push(ed.to_string());
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut prepared = sqlx::query_as::<_, LeaveRequest>(&query);
        for param in params {
            prepared = prepared.bind(param);
        }

        let requests = prepared.fetch_all(&self.pool).await?;

        Ok(requests)
    }

    pub async fn get_request_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>> {
        let request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT
                id, user_id, kind, amount, status, calendar_date, description,
                reviewed_by, review_notes, created_at, updated_at
            FROM
                leave_requests
            WHERE
                id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// One-shot status transition by an admin. Only pending requests move;
    /// a request that was already reviewed is left untouched and `None` is
    /// returned.
    pub async fn review_request(
        &self,
        id: Uuid,
        status: LeaveStatus,
        reviewed_by: Uuid,
        notes: Option<String>,
    ) -> Result<Option<LeaveRequest>> {
        let request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            UPDATE
                leave_requests
            SET
                status = $1,
                reviewed_by = $2,
                review_notes = $3,
                updated_at = $4
            WHERE
                id = $5
                AND status = $6
            RETURNING
                id, user_id, kind, amount, status, calendar_date, description,
                reviewed_by, review_notes, created_at, updated_at
            "#,
        )
        .bind(status)
        .bind(reviewed_by)
        .bind(notes)
        .bind(Utc::now())
        .bind(id)
        .bind(LeaveStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Delete a request. Restricted to the owner's own pending requests at
    /// the handler layer.
    pub async fn delete_request(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM leave_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
