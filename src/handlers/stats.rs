use actix_web::{HttpResponse, Result, web};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{AttendanceEvent, IncompleteAlert, User};
use crate::database::repositories::{
    AttendanceRepository, LeaveRepository, SettingsRepository, UserRepository,
};
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::worktime;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthQuery {
    pub user_id: Option<String>,
    pub year: i32,
    pub month: u32,
}

/// First and last calendar day of a month, or None for an invalid month
pub(crate) fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next.pred_opt()?))
}

/// Get the reconciled work summary for one person and month. Employees
/// see their own figures; admins may query anyone's.
pub async fn get_work_summary(
    claims: Claims,
    attendance_repo: web::Data<AttendanceRepository>,
    leave_repo: web::Data<LeaveRepository>,
    settings_repo: web::Data<SettingsRepository>,
    config: web::Data<Config>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse> {
    let user_id = if claims.is_admin() {
        query
            .user_id
            .as_ref()
            .and_then(|id| id.parse::<Uuid>().ok())
            .unwrap_or_else(|| claims.user_id())
    } else {
        claims.user_id()
    };

    let Some((start, end)) = month_bounds(query.year, query.month) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid month")));
    };

    let result = async {
        let events = attendance_repo
            .get_events(user_id, Some(start), Some(end))
            .await?;
        // any status; the reconciliation engine re-filters to approved
        let requests = leave_repo
            .get_requests(Some(user_id), None, Some(start), Some(end))
            .await?;
        let duty_hours = settings_repo
            .resolve_duty_hours(query.year, query.month as i32, config.duty_hours_default)
            .await?;

        anyhow::Ok(worktime::reconcile(&events, duty_hours, &requests))
    }
    .await;

    match result {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(err) => {
            log::error!("Error computing work summary: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to compute work summary")))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteQuery {
    pub year: i32,
    pub month: u32,
}

/// Admin alert list: one entry per person whose month contains at least
/// one day with a malformed clock sequence, with the offending dates.
pub async fn get_incomplete_alerts(
    claims: Claims,
    attendance_repo: web::Data<AttendanceRepository>,
    user_repo: web::Data<UserRepository>,
    query: web::Query<IncompleteQuery>,
) -> Result<HttpResponse> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Only admins can view attendance alerts")));
    }

    let Some((start, end)) = month_bounds(query.year, query.month) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid month")));
    };

    let result = async {
        let users = user_repo.get_users().await?;
        let events = attendance_repo.get_events_in_range(start, end).await?;
        anyhow::Ok(collect_alerts(users, events))
    }
    .await;

    match result {
        Ok(alerts) => Ok(HttpResponse::Ok().json(ApiResponse::success(alerts))),
        Err(err) => {
            log::error!("Error collecting attendance alerts: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to collect attendance alerts")))
        }
    }
}

fn collect_alerts(users: Vec<User>, events: Vec<AttendanceEvent>) -> Vec<IncompleteAlert> {
    let mut per_day: BTreeMap<(Uuid, NaiveDate), Vec<AttendanceEvent>> = BTreeMap::new();
    for event in events {
        per_day
            .entry((event.user_id, event.calendar_date))
            .or_default()
            .push(event);
    }

    let mut bad_dates: BTreeMap<Uuid, Vec<NaiveDate>> = BTreeMap::new();
    for ((user_id, date), day_events) in &per_day {
        if worktime::is_incomplete(day_events) {
            bad_dates.entry(*user_id).or_default().push(*date);
        }
    }

    users
        .into_iter()
        .filter_map(|user| {
            bad_dates.remove(&user.id).map(|dates| IncompleteAlert {
                user_id: user.id,
                name: user.name,
                email: user.email,
                dates,
            })
        })
        .collect()
}
