use actix_web::{HttpResponse, Result, web};
use anyhow::Result as AnyResult;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{AttendanceEvent, LeaveRequest, User, WorkSummary};
use crate::database::repositories::{
    AttendanceRepository, LeaveRepository, SettingsRepository, UserRepository,
};
use crate::handlers::shared::ApiResponse;
use crate::handlers::stats::month_bounds;
use crate::services::auth::Claims;
use crate::services::worktime;

/// Spreadsheet tooling expects the BOM prefix to detect UTF-8
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    Summary,
    Detailed,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub year: i32,
    pub month: u32,
    pub mode: Option<ExportMode>,
}

/// Export one month as CSV: summary mode is one row per person with the
/// reconciled figures, detailed mode one row per attendance event.
/// Admin only.
pub async fn export_csv(
    claims: Claims,
    attendance_repo: web::Data<AttendanceRepository>,
    leave_repo: web::Data<LeaveRepository>,
    settings_repo: web::Data<SettingsRepository>,
    user_repo: web::Data<UserRepository>,
    config: web::Data<Config>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse> {
    if !claims.is_admin() {
        return Ok(
            HttpResponse::Forbidden().json(ApiResponse::<()>::error("Only admins can export data"))
        );
    }

    let Some((start, end)) = month_bounds(query.year, query.month) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid month")));
    };
    let mode = query.mode.unwrap_or(ExportMode::Summary);

    let result = async {
        let users = user_repo.get_users().await?;
        let events = attendance_repo.get_events_in_range(start, end).await?;

        match mode {
            ExportMode::Detailed => detailed_csv(&users, &events),
            ExportMode::Summary => {
                let requests = leave_repo
                    .get_requests(None, None, Some(start), Some(end))
                    .await?;
                let duty_hours = settings_repo
                    .resolve_duty_hours(query.year, query.month as i32, config.duty_hours_default)
                    .await?;

                let mut events_by_user: HashMap<Uuid, Vec<AttendanceEvent>> = HashMap::new();
                for event in events {
                    events_by_user.entry(event.user_id).or_default().push(event);
                }
                let mut requests_by_user: HashMap<Uuid, Vec<LeaveRequest>> = HashMap::new();
                for request in requests {
                    requests_by_user
                        .entry(request.user_id)
                        .or_default()
                        .push(request);
                }

                let rows: Vec<(&User, WorkSummary)> = users
                    .iter()
                    .map(|user| {
                        let user_events =
                            events_by_user.get(&user.id).map_or(&[][..], |v| v.as_slice());
                        let user_requests = requests_by_user
                            .get(&user.id)
                            .map_or(&[][..], |v| v.as_slice());
                        (
                            user,
                            worktime::reconcile(user_events, duty_hours, user_requests),
                        )
                    })
                    .collect();

                summary_csv(&rows)
            }
        }
    }
    .await;

    match result {
        Ok(bytes) => {
            let filename = format!(
                "attendance-{}-{:02}-{}.csv",
                query.year,
                query.month,
                match mode {
                    ExportMode::Summary => "summary",
                    ExportMode::Detailed => "detailed",
                }
            );
            Ok(HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(bytes))
        }
        Err(err) => {
            log::error!("Error exporting CSV: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to export CSV")))
        }
    }
}

/// One row per person with their reconciled month
pub(crate) fn summary_csv(rows: &[(&User, WorkSummary)]) -> AnyResult<Vec<u8>> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);

        wtr.write_record([
            "name",
            "email",
            "physical_minutes",
            "pass_minutes",
            "remote_minutes",
            "net_work",
            "overtime",
            "deficit",
            "daily_leave_days",
            "incomplete",
        ])?;

        for (user, summary) in rows {
            wtr.write_record(&[
                user.name.clone(),
                user.email.clone(),
                summary.physical_work_minutes.to_string(),
                summary.pass_minutes.to_string(),
                summary.remote_minutes.to_string(),
                summary.net_work.clone(),
                summary.overtime.clone(),
                summary.deficit.clone(),
                summary.daily_leave_days.to_string(),
                summary.is_incomplete.to_string(),
            ])?;
        }

        wtr.flush()?;
    }
    Ok(buf)
}

/// One row per attendance event, joined with the owner's name
pub(crate) fn detailed_csv(users: &[User], events: &[AttendanceEvent]) -> AnyResult<Vec<u8>> {
    let names: HashMap<Uuid, &str> = users.iter().map(|u| (u.id, u.name.as_str())).collect();

    let mut buf = UTF8_BOM.to_vec();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);

        wtr.write_record(["name", "date", "kind", "time", "timestamp_ms"])?;

        for event in events {
            wtr.write_record(&[
                names.get(&event.user_id).copied().unwrap_or("").to_string(),
                event.calendar_date.to_string(),
                event.kind.to_string(),
                event.display_time.clone(),
                event.timestamp_ms.to_string(),
            ])?;
        }

        wtr.flush()?;
    }
    Ok(buf)
}
