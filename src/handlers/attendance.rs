use actix_web::{HttpResponse, Result, web};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{AttendanceEventInput, EventKind};
use crate::database::repositories::AttendanceRepository;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub user_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Clock-action body. All fields are optional: the server stamps the
/// current instant, and the attributed calendar date may be overridden
/// for manual entries near midnight.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInput {
    pub calendar_date: Option<NaiveDate>,
}

pub async fn clock_in(
    claims: Claims,
    repo: web::Data<AttendanceRepository>,
    input: Option<web::Json<ClockInput>>,
) -> Result<HttpResponse> {
    record_event(claims, repo, input, EventKind::ClockIn).await
}

pub async fn clock_out(
    claims: Claims,
    repo: web::Data<AttendanceRepository>,
    input: Option<web::Json<ClockInput>>,
) -> Result<HttpResponse> {
    record_event(claims, repo, input, EventKind::ClockOut).await
}

pub async fn pass_start(
    claims: Claims,
    repo: web::Data<AttendanceRepository>,
    input: Option<web::Json<ClockInput>>,
) -> Result<HttpResponse> {
    record_event(claims, repo, input, EventKind::PassStart).await
}

pub async fn pass_end(
    claims: Claims,
    repo: web::Data<AttendanceRepository>,
    input: Option<web::Json<ClockInput>>,
) -> Result<HttpResponse> {
    record_event(claims, repo, input, EventKind::PassEnd).await
}

/// Append one server-stamped clock action for the authenticated user
async fn record_event(
    claims: Claims,
    repo: web::Data<AttendanceRepository>,
    input: Option<web::Json<ClockInput>>,
    kind: EventKind,
) -> Result<HttpResponse> {
    let now = Utc::now();
    let calendar_date = input
        .map(|i| i.into_inner())
        .unwrap_or_default()
        .calendar_date
        .unwrap_or_else(|| now.date_naive());

    let event_input = AttendanceEventInput {
        user_id: claims.user_id(),
        timestamp_ms: now.timestamp_millis(),
        kind,
        calendar_date,
        display_time: now.format("%H:%M").to_string(),
    };

    match repo.create_event(event_input).await {
        Ok(event) => Ok(HttpResponse::Created().json(ApiResponse::success(event))),
        Err(err) => {
            log::error!("Error recording attendance event: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to record attendance event")))
        }
    }
}

/// Get attendance events with optional date filtering. Employees see
/// their own log; admins may query anyone's.
pub async fn get_events(
    claims: Claims,
    repo: web::Data<AttendanceRepository>,
    query: web::Query<EventsQuery>,
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

    match repo.get_events(user_id, query.start_date, query.end_date).await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(events))),
        Err(err) => {
            log::error!("Error fetching attendance events: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch attendance events")))
        }
    }
}
