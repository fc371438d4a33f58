use actix_web::{HttpResponse, Result, web};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{LeaveRequestInput, LeaveStatus};
use crate::database::repositories::LeaveRepository;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveQuery {
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalInput {
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RejectionInput {
    pub notes: String, // Required for rejections
}

/// Create a new leave request
pub async fn create_leave_request(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    input: web::Json<LeaveRequestInput>,
) -> Result<HttpResponse> {
    let mut request_input = input.into_inner();

    // Employees can only file requests for themselves
    if !claims.is_admin() {
        request_input.user_id = claims.user_id();
    }

    if request_input.amount < 0.0 {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::<()>::error("Amount must be non-negative"))
        );
    }

    match repo.create_request(request_input).await {
        Ok(request) => Ok(HttpResponse::Created().json(ApiResponse::success(request))),
        Err(err) => {
            log::error!("Error creating leave request: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to create leave request")))
        }
    }
}

/// Get leave requests with optional filtering
pub async fn get_leave_requests(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    query: web::Query<LeaveQuery>,
) -> Result<HttpResponse> {
    // Employees can only see their own requests
    let user_id = if claims.is_admin() {
        query
            .user_id
            .as_ref()
            .and_then(|id| id.parse::<Uuid>().ok())
    } else {
        Some(claims.user_id())
    };

    let status_filter = if let Some(status_str) = &query.status {
        match status_str.parse::<LeaveStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return Ok(
                    HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid status"))
                );
            }
        }
    } else {
        None
    };

    match repo
        .get_requests(user_id, status_filter, query.start_date, query.end_date)
        .await
    {
        Ok(requests) => Ok(HttpResponse::Ok().json(ApiResponse::success(requests))),
        Err(err) => {
            log::error!("Error fetching leave requests: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch leave requests")))
        }
    }
}

/// Get a specific leave request by ID
pub async fn get_leave_request(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let request_id = path.into_inner();

    match repo.get_request_by_id(request_id).await {
        Ok(Some(request)) => {
            if !claims.is_admin() && request.user_id != claims.user_id() {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
                    "Cannot view other users' requests",
                )));
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
        }
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("Leave request not found")))
        }
        Err(err) => {
            log::error!("Error fetching leave request: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch leave request")))
        }
    }
}

/// Delete a leave request. Owners may withdraw their own requests while
/// still pending; admins may delete any.
pub async fn delete_leave_request(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let request_id = path.into_inner();

    let request = match repo.get_request_by_id(request_id).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::<()>::error("Leave request not found"))
            );
        }
        Err(err) => {
            log::error!("Error fetching leave request: {}", err);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch leave request")));
        }
    };

    if !claims.is_admin() {
        if request.user_id != claims.user_id() {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
                "Cannot delete other users' requests",
            )));
        }
        if request.status != LeaveStatus::Pending {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(
                "Only pending requests can be withdrawn",
            )));
        }
    }

    match repo.delete_request(request_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            None,
            "Leave request deleted",
        ))),
        Ok(false) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("Leave request not found")))
        }
        Err(err) => {
            log::error!("Error deleting leave request: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to delete leave request")))
        }
    }
}

/// Approve a pending leave request (admin only)
pub async fn approve_leave_request(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    path: web::Path<Uuid>,
    input: web::Json<ApprovalInput>,
) -> Result<HttpResponse> {
    review_request(
        claims,
        repo,
        path.into_inner(),
        LeaveStatus::Approved,
        input.into_inner().notes,
    )
    .await
}

/// Reject a pending leave request with a note (admin only)
pub async fn reject_leave_request(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    path: web::Path<Uuid>,
    input: web::Json<RejectionInput>,
) -> Result<HttpResponse> {
    review_request(
        claims,
        repo,
        path.into_inner(),
        LeaveStatus::Rejected,
        Some(input.into_inner().notes),
    )
    .await
}

async fn review_request(
    claims: Claims,
    repo: web::Data<LeaveRepository>,
    request_id: Uuid,
    status: LeaveStatus,
    notes: Option<String>,
) -> Result<HttpResponse> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Only admins can review requests")));
    }

    match repo
        .review_request(request_id, status, claims.user_id(), notes)
        .await
    {
        Ok(Some(request)) => Ok(HttpResponse::Ok().json(ApiResponse::success(request))),
        // either missing or already reviewed; the transition is one-shot
        Ok(None) => Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "Request not found or already reviewed",
        ))),
        Err(err) => {
            log::error!("Error reviewing leave request: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to review leave request")))
        }
    }
}
