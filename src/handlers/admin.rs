use actix_web::{HttpResponse, Result, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{DutyQuotaInput, UpdateUserInput, UserInfo};
use crate::database::repositories::{SettingsRepository, UserRepository};
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

/// Get all users (admin only)
pub async fn get_users(claims: Claims, repo: web::Data<UserRepository>) -> Result<HttpResponse> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Only admins can list users")));
    }

    match repo.get_users().await {
        Ok(users) => {
            let users: Vec<UserInfo> = users.into_iter().map(UserInfo::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
        }
        Err(err) => {
            log::error!("Error fetching users: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch users")))
        }
    }
}

/// Update a user's name or role (admin only)
pub async fn update_user(
    claims: Claims,
    repo: web::Data<UserRepository>,
    path: web::Path<Uuid>,
    input: web::Json<UpdateUserInput>,
) -> Result<HttpResponse> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Only admins can update users")));
    }

    match repo.update_user(path.into_inner(), input.into_inner()).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(UserInfo::from(user)))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("User not found"))),
        Err(err) => {
            log::error!("Error updating user: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to update user")))
        }
    }
}

/// Delete a user and, by cascade, their attendance events and leave
/// requests (admin only)
pub async fn delete_user(
    claims: Claims,
    repo: web::Data<UserRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Only admins can delete users")));
    }

    let user_id = path.into_inner();
    if user_id == claims.user_id() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("Cannot delete your own account")));
    }

    match repo.delete_user(user_id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::<()>::success_with_message(None, "User deleted"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("User not found"))),
        Err(err) => {
            log::error!("Error deleting user: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to delete user")))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaQuery {
    pub year: i32,
    pub month: i32,
}

/// Get the duty-hour quota for a month, falling back to the configured
/// default (admin only)
pub async fn get_duty_quota(
    claims: Claims,
    repo: web::Data<SettingsRepository>,
    config: web::Data<Config>,
    query: web::Query<QuotaQuery>,
) -> Result<HttpResponse> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Only admins can view quota settings")));
    }

    match repo.get_duty_quota(query.year, query.month).await {
        Ok(Some(quota)) => Ok(HttpResponse::Ok().json(ApiResponse::success(quota))),
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
            "year": query.year,
            "month": query.month,
            "dutyHours": config.duty_hours_default,
            "default": true,
        })))),
        Err(err) => {
            log::error!("Error fetching duty quota: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to fetch duty quota")))
        }
    }
}

/// Set the duty-hour quota for a month (admin only)
pub async fn set_duty_quota(
    claims: Claims,
    repo: web::Data<SettingsRepository>,
    input: web::Json<DutyQuotaInput>,
) -> Result<HttpResponse> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden()
            .json(ApiResponse::<()>::error("Only admins can change quota settings")));
    }

    let input = input.into_inner();
    if input.duty_hours < 0.0 {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("Duty hours must be non-negative")));
    }
    if !(1..=12).contains(&input.month) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid month")));
    }

    match repo.set_duty_quota(input).await {
        Ok(quota) => Ok(HttpResponse::Ok().json(ApiResponse::success(quota))),
        Err(err) => {
            log::error!("Error setting duty quota: {}", err);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to set duty quota")))
        }
    }
}
