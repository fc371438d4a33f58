use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::database::models::{CreateUserInput, LoginInput, UserInfo};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

/// Register a new employee account
pub async fn register(
    state: web::Data<AppState>,
    input: web::Json<CreateUserInput>,
) -> Result<HttpResponse> {
    let response = state
        .auth_service
        .register(input.into_inner())
        .await
        .map_err(|e| {
            log::error!("Failed to register user: {}", e);
            AppError::BadRequest(e.to_string())
        })?;

    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

/// Log in with email and password
pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    let response = state
        .auth_service
        .login(input.into_inner())
        .await
        .map_err(|e| {
            log::warn!("Failed login attempt: {}", e);
            AppError::Unauthorized
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Get the authenticated user's own profile
pub async fn me(claims: Claims, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = state
        .auth_service
        .get_user(claims.user_id())
        .await
        .map_err(|e| {
            log::error!("Failed to load user {}: {}", claims.user_id(), e);
            AppError::NotFound("User not found".to_string())
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserInfo::from(user))))
}
