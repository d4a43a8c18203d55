//! User Management HTTP Handlers
//!
//! 관리자 사용자 관리와 본인 프로필 수정, 의사 계정 상태 조회 엔드포인트입니다.
use actix_web::{delete, get, patch, put, web, HttpResponse};
use serde_json::json;
use crate::core::registry::AppContext;
use crate::domain::dto::users::request::{UpdateUserRequest, UpdateVerificationStatusRequest};
use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;

/// 사용자 목록 조회 (관리자)
///
/// # Endpoint
/// `GET /api/v1/users`
#[get(
    "",
    wrap = "crate::middlewares::AuthMiddleware::required().roles(&[crate::domain::entities::users::user::Role::Admin])"
)]
pub async fn list_users(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let users = context.users.list_users().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Users retrieved successfully", users)))
}

/// 프로필 수정 (본인 또는 관리자)
///
/// # Endpoint
/// `PUT /api/v1/users/{user_id}`
#[put("/{user_id}", wrap = "crate::middlewares::AuthMiddleware::required()")]
pub async fn update_user(
    context: web::Data<AppContext>,
    user: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let updated = context.users
        .update_user(&user, &user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("User updated successfully", updated)))
}

/// 사용자 비활성화 (관리자, 소프트 삭제)
///
/// # Endpoint
/// `DELETE /api/v1/users/{user_id}`
#[delete(
    "/{user_id}",
    wrap = "crate::middlewares::AuthMiddleware::required().roles(&[crate::domain::entities::users::user::Role::Admin])"
)]
pub async fn deactivate_user(
    context: web::Data<AppContext>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    context.users.deactivate_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("User deactivated successfully")))
}

/// 의사 계정 심사 상태 변경 (관리자)
///
/// # Endpoint
/// `PATCH /api/v1/users/{user_id}/verification-status`
#[patch(
    "/{user_id}/verification-status",
    wrap = "crate::middlewares::AuthMiddleware::required().roles(&[crate::domain::entities::users::user::Role::Admin])"
)]
pub async fn update_verification_status(
    context: web::Data<AppContext>,
    user_id: web::Path<String>,
    payload: web::Json<UpdateVerificationStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let updated = context.users
        .set_verification_status(&user_id, payload.verification_status)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Verification status updated", updated)))
}

/// 승인된 의사 본인의 계정 상태
///
/// 인증, 역할, 이메일 인증, 의사 승인 단계를 모두 거친 요청만 도달합니다.
///
/// # Endpoint
/// `GET /api/v1/doctors/me/status`
#[get(
    "/me/status",
    wrap = "crate::middlewares::AuthMiddleware::required()\
        .roles(&[crate::domain::entities::users::user::Role::Doctor])\
        .verified_email()\
        .doctor_approval()"
)]
pub async fn doctor_status(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Doctor account is active",
        json!({
            "id": user.id,
            "email": user.email,
            "isEmailVerified": user.is_email_verified,
            "verificationStatus": user.verification_status,
        }),
    )))
}
