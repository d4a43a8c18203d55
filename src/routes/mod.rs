//! API 라우트 설정 모듈
//!
//! 기능별 스코프로 엔드포인트를 묶고, 각 보호 라우트에 접근 정책을 선언합니다.
//!
//! | Method & Path | 정책 |
//! |---|---|
//! | `GET /health` | 없음 |
//! | `POST /api/v1/auth/register` | 없음 |
//! | `POST /api/v1/auth/login` | 없음 |
//! | `POST /api/v1/auth/verify-email` | 없음 |
//! | `POST /api/v1/auth/resend-verification` | 없음 |
//! | `POST /api/v1/auth/refresh` | 리프레시 쿠키 (본문 대체) |
//! | `POST /api/v1/auth/logout` | 인증 |
//! | `GET /api/v1/auth/me` | 인증 |
//! | `GET /api/v1/users` | 인증 + admin |
//! | `PUT /api/v1/users/{id}` | 인증 (+ 본인 또는 관리자) |
//! | `DELETE /api/v1/users/{id}` | 인증 + admin |
//! | `PATCH /api/v1/users/{id}/verification-status` | 인증 + admin |
//! | `GET /api/v1/doctors/me/status` | 인증 + doctor + 이메일 인증 + 의사 승인 |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(context))
//!     .configure(configure_all_routes);
//! ```

use crate::errors::AppError;
use crate::handlers;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// JSON 본문 파싱 실패도 `ValidationError` 봉투로 응답하도록 `JsonConfig`를 함께 등록합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());

    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_doctor_routes(cfg);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("요청 본문 파싱 실패: {}", err);
        AppError::ValidationError(err.to_string()).into()
    })
}

/// 인증 관련 라우트를 설정합니다
///
/// ```bash
/// # 로그인 (리프레시 토큰은 Set-Cookie로 전달)
/// curl -i -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"a@x.com","password":"secret1"}'
///
/// # 토큰 갱신
/// curl -X POST http://localhost:8080/api/v1/auth/refresh \
///   --cookie "refreshToken=eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::verify_email)
            .service(handlers::auth::resend_verification)
            .service(handlers::auth::refresh)
            .service(handlers::auth::logout)
            .service(handlers::auth::get_current_user)
    );
}

/// 사용자 관리 라우트를 설정합니다
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::list_users)
            .service(handlers::users::update_verification_status)
            .service(handlers::users::update_user)
            .service(handlers::users::deactivate_user)
    );
}

fn configure_doctor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/doctors")
            .service(handlers::users::doctor_status)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "clinic_auth_backend",
///   "version": "0.1.0",
///   "timestamp": "2025-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
