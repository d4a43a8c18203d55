//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 코어의 모든 실패 모드를 열거형 변형으로 표현합니다.
//! 서비스는 타입이 있는 에러를 반환하고, 핸들러와 미들웨어는 이를 삼키지 않고
//! 그대로 전파하며, `actix_web::ResponseError` 구현이 단일 전역 핸들러로서
//! HTTP 상태 코드와 통일된 JSON 봉투로 변환합니다.
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Invalid credentials",
//!   "error": { "code": "INVALID_CREDENTIALS" },
//!   "stack": "InvalidCredentials"
//! }
//! ```
//!
//! `stack` 필드는 프로덕션이 아닌 환경에서만 포함됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `ValidationError`, `DuplicateEmail`, `InvalidOrExpiredToken` | 400 |
//! | `InvalidCredentials`, `Unauthorized`, `TokenExpired`, `TokenInvalid`, `MissingToken`, `InvalidRefreshToken` | 401 |
//! | `AccountDeactivated`, `EmailNotVerified`, `Forbidden`, `DoctorNotApproved` | 403 |
//! | `UserNotFound` | 404 |
//! | `ServiceUnavailable` | 503 |
//! | `EmailDeliveryFailed` | 502 |
//! | `DatabaseError`, `InternalError` | 500 |

use actix_web::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use crate::config::Environment;
use crate::domain::entities::users::user::VerificationStatus;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("{0}")]
    ValidationError(String),

    /// 이미 등록된 이메일 (400 Bad Request)
    #[error("Email already registered")]
    DuplicateEmail,

    /// 로그인 실패 (401)
    ///
    /// 존재하지 않는 이메일과 잘못된 비밀번호를 구분하지 않습니다.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 인증 헤더 누락/형식 오류, 사라진 사용자 (401)
    #[error("{0}")]
    Unauthorized(String),

    /// 서명은 맞지만 만료된 토큰 (401)
    #[error("Token expired")]
    TokenExpired,

    /// 서명 또는 형식이 잘못된 토큰 (401)
    #[error("Invalid token")]
    TokenInvalid,

    /// 리프레시 토큰이 제공되지 않음 (401)
    #[error("Refresh token is required")]
    MissingToken,

    /// 저장된 리프레시 토큰과 제시된 토큰이 다름 (401)
    ///
    /// 이미 회전된 토큰의 재사용, 로그아웃 이후의 재사용이 여기에 해당합니다.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// 비활성화된 계정 (403)
    #[error("Account is deactivated")]
    AccountDeactivated,

    /// 이메일 인증 전 로그인 시도 (403)
    #[error("Please verify your email before logging in")]
    EmailNotVerified,

    /// 역할/소유권/이메일 인증 정책 위반 (403)
    #[error("{0}")]
    Forbidden(String),

    /// 승인되지 않은 의사 계정 (403)
    #[error("Your doctor profile is not verified yet")]
    DoctorNotApproved(VerificationStatus),

    /// 사용자 없음 (404)
    #[error("User not found")]
    UserNotFound,

    /// 이메일 인증 토큰이 없거나 만료됨 (400)
    #[error("Invalid or expired verification token")]
    InvalidOrExpiredToken,

    /// 메일 발송 실패 (502)
    #[error("Failed to send verification email: {0}")]
    EmailDeliveryFailed(String),

    /// 저장소 타임아웃/네트워크 장애 (503, 재시도 가능)
    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트가 분기할 수 있는 고정 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::TokenInvalid => "TOKEN_INVALID",
            AppError::MissingToken => "MISSING_TOKEN",
            AppError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            AppError::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            AppError::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::DoctorNotApproved(_) => "DOCTOR_NOT_APPROVED",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::InvalidOrExpiredToken => "INVALID_OR_EXPIRED_TOKEN",
            AppError::EmailDeliveryFailed(_) => "EMAIL_DELIVERY_FAILED",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// 리프레시 쿠키를 지워야 하는 실패인지 여부
    ///
    /// 죽은 자격 증명을 클라이언트가 계속 재전송하지 않도록
    /// 만료/위조/회전된 리프레시 토큰에 대해서는 쿠키를 제거합니다.
    pub fn clears_refresh_cookie(&self) -> bool {
        matches!(
            self,
            AppError::TokenExpired
                | AppError::TokenInvalid
                | AppError::InvalidRefreshToken
                | AppError::AccountDeactivated
        )
    }

    fn data(&self) -> Option<Value> {
        match self {
            AppError::DoctorNotApproved(status) => {
                Some(json!({ "verificationStatus": status }))
            }
            _ => None,
        }
    }

    /// 에러 봉투 JSON 생성
    pub fn to_envelope(&self, environment: &Environment) -> Value {
        let mut error = json!({ "code": self.code() });
        if let Some(data) = self.data() {
            error["data"] = data;
        }

        let mut body = json!({
            "success": false,
            "message": self.to_string(),
            "error": error,
        });

        if *environment != Environment::Production {
            body["stack"] = Value::String(format!("{:?}", self));
        }

        body
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::DuplicateEmail
            | AppError::InvalidOrExpiredToken => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::Unauthorized(_)
            | AppError::TokenExpired
            | AppError::TokenInvalid
            | AppError::MissingToken
            | AppError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AppError::AccountDeactivated
            | AppError::EmailNotVerified
            | AppError::Forbidden(_)
            | AppError::DoctorNotApproved(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::EmailDeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 서버 로그에 기록하되 응답 본문은 동일한 봉투 형식을 유지합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패 [{}]: {}", self.code(), self);
        }

        actix_web::HttpResponse::build(status).json(self.to_envelope(&Environment::active()))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 `AppError::InternalError`로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_failures_map_to_401() {
        for error in [
            AppError::InvalidCredentials,
            AppError::TokenExpired,
            AppError::TokenInvalid,
            AppError::MissingToken,
            AppError::InvalidRefreshToken,
            AppError::Unauthorized("Not authorized".to_string()),
        ] {
            assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED, "{:?}", error);
        }
    }

    #[test]
    fn test_policy_failures_map_to_403() {
        for error in [
            AppError::AccountDeactivated,
            AppError::EmailNotVerified,
            AppError::Forbidden("admin only".to_string()),
            AppError::DoctorNotApproved(VerificationStatus::Pending),
        ] {
            assert_eq!(error.status_code(), StatusCode::FORBIDDEN, "{:?}", error);
        }
    }

    #[test]
    fn test_store_timeout_is_not_an_auth_failure() {
        let error = AppError::ServiceUnavailable("find_by_email timed out".to_string());
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.code(), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn test_envelope_hides_stack_in_production() {
        let body = AppError::InvalidCredentials.to_envelope(&Environment::Production);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid credentials");
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
        assert!(body.get("stack").is_none());

        let body = AppError::InvalidCredentials.to_envelope(&Environment::Development);
        assert!(body.get("stack").is_some());
    }

    #[test]
    fn test_doctor_not_approved_carries_status() {
        let body = AppError::DoctorNotApproved(VerificationStatus::Rejected)
            .to_envelope(&Environment::Production);
        assert_eq!(body["error"]["data"]["verificationStatus"], "rejected");
    }

    #[test]
    fn test_refresh_cookie_clearing_kinds() {
        assert!(AppError::TokenExpired.clears_refresh_cookie());
        assert!(AppError::InvalidRefreshToken.clears_refresh_cookie());
        assert!(!AppError::MissingToken.clears_refresh_cookie());
        assert!(!AppError::ServiceUnavailable("x".to_string()).clears_refresh_cookie());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }

    #[test]
    fn test_error_with_context_is_lazy() {
        let ok: Result<u8, &str> = Ok(7);
        let value = ok.with_context(|| panic!("context must not be built on success")).unwrap();
        assert_eq!(value, 7);

        let err: Result<u8, &str> = Err("boom");
        match err.with_context(|| format!("Failed to sign {} token", "access")) {
            Err(AppError::InternalError(msg)) => assert_eq!(msg, "Failed to sign access token: boom"),
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }
}
