//! 인증 요청관련 DTO
//!
//! 가입, 로그인, 이메일 인증, 토큰 갱신 요청 본문을 매핑합니다.
//! JSON 필드명은 camelCase 입니다.
use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::entities::users::user::Role;
use crate::utils::string_utils::deserialize_optional_string;

/// 회원가입 요청 구조체
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,

    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone: Option<String>,

    /// 생략 시 `DEFAULT_REGISTRATION_ROLE`
    #[serde(default)]
    pub role: Option<Role>,
}

/// 로컬 로그인 요청 구조체
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// 이메일 인증 요청 구조체
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Verification token is required"))]
    pub token: String,
}

/// 인증 메일 재발송 요청 구조체
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
}

/// 리프레시 토큰 요청 구조체
///
/// 쿠키가 없는 클라이언트를 위한 본문 대체 경로입니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// 공백만 있는 문자열을 거부합니다.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
