//! 사용자 요청 DTO 모듈
//!
//! 모든 요청 DTO는 `validator::Validate`를 구현하며, 서비스 계층이
//! 비즈니스 규칙을 적용하기 전에 형식 검증을 수행합니다.
//! 검증 실패는 `AppError::ValidationError`로 변환되어 400으로 응답됩니다.

pub mod auth_request;
pub mod update_user;

pub use auth_request::{
    LoginRequest, RefreshTokenRequest, RegisterRequest, ResendVerificationRequest,
    VerifyEmailRequest,
};
pub use update_user::{UpdateUserRequest, UpdateVerificationStatusRequest};
