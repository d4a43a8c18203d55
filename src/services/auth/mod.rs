//! 인증 및 보안 서비스 모듈
//!
//! # Security
//!
//! - 액세스/리프레시 토큰은 서로 다른 HMAC-SHA256 비밀키로 서명
//! - 사용자당 유효한 리프레시 토큰은 최대 하나 (조건부 교체로 회전)
//! - 이메일 인증 토큰은 해시만 저장
//! - 존재하지 않는 이메일에도 bcrypt 검증을 수행하여 응답 시간 평준화

pub mod token_service;
pub mod email_verification;
pub mod auth_service;

pub use token_service::*;
pub use email_verification::*;
pub use auth_service::*;
