//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 계층과 서비스 계층 사이에서 주고받는 요청/응답 객체를 정의합니다.
//!
//! ## 모듈 구성
//!
//! - [`users`] - 인증 및 사용자 관리 요청/응답
//! - [`api_response`] - 성공 응답 공통 봉투 `{ success, message, data? }`
//!
//! 실패 응답 봉투는 `AppError`의 `ResponseError` 구현이 생성합니다.

pub mod users;
pub mod api_response;

pub use users::*;
pub use api_response::ApiResponse;
