//! # 사용자 관련 응답 DTO 모듈
//!
//! 비즈니스 로직 처리 결과를 클라이언트에게 전달하는 응답 객체들입니다.
//!
//! ## 데이터 은닉
//!
//! `UserResponse`는 엔티티에서 명시적으로 필드를 골라 담습니다.
//! 비밀번호 해시, 리프레시 토큰, 이메일 인증 토큰은 구조적으로 포함될 수 없습니다.
//!
//! ## 응답 DTO
//!
//! - `UserResponse` - 표준 사용자 정보 (프로필 조회, 목록, 가입 결과)
//! - `LoginResponse` - 사용자 정보 + 액세스 토큰
//! - `RefreshResponse` - 회전된 액세스 토큰

pub mod user_response;

pub use user_response::{LoginResponse, RefreshResponse, UserResponse};
