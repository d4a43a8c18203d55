//! # Domain Models Module
//!
//! 영속되지 않는 도메인 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! - `entities` - MongoDB에 저장되는 `User`
//! - `models` - 요청 수명 동안만 존재하는 인증 정보와 토큰 값
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 요청에 부착되는 `AuthenticatedUser`, 라우트별 `AccessPolicy`
//! - [`token`] - `TokenPayload`, `TokenClaims`, `TokenPair`

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
