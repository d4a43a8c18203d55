//! 치과 클리닉 인증 백엔드
//!
//! 가입, 이메일 인증, 로그인, 리프레시 토큰 회전, 로그아웃과
//! 역할/인증/의사 승인 기반 접근 제어를 제공하는 actix-web 서비스입니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware 정책
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답, 리프레시 쿠키
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← AuthService, TokenService, UserService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    UserStore    │ ← 조건부 업데이트, 호출별 타임아웃
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │
//! └─────────────────┘
//! ```
//!
//! 모든 컴포넌트는 시작 시 [`core::registry::AppContext`]가 한 번 구성하며
//! `web::Data`로 핸들러와 미들웨어에 전달됩니다.

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

#[cfg(test)]
pub(crate) mod test_support;
