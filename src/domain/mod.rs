//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈로, 엔티티와 요청/응답 계약, 값 객체를 담습니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 영속 엔티티 (User, Role, VerificationStatus, UserPatch)
//! ├── dto       - API 요청/응답 (camelCase JSON)
//! └── models    - 인증 사용자, 접근 정책, 토큰 클레임
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db)
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
