//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티와 허용 목록 기반 패치 타입을 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::{User, Role};
//!
//! let user = User::new_local(
//!     "a@x.com".to_string(),
//!     password_hash,
//!     "A".to_string(),
//!     "B".to_string(),
//!     None,
//!     Role::Patient,
//!     clock.now_bson(),
//! );
//! ```

pub mod user;
