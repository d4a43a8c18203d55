//! # 사용자 도메인 DTO
//!
//! ```text
//! users/
//! ├── request/   - 가입, 로그인, 인증, 갱신, 프로필 수정 요청
//! └── response/  - 정제된 사용자 정보와 토큰 응답
//! ```
//!
//! 요청 DTO는 camelCase JSON을 받아 `validator`로 형식을 검증하고,
//! 응답 DTO는 엔티티의 민감 필드를 제외한 camelCase JSON을 생성합니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
