//! 미들웨어 모듈
//!
//! 보호된 라우트는 `AuthMiddleware`로 감싸고, 라우트 등록 시점에 정책을 고정합니다.
//!
//! ```text
//! authenticate → authorize(roles) → require_verified_email → require_doctor_approval → handler
//! ```
//!
//! 각 단계는 [`access`]의 독립 함수로도 호출할 수 있으며, 실패는 모두 `AppError`로
//! 표현되어 전역 에러 응답 형식으로 렌더링됩니다.
//!
//! ```rust,ignore
//! web::resource("/doctors/me/status")
//!     .wrap(
//!         AuthMiddleware::required()
//!             .roles(&[Role::Doctor])
//!             .verified_email()
//!             .doctor_approval(),
//!     )
//!     .route(web::get().to(doctor_status))
//! ```

pub mod access;
pub mod auth_middleware;
mod auth_inner;

pub use access::*;
pub use auth_middleware::AuthMiddleware;
