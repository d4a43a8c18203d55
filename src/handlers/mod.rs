//! # HTTP Request Handlers Module
//!
//! 요청 본문을 DTO로 받아 서비스에 위임하고, 결과를 `ApiResponse` 봉투로 감싸는 얇은 계층입니다.
//! 실패는 `AppError`로 그대로 전파되어 전역 에러 응답으로 변환됩니다.
//!
//! ```text
//! Handlers → Services → UserStore
//! ```
//!
//! 보호된 엔드포인트는 라우트 속성의 `wrap`으로 `AuthMiddleware` 정책을 선언합니다.
//!
//! ```rust,ignore
//! #[get("/me", wrap = "crate::middlewares::AuthMiddleware::required()")]
//! pub async fn get_current_user(
//!     context: web::Data<AppContext>,
//!     user: AuthenticatedUser,
//! ) -> Result<HttpResponse, AppError> {
//!     let me = context.auth.get_current_user(&user.id).await?;
//!     Ok(HttpResponse::Ok().json(ApiResponse::success("Current user", me)))
//! }
//! ```

pub mod auth;
pub mod users;
