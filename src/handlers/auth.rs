//! Authentication HTTP Handlers
//!
//! 가입, 로그인, 이메일 인증, 토큰 갱신, 로그아웃 엔드포인트입니다.
//!
//! # Refresh Cookie
//!
//! 리프레시 토큰은 응답 본문에 싣지 않고 `refreshToken` http-only 쿠키로만 전달합니다.
//! 갱신 요청은 쿠키를 우선 사용하고, 쿠키가 없으면 본문의 `refreshToken`을 사용합니다.
//! 만료/위조/회전된 토큰으로 갱신에 실패하면 쿠키를 제거합니다.
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{get, post, web, HttpRequest, HttpResponse, ResponseError};
use validator::Validate;
use crate::config::REFRESH_COOKIE_NAME;
use crate::core::registry::AppContext;
use crate::domain::dto::users::request::{
    LoginRequest, RefreshTokenRequest, RegisterRequest, ResendVerificationRequest, VerifyEmailRequest,
};
use crate::domain::dto::users::response::{LoginResponse, RefreshResponse, UserResponse};
use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::{AppError, ErrorContext};

/// 새 리프레시 토큰 쿠키
fn refresh_cookie(context: &AppContext, token: String) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE_NAME, token)
        .http_only(true)
        .secure(context.settings.environment.is_production())
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(CookieDuration::seconds(context.tokens.refresh_ttl().num_seconds()))
        .finish()
}

/// 리프레시 토큰 쿠키 제거용 쿠키
fn removal_cookie(context: &AppContext) -> Cookie<'static> {
    let mut cookie = Cookie::build(REFRESH_COOKIE_NAME, "")
        .http_only(true)
        .secure(context.settings.environment.is_production())
        .same_site(SameSite::Strict)
        .path("/")
        .finish();
    cookie.make_removal();
    cookie
}

/// 쿠키 우선, 없으면 본문에서 리프레시 토큰을 꺼냅니다.
fn presented_refresh_token(req: &HttpRequest, body: Option<web::Json<RefreshTokenRequest>>) -> Option<String> {
    req.cookie(REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| body.and_then(|b| b.into_inner().refresh_token))
}

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/register`
#[post("/register")]
pub async fn register(
    context: web::Data<AppContext>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = context.auth.register(payload.into_inner()).await?;

    let message = if context.verification.required() {
        "Registration successful. Please check your email to verify your account."
    } else {
        "User registered successfully"
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(message, UserResponse::from(user))))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn login(
    context: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let session = context.auth.login(payload.into_inner()).await?;

    let body = LoginResponse::new(session.user, session.tokens.access_token, session.tokens.expires_in);

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&context, session.tokens.refresh_token))
        .json(ApiResponse::success("Login successful", body)))
}

/// 이메일 인증 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/verify-email`
#[post("/verify-email")]
pub async fn verify_email(
    context: web::Data<AppContext>,
    payload: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = context.auth.verify_email(&payload.token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Email verified successfully", UserResponse::from(user))))
}

/// 인증 메일 재발송 핸들러
///
/// 계정 존재 여부와 관계없이 같은 응답을 돌려줍니다.
///
/// # Endpoint
/// `POST /api/v1/auth/resend-verification`
#[post("/resend-verification")]
pub async fn resend_verification(
    context: web::Data<AppContext>,
    payload: web::Json<ResendVerificationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    context.auth.resend_verification(&payload.email).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "If the account exists and is not yet verified, a verification email has been sent",
    )))
}

/// 토큰 갱신 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    context: web::Data<AppContext>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let presented = presented_refresh_token(&req, body);

    match context.auth.refresh(presented.as_deref()).await {
        Ok(tokens) => {
            let body = RefreshResponse::new(tokens.access_token, tokens.expires_in);
            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie(&context, tokens.refresh_token))
                .json(ApiResponse::success("Token refreshed", body)))
        }
        Err(err) if err.clears_refresh_cookie() => {
            let mut response = err.error_response();
            response
                .add_cookie(&removal_cookie(&context))
                .context("Failed to clear refresh cookie")?;
            Ok(response)
        }
        Err(err) => Err(err),
    }
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/logout`
#[post("/logout", wrap = "crate::middlewares::AuthMiddleware::required()")]
pub async fn logout(
    req: HttpRequest,
    context: web::Data<AppContext>,
    user: AuthenticatedUser,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let presented = presented_refresh_token(&req, body);
    context.auth.logout(&user.id, presented.as_deref()).await;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(&context))
        .json(ApiResponse::message("Logged out successfully")))
}

/// 현재 사용자 정보 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/auth/me`
#[get("/me", wrap = "crate::middlewares::AuthMiddleware::required()")]
pub async fn get_current_user(
    context: web::Data<AppContext>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let me = context.auth.get_current_user(&user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Current user", me)))
}
