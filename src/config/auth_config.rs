//! # Authentication Configuration Module
//!
//! JWT 토큰, 리프레시 쿠키, 이메일 인증, 메일 발송 관련 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정 (프로덕션)
//!
//! ```bash
//! export JWT_ACCESS_SECRET="access-secret"
//! export JWT_REFRESH_SECRET="a-different-refresh-secret"
//! export JWT_ACCESS_EXPIRES_MINUTES="15"
//! export JWT_REFRESH_EXPIRES_DAYS="7"
//! ```
//!
//! ## 이메일 인증 / 메일 발송
//!
//! ```bash
//! export REQUIRE_EMAIL_VERIFICATION="true"
//! export EMAIL_VERIFICATION_TTL_HOURS="24"
//! export FRONTEND_URL="https://clinic.example.com"
//! export SENDGRID_API_KEY="SG.xxxxx"
//! export SENDGRID_FROM_EMAIL="no-reply@clinic.example.com"
//! export APP_NAME="Alamany Dental Clinic"
//! export TEMPLATE_ID="d-xxxxxxxx"
//! ```

use std::env;
use chrono::Duration;
use crate::config::Environment;
use crate::errors::AppError;

/// 리프레시 토큰 쿠키 이름
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

const DEV_ACCESS_SECRET: &str = "dev-access-secret-change-me";
const DEV_REFRESH_SECRET: &str = "dev-refresh-secret-change-me";

/// JWT 서명 설정
///
/// 액세스/리프레시 토큰은 서로 다른 비밀키와 수명을 사용합니다.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtConfig {
    /// 환경 변수에서 JWT 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 프로덕션에서 비밀키가 없거나 두 비밀키가 같은 경우
    pub fn from_env() -> Result<Self, AppError> {
        let environment = Environment::current();

        let access_secret = Self::secret_or_default("JWT_ACCESS_SECRET", DEV_ACCESS_SECRET, &environment)?;
        let refresh_secret = Self::secret_or_default("JWT_REFRESH_SECRET", DEV_REFRESH_SECRET, &environment)?;

        if access_secret == refresh_secret {
            return Err(AppError::InternalError(
                "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ".to_string(),
            ));
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl: Duration::minutes(Self::access_expires_minutes()),
            refresh_ttl: Duration::days(Self::refresh_expires_days()),
        })
    }

    fn secret_or_default(key: &str, fallback: &str, environment: &Environment) -> Result<String, AppError> {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ if environment.is_production() => {
                Err(AppError::InternalError(format!("{} must be set in production", key)))
            }
            _ => {
                log::warn!("{} not set, using development default (not secure for production!)", key);
                Ok(fallback.to_string())
            }
        }
    }

    /// 액세스 토큰 수명(분). 기본값 15
    pub fn access_expires_minutes() -> i64 {
        env::var("JWT_ACCESS_EXPIRES_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v > 0)
            .unwrap_or(15)
    }

    /// 리프레시 토큰 수명(일). 기본값 7
    pub fn refresh_expires_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRES_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v > 0)
            .unwrap_or(7)
    }
}

/// 이메일 인증 정책 설정
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// false이면 가입 즉시 로그인 가능 (인증 메일 없음)
    pub require_email_verification: bool,
    /// 인증 토큰 유효 시간
    pub token_ttl: Duration,
    /// 인증 링크의 기준 URL
    pub frontend_url: String,
}

impl VerificationConfig {
    pub fn from_env() -> Self {
        let require_email_verification = env::var("REQUIRE_EMAIL_VERIFICATION")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(true);

        let ttl_hours = env::var("EMAIL_VERIFICATION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(24);

        let frontend_url = env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            require_email_verification,
            token_ttl: Duration::hours(ttl_hours),
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }
}

/// SendGrid 메일 발송 설정
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// 없으면 개발용 로깅 메일러가 사용됩니다
    pub api_key: Option<String>,
    pub from_email: String,
    pub app_name: String,
    pub verification_template_id: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("SENDGRID_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            from_email: env::var("SENDGRID_FROM_EMAIL")
                .unwrap_or_else(|_| "no-reply@localhost".to_string()),
            app_name: env::var("APP_NAME")
                .unwrap_or_else(|_| "Alamany Dental Clinic".to_string()),
            verification_template_id: env::var("TEMPLATE_ID").unwrap_or_default(),
        }
    }
}
