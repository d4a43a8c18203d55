//! 인증 서비스
//!
//! 세션 상태 전이: `Anonymous → Authenticated → (Refreshed)* → LoggedOut`
//!
//! 리프레시 토큰을 발급하거나 회전하는 모든 전이는 저장소 쓰기를 정확히 한 번
//! 수행하며, 조건부 교체로 한 사용자에게 유효한 리프레시 토큰이 둘 이상
//! 존재하지 않도록 합니다.

use std::sync::Arc;
use validator::Validate;
use crate::core::clock::Clock;
use crate::domain::dto::users::request::{LoginRequest, RegisterRequest};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::users::user::{RefreshTokenGuard, Role, User, DEFAULT_REGISTRATION_ROLE};
use crate::domain::models::token::{TokenPair, TokenPayload};
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::users::UserStore;
use crate::services::auth::email_verification::EmailVerificationService;
use crate::services::auth::token_service::TokenService;
use crate::utils::string_utils::{clean_optional_string, normalize_email, validate_required_string};

/// 로그인 결과
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    verification: Arc<EmailVerificationService>,
    clock: Arc<dyn Clock>,
    bcrypt_cost: u32,
    /// 존재하지 않는 이메일에도 같은 비용의 bcrypt 검증을 수행하기 위한 해시
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
        verification: Arc<EmailVerificationService>,
        clock: Arc<dyn Clock>,
        bcrypt_cost: u32,
    ) -> AppResult<Self> {
        let dummy_hash = bcrypt::hash("timing-equalizer", bcrypt_cost)
            .context("Password hashing failed")?;

        Ok(Self { store, tokens, verification, clock, bcrypt_cost, dummy_hash })
    }

    /// 회원가입
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 형식 오류
    /// * `AppError::DuplicateEmail` - 이미 등록된 이메일
    /// * `AppError::EmailDeliveryFailed` - 인증 메일 발송 실패 (계정은 생성됨)
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let email = normalize_email(&request.email);
        let first_name = validate_required_string(&request.first_name, "First name")?;
        let last_name = validate_required_string(&request.last_name, "Last name")?;
        let phone = clean_optional_string(request.phone);
        let role = request.role.unwrap_or(DEFAULT_REGISTRATION_ROLE);
        if role == Role::Admin {
            log::warn!("⚠️ 관리자 역할 자체 가입 요청: {}", email);
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .context("Password hashing failed")?;

        let mut user = User::new_local(
            email,
            password_hash,
            first_name,
            last_name,
            phone,
            role,
            self.clock.now_bson(),
        );

        let issued = if self.verification.required() {
            let token = self.verification.generate();
            user.email_verification_token = Some(token.hash.clone());
            user.email_verification_expires = Some(token.expires);
            Some(token)
        } else {
            user.is_email_verified = true;
            None
        };

        let created = self.store.create(user).await?;
        log::info!("✅ 회원가입 완료 - ID: {}, 역할: {}", created.id_string().unwrap_or_default(), created.role);

        if let Some(token) = issued {
            self.verification.send(&created, &token.raw).await?;
        }

        Ok(created)
    }

    /// 로컬 로그인
    ///
    /// 검사 순서: 자격 증명 → 활성 상태 → 이메일 인증.
    /// 존재하지 않는 이메일과 잘못된 비밀번호는 같은 에러를 반환합니다.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthSession> {
        request.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let email = normalize_email(&request.email);
        let user = match self.store.find_by_email(&email).await? {
            Some(user) if user.can_authenticate_with_password() => user,
            _ => {
                let _ = bcrypt::verify(&request.password, &self.dummy_hash);
                log::warn!("🔒 로그인 실패 - 알 수 없는 계정");
                return Err(AppError::InvalidCredentials);
            }
        };

        let password_hash = user.password_hash.as_deref().unwrap_or_default();
        let is_valid = bcrypt::verify(&request.password, password_hash)
            .context("Password verification failed")?;

        if !is_valid {
            log::warn!("🔒 로그인 실패 - 비밀번호 불일치: {}", user.id_string().unwrap_or_default());
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            log::warn!("🔒 비활성 계정 로그인 시도: {}", user.id_string().unwrap_or_default());
            return Err(AppError::AccountDeactivated);
        }

        if self.verification.required() && !user.is_email_verified {
            return Err(AppError::EmailNotVerified);
        }

        let id = user.id_string()
            .ok_or_else(|| AppError::InternalError("User has no id".to_string()))?;
        let tokens = self.tokens.issue_token_pair(&TokenPayload::from_user(&user))?;

        let stored = self.store
            .swap_refresh_token(&id, RefreshTokenGuard::Any, Some(tokens.refresh_token.clone()))
            .await?;
        if !stored {
            return Err(AppError::InvalidCredentials);
        }

        log::info!("✅ 로그인 성공 - ID: {}", id);
        Ok(AuthSession { user, tokens })
    }

    /// 이메일 인증 완료
    pub async fn verify_email(&self, token: &str) -> AppResult<User> {
        let user = self.verification.verify(token).await?;
        log::info!("✅ 이메일 인증 완료 - ID: {}", user.id_string().unwrap_or_default());
        Ok(user)
    }

    /// 인증 메일 재발송
    ///
    /// 알 수 없는 이메일이나 이미 인증된 계정에 대해서는 아무것도 하지 않습니다.
    pub async fn resend_verification(&self, email: &str) -> AppResult<()> {
        if !self.verification.required() {
            return Ok(());
        }

        match self.store.find_by_email(&normalize_email(email)).await? {
            Some(user) if !user.is_email_verified && user.is_active => {
                self.verification.reissue(&user).await
            }
            _ => {
                log::debug!("인증 메일 재발송 생략");
                Ok(())
            }
        }
    }

    /// 리프레시 토큰 회전
    ///
    /// 검사 순서: 누락 → 서명/만료 → 저장된 토큰 일치 → 활성 상태 → 조건부 교체.
    /// 이미 회전된 토큰의 재사용은 `InvalidRefreshToken`입니다.
    pub async fn refresh(&self, presented: Option<&str>) -> AppResult<TokenPair> {
        let presented = presented
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::MissingToken)?;

        let payload = self.tokens.verify_refresh_token(presented)?;

        let user = self.store
            .find_by_id(&payload.id)
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;

        if user.refresh_token.as_deref() != Some(presented) {
            log::warn!("🚨 회전된 리프레시 토큰 재사용 감지 - ID: {}", payload.id);
            return Err(AppError::InvalidRefreshToken);
        }

        if !user.is_active {
            log::warn!("🔒 비활성 계정 토큰 갱신 시도: {}", payload.id);
            return Err(AppError::AccountDeactivated);
        }

        let tokens = self.tokens.issue_token_pair(&TokenPayload::from_user(&user))?;

        let rotated = self.store
            .swap_refresh_token(
                &payload.id,
                RefreshTokenGuard::Matches(presented.to_string()),
                Some(tokens.refresh_token.clone()),
            )
            .await?;

        if !rotated {
            log::warn!("🚨 동시 갱신 경합에서 패배한 리프레시 토큰 - ID: {}", payload.id);
            return Err(AppError::InvalidRefreshToken);
        }

        log::debug!("리프레시 토큰 회전 완료 - ID: {}", payload.id);
        Ok(tokens)
    }

    /// 로그아웃
    ///
    /// 저장된 토큰과 정확히 일치할 때만 제거합니다. 그 외에는 아무것도 하지 않으며
    /// 반복 호출해도 항상 성공합니다. 저장소 장애도 호출자에게 전파하지 않습니다.
    pub async fn logout(&self, user_id: &str, presented: Option<&str>) {
        let Some(token) = presented.map(str::trim).filter(|t| !t.is_empty()) else {
            log::info!("👋 로그아웃 - ID: {}, 제시된 토큰 없음", user_id);
            return;
        };

        match self.store
            .swap_refresh_token(user_id, RefreshTokenGuard::Matches(token.to_string()), None)
            .await
        {
            Ok(cleared) => log::info!("👋 로그아웃 - ID: {}, 토큰 제거: {}", user_id, cleared),
            Err(e) => log::warn!("⚠️ 로그아웃 중 토큰 제거 실패 - ID: {}: {}", user_id, e),
        }
    }

    /// 현재 사용자 조회
    pub async fn get_current_user(&self, user_id: &str) -> AppResult<UserResponse> {
        self.store
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or(AppError::UserNotFound)
    }
}
