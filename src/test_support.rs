//! 테스트 전용 협력자
//!
//! 메모리 저장소, 기록용 메일러, 수동 시계와 이를 조합한 `AppContext` 빌더입니다.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::{self, oid::ObjectId};
use crate::config::{Environment, JwtConfig, MailConfig, VerificationConfig};
use crate::core::clock::Clock;
use crate::core::registry::{AppContext, AppSettings};
use crate::domain::entities::users::user::{RefreshTokenGuard, User, UserPatch};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use crate::services::mail::{MailMessage, Mailer};

/// 메모리 기반 `UserStore`
///
/// 하나의 뮤텍스로 모든 연산을 직렬화하므로 조건부 교체가 원자적입니다.
/// `with_delay`는 각 호출 앞에 지연을 넣어 경합과 타임아웃을 재현합니다.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    delay: Duration,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { users: Mutex::new(Vec::new()), delay }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            actix_web::rt::time::sleep(self.delay).await;
        }
    }

    fn with_users<T>(&self, f: impl FnOnce(&mut Vec<User>) -> T) -> T {
        let mut users = self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut users)
    }

    /// 테스트에서 저장된 원본 문서를 직접 확인할 때 사용
    pub fn snapshot(&self, email: &str) -> Option<User> {
        self.with_users(|users| users.iter().find(|u| u.email == email).cloned())
    }

    /// 테스트에서 저장된 문서를 직접 조작할 때 사용
    pub fn modify(&self, email: &str, f: impl FnOnce(&mut User)) {
        self.with_users(|users| {
            if let Some(user) = users.iter_mut().find(|u| u.email == email) {
                f(user);
            }
        })
    }
}

fn matches_id(user: &User, id: &str) -> bool {
    user.id.map(|oid| oid.to_hex() == id).unwrap_or(false)
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.pause().await;
        Ok(self.with_users(|users| users.iter().find(|u| matches_id(u, id)).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.pause().await;
        Ok(self.with_users(|users| users.iter().find(|u| u.email == email).cloned()))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        self.pause().await;
        Ok(self.with_users(|users| users.iter().rev().cloned().collect()))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        self.pause().await;
        self.with_users(|users| {
            if users.iter().any(|u| u.email == user.email) {
                return Err(AppError::DuplicateEmail);
            }
            user.id = Some(ObjectId::new());
            users.push(user.clone());
            Ok(user)
        })
    }

    async fn apply_patch(&self, id: &str, patch: UserPatch, now: bson::DateTime) -> AppResult<Option<User>> {
        self.pause().await;
        self.with_users(|users| {
            if let Some(email) = &patch.email {
                if users.iter().any(|u| &u.email == email && !matches_id(u, id)) {
                    return Err(AppError::DuplicateEmail);
                }
            }
            Ok(users.iter_mut().find(|u| matches_id(u, id)).map(|user| {
                patch.apply_to(user, now);
                user.clone()
            }))
        })
    }

    async fn swap_refresh_token(
        &self,
        id: &str,
        expected: RefreshTokenGuard,
        new_token: Option<String>,
    ) -> AppResult<bool> {
        self.pause().await;
        Ok(self.with_users(|users| match users.iter_mut().find(|u| matches_id(u, id)) {
            Some(user) if expected.admits(user.refresh_token.as_deref()) => {
                user.refresh_token = new_token;
                true
            }
            _ => false,
        }))
    }

    async fn consume_verification_token(&self, token_hash: &str, now: bson::DateTime) -> AppResult<Option<User>> {
        self.pause().await;
        Ok(self.with_users(|users| {
            users
                .iter_mut()
                .find(|u| {
                    u.email_verification_token.as_deref() == Some(token_hash)
                        && u.email_verification_expires.map(|exp| exp > now).unwrap_or(false)
                })
                .map(|user| {
                    user.is_email_verified = true;
                    user.email_verification_token = None;
                    user.email_verification_expires = None;
                    user.updated_at = now;
                    user.clone()
                })
        }))
    }

    async fn set_verification_token(
        &self,
        id: &str,
        token_hash: &str,
        expires: bson::DateTime,
        now: bson::DateTime,
    ) -> AppResult<bool> {
        self.pause().await;
        Ok(self.with_users(|users| match users.iter_mut().find(|u| matches_id(u, id)) {
            Some(user) => {
                user.email_verification_token = Some(token_hash.to_string());
                user.email_verification_expires = Some(expires);
                user.updated_at = now;
                true
            }
            None => false,
        }))
    }
}

/// 수동으로 진행시키는 시계
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).single().unwrap_or_else(Utc::now);
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 발송 요청을 기록하는 메일러
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항상 발송에 실패하는 메일러
    pub fn failing() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail: true }
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// 마지막 메일의 인증 링크에서 원문 토큰을 꺼냅니다.
    pub fn last_verification_token(&self) -> Option<String> {
        let sent = self.sent();
        let url = sent.last()?.variables.get("button_url")?.as_str()?.to_string();
        let encoded = url.split("token=").nth(1)?;
        urlencoding::decode(encoded).ok().map(|t| t.into_owned())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        if self.fail {
            return Err(AppError::EmailDeliveryFailed("mail provider rejected the request".to_string()));
        }
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).push(message);
        Ok(())
    }
}

pub fn test_settings(require_email_verification: bool) -> AppSettings {
    AppSettings {
        environment: Environment::Test,
        bcrypt_cost: 4,
        jwt: JwtConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_ttl: chrono::Duration::minutes(15),
            refresh_ttl: chrono::Duration::days(7),
        },
        verification: VerificationConfig {
            require_email_verification,
            token_ttl: chrono::Duration::hours(24),
            frontend_url: "http://localhost:3000".to_string(),
        },
        mail: MailConfig {
            api_key: None,
            from_email: "no-reply@localhost".to_string(),
            app_name: "Alamany Dental Clinic".to_string(),
            verification_template_id: "d-test".to_string(),
        },
    }
}

/// 테스트 협력자 묶음
pub struct TestHarness {
    pub context: AppContext,
    pub store: Arc<InMemoryUserStore>,
    pub mailer: Arc<RecordingMailer>,
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    pub fn new(require_email_verification: bool) -> Self {
        Self::with_mailer(require_email_verification, RecordingMailer::new())
    }

    pub fn with_mailer(require_email_verification: bool, mailer: RecordingMailer) -> Self {
        Self::with_store(require_email_verification, mailer, InMemoryUserStore::new())
    }

    pub fn with_store(require_email_verification: bool, mailer: RecordingMailer, store: InMemoryUserStore) -> Self {
        let store = Arc::new(store);
        let mailer = Arc::new(mailer);
        let clock = Arc::new(ManualClock::new());
        let context = AppContext::new(
            test_settings(require_email_verification),
            store.clone(),
            mailer.clone(),
            clock.clone(),
        )
        .expect("test context");

        Self { context, store, mailer, clock }
    }
}
