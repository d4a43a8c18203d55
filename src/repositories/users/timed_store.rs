//! 저장소 호출 타임아웃 데코레이터
//!
//! 모든 호출을 `actix_web::rt::time::timeout`으로 감쌉니다. 시간 초과는
//! `ServiceUnavailable`로 보고되며 인증 실패로 오인되지 않습니다.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::{RefreshTokenGuard, User, UserPatch};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::user_store::UserStore;

pub struct TimedUserStore {
    inner: Arc<dyn UserStore>,
    timeout: Duration,
}

impl TimedUserStore {
    pub fn new(inner: Arc<dyn UserStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>> + Send,
    {
        match actix_web::rt::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("⏱️ 저장소 호출 시간 초과: {} ({}ms)", operation, self.timeout.as_millis());
                Err(AppError::ServiceUnavailable(format!("{} timed out", operation)))
            }
        }
    }
}

#[async_trait]
impl UserStore for TimedUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.bounded("find_by_id", self.inner.find_by_id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.bounded("find_by_email", self.inner.find_by_email(email)).await
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        self.bounded("list", self.inner.list()).await
    }

    async fn create(&self, user: User) -> AppResult<User> {
        self.bounded("create", self.inner.create(user)).await
    }

    async fn apply_patch(&self, id: &str, patch: UserPatch, now: DateTime) -> AppResult<Option<User>> {
        self.bounded("apply_patch", self.inner.apply_patch(id, patch, now)).await
    }

    async fn swap_refresh_token(
        &self,
        id: &str,
        expected: RefreshTokenGuard,
        new_token: Option<String>,
    ) -> AppResult<bool> {
        self.bounded("swap_refresh_token", self.inner.swap_refresh_token(id, expected, new_token)).await
    }

    async fn consume_verification_token(&self, token_hash: &str, now: DateTime) -> AppResult<Option<User>> {
        self.bounded("consume_verification_token", self.inner.consume_verification_token(token_hash, now)).await
    }

    async fn set_verification_token(
        &self,
        id: &str,
        token_hash: &str,
        expires: DateTime,
        now: DateTime,
    ) -> AppResult<bool> {
        self.bounded(
            "set_verification_token",
            self.inner.set_verification_token(id, token_hash, expires, now),
        )
        .await
    }
}
