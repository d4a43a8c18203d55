//! 이메일 인증 토큰 발급/검증
//!
//! 원문 토큰은 256비트 난수(base64url)이며 메일로만 전달됩니다.
//! 저장소에는 SHA-256 해시(hex)와 만료 시각만 남습니다.

use std::sync::Arc;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use mongodb::bson;
use rand::{rngs::OsRng, RngCore};
use serde_json::json;
use sha2::{Digest, Sha256};
use crate::config::VerificationConfig;
use crate::core::clock::{to_bson, Clock};
use crate::domain::entities::users::user::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use crate::services::mail::{MailMessage, Mailer};

/// 새로 발급된 인증 토큰
#[derive(Debug, Clone)]
pub struct VerificationToken {
    pub raw: String,
    pub hash: String,
    pub expires: bson::DateTime,
}

pub struct EmailVerificationService {
    store: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    config: VerificationConfig,
    template_id: String,
}

impl EmailVerificationService {
    pub fn new(
        store: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        config: VerificationConfig,
        template_id: String,
    ) -> Self {
        Self { store, mailer, clock, config, template_id }
    }

    /// 가입 후 이메일 인증이 필요한 배포인지 여부
    pub fn required(&self) -> bool {
        self.config.require_email_verification
    }

    pub fn hash_token(raw: &str) -> String {
        format!("{:x}", Sha256::digest(raw.as_bytes()))
    }

    pub fn generate(&self) -> VerificationToken {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let raw = URL_SAFE_NO_PAD.encode(bytes);

        VerificationToken {
            hash: Self::hash_token(&raw),
            expires: to_bson(self.clock.now() + self.config.token_ttl),
            raw,
        }
    }

    pub fn verification_link(&self, raw: &str) -> String {
        format!(
            "{}/verify-email?token={}",
            self.config.frontend_url,
            urlencoding::encode(raw)
        )
    }

    /// 인증 메일 발송
    pub async fn send(&self, user: &User, raw: &str) -> AppResult<()> {
        let message = MailMessage {
            to: user.email.clone(),
            template_id: self.template_id.clone(),
            variables: json!({
                "name": user.first_name,
                "button_url": self.verification_link(raw),
            }),
        };

        self.mailer.send(message).await
    }

    /// 기존 토큰을 새 토큰으로 덮어쓰고 메일을 다시 보냅니다.
    pub async fn reissue(&self, user: &User) -> AppResult<()> {
        let id = user.id_string()
            .ok_or_else(|| AppError::InternalError("User has no id".to_string()))?;
        let token = self.generate();

        let updated = self.store
            .set_verification_token(&id, &token.hash, token.expires, self.clock.now_bson())
            .await?;
        if !updated {
            return Err(AppError::UserNotFound);
        }

        self.send(user, &token.raw).await
    }

    /// 제시된 원문 토큰을 소비하고 인증 완료된 사용자를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidOrExpiredToken` - 해시 불일치, 만료, 이미 사용됨
    pub async fn verify(&self, raw: &str) -> AppResult<User> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::InvalidOrExpiredToken);
        }

        self.store
            .consume_verification_token(&Self::hash_token(raw), self.clock.now_bson())
            .await?
            .ok_or(AppError::InvalidOrExpiredToken)
    }
}
