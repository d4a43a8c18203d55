//! 메일 발송 협력자
//!
//! 인증 코어는 `Mailer::send(to, template_id, variables)`만 사용합니다.
//! 실패는 `EmailDeliveryFailed`로 전파됩니다.
//!
//! - [`SendGridMailer`] - SendGrid v3 동적 템플릿 발송
//! - [`LogMailer`] - API 키가 없는 개발 환경용, 링크를 로그로만 남김

use async_trait::async_trait;
use serde_json::{json, Value};
use crate::config::MailConfig;
use crate::errors::{AppError, AppResult};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// 템플릿 메일 한 통
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to: String,
    pub template_id: String,
    pub variables: Value,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}

/// SendGrid 동적 템플릿 메일러
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: String,
    from_email: String,
    app_name: String,
}

impl SendGridMailer {
    pub fn new(api_key: String, config: &MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from_email: config.from_email.clone(),
            app_name: config.app_name.clone(),
        }
    }

    fn request_body(&self, message: &MailMessage) -> Value {
        json!({
            "personalizations": [{
                "to": [{ "email": message.to }],
                "dynamic_template_data": message.variables,
            }],
            "from": { "email": self.from_email, "name": self.app_name },
            "template_id": message.template_id,
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let response = self.client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(&message))
            .send()
            .await
            .map_err(|e| AppError::EmailDeliveryFailed(format!("SendGrid request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ SendGrid 발송 실패 ({}): {}", status, error_text);
            return Err(AppError::EmailDeliveryFailed(format!("SendGrid responded with {}", status)));
        }

        log::info!("📧 메일 발송 완료: template={}", message.template_id);
        Ok(())
    }
}

/// 개발용 로깅 메일러
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        log::info!(
            "📧 [dev] 메일 발송 생략 - to: {}, template: {}, variables: {}",
            message.to,
            message.template_id,
            message.variables
        );
        Ok(())
    }
}
