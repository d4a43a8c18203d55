//! # 사용자 관리 서비스 구현
//!
//! 관리자 화면과 본인 프로필 수정에서 사용하는 사용자 관리 로직입니다.
//!
//! ## 권한 모델
//!
//! | 작업 | 허용 대상 |
//! |------|-----------|
//! | 목록 조회 | 관리자 (라우트 정책) |
//! | 프로필 수정 | 본인 또는 관리자 |
//! | 비활성화 | 관리자 (라우트 정책) |
//! | 의사 심사 상태 변경 | 관리자 (라우트 정책) |
//!
//! 계정은 하드 삭제하지 않습니다. 비활성화된 계정은 로그인과 토큰 갱신이 모두 거부됩니다.

use std::sync::Arc;
use validator::Validate;
use crate::core::clock::Clock;
use crate::domain::dto::users::request::UpdateUserRequest;
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::users::user::{UserPatch, VerificationStatus};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use crate::services::auth::EmailVerificationService;
use crate::utils::string_utils::normalize_email;

pub struct UserService {
    store: Arc<dyn UserStore>,
    verification: Arc<EmailVerificationService>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        verification: Arc<EmailVerificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, verification, clock }
    }

    /// 전체 사용자 목록 (최신 가입순)
    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.store.list().await?;
        log::debug!("사용자 목록 조회: {}명", users.len());
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 프로필 수정
    ///
    /// 이메일이 바뀌면 인증 상태를 초기화하고, 인증이 필요한 배포에서는
    /// 새 주소로 인증 메일을 보냅니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Forbidden` - 본인도 관리자도 아님
    /// * `AppError::ValidationError` - 변경할 필드가 없거나 형식 오류
    /// * `AppError::UserNotFound` - 대상 없음
    /// * `AppError::DuplicateEmail` - 다른 계정이 사용 중인 이메일
    pub async fn update_user(
        &self,
        actor: &AuthenticatedUser,
        id: &str,
        request: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        if actor.id != id && !actor.is_admin() {
            log::warn!("🔒 타인 프로필 수정 시도 - 요청자: {}, 대상: {}", actor.id, id);
            return Err(AppError::Forbidden("Not authorized to update this user".to_string()));
        }

        request.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if request.is_empty() {
            return Err(AppError::ValidationError("No updatable fields provided".to_string()));
        }

        let current = self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let mut patch = UserPatch {
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            ..Default::default()
        };

        let new_email = request.email
            .map(|email| normalize_email(&email))
            .filter(|email| *email != current.email);

        if let Some(email) = &new_email {
            if self.store.find_by_email(email).await?.is_some() {
                return Err(AppError::DuplicateEmail);
            }
            patch.email = Some(email.clone());
            if self.verification.required() {
                patch.is_email_verified = Some(false);
            }
        }

        let updated = self.store
            .apply_patch(id, patch, self.clock.now_bson())
            .await?
            .ok_or(AppError::UserNotFound)?;

        if new_email.is_some() && self.verification.required() {
            self.verification.reissue(&updated).await?;
        }

        log::info!("✅ 사용자 정보 수정 - 대상: {}, 요청자: {}", id, actor.id);
        Ok(UserResponse::from(updated))
    }

    /// 소프트 삭제
    pub async fn deactivate_user(&self, id: &str) -> AppResult<()> {
        let patch = UserPatch { is_active: Some(false), ..Default::default() };

        self.store
            .apply_patch(id, patch, self.clock.now_bson())
            .await?
            .ok_or(AppError::UserNotFound)?;

        log::info!("🗑️ 사용자 비활성화 - ID: {}", id);
        Ok(())
    }

    /// 의사 계정 심사 상태 변경
    pub async fn set_verification_status(
        &self,
        id: &str,
        status: VerificationStatus,
    ) -> AppResult<UserResponse> {
        let user = self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_doctor() {
            return Err(AppError::ValidationError(
                "Verification status applies to doctor accounts only".to_string(),
            ));
        }

        let patch = UserPatch { verification_status: Some(status), ..Default::default() };
        let updated = self.store
            .apply_patch(id, patch, self.clock.now_bson())
            .await?
            .ok_or(AppError::UserNotFound)?;

        log::info!("🩺 의사 심사 상태 변경 - ID: {}, 상태: {}", id, status.as_str());
        Ok(UserResponse::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::users::request::RegisterRequest;
    use crate::domain::entities::users::user::{Role, User};
    use crate::test_support::TestHarness;

    async fn register(harness: &TestHarness, email: &str, role: Role) -> User {
        let request = RegisterRequest {
            email: email.to_string(),
            password: "secret1".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            phone: None,
            role: Some(role),
        };
        harness.context.auth.register(request).await.unwrap()
    }

    fn actor(user: &User) -> AuthenticatedUser {
        AuthenticatedUser::from(user)
    }

    fn rename(first_name: &str) -> UpdateUserRequest {
        UpdateUserRequest { first_name: Some(first_name.to_string()), ..Default::default() }
    }

    #[actix_web::test]
    async fn test_list_users_is_sanitized() {
        let harness = TestHarness::new(false);
        register(&harness, "a@x.com", Role::Patient).await;
        register(&harness, "b@x.com", Role::Doctor).await;

        let users = harness.context.users.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        let json = serde_json::to_value(&users).unwrap();
        assert!(json[0].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn test_owner_and_admin_can_update_but_others_cannot() {
        let harness = TestHarness::new(false);
        let owner = register(&harness, "a@x.com", Role::Patient).await;
        let other = register(&harness, "b@x.com", Role::Patient).await;
        let admin = register(&harness, "admin@x.com", Role::Admin).await;
        let id = owner.id_string().unwrap();
        let users = &harness.context.users;

        let updated = users.update_user(&actor(&owner), &id, rename("Self")).await.unwrap();
        assert_eq!(updated.first_name, "Self");

        let updated = users.update_user(&actor(&admin), &id, rename("Admin")).await.unwrap();
        assert_eq!(updated.first_name, "Admin");

        let result = users.update_user(&actor(&other), &id, rename("Nope")).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[actix_web::test]
    async fn test_update_requires_fields() {
        let harness = TestHarness::new(false);
        let owner = register(&harness, "a@x.com", Role::Patient).await;

        let result = harness.context.users
            .update_user(&actor(&owner), &owner.id_string().unwrap(), UpdateUserRequest::default())
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_email_change_rejects_taken_address() {
        let harness = TestHarness::new(false);
        let owner = register(&harness, "a@x.com", Role::Patient).await;
        register(&harness, "b@x.com", Role::Patient).await;

        let request = UpdateUserRequest { email: Some("B@x.com".to_string()), ..Default::default() };
        let result = harness.context.users
            .update_user(&actor(&owner), &owner.id_string().unwrap(), request)
            .await;
        assert_eq!(result.unwrap_err(), AppError::DuplicateEmail);
    }

    #[actix_web::test]
    async fn test_email_change_resets_verification_and_mails_new_address() {
        let harness = TestHarness::new(true);
        let owner = register(&harness, "a@x.com", Role::Patient).await;
        let token = harness.mailer.last_verification_token().unwrap();
        harness.context.auth.verify_email(&token).await.unwrap();

        let request = UpdateUserRequest { email: Some("new@x.com".to_string()), ..Default::default() };
        let updated = harness.context.users
            .update_user(&actor(&owner), &owner.id_string().unwrap(), request)
            .await
            .unwrap();

        assert_eq!(updated.email, "new@x.com");
        assert!(!updated.is_email_verified);
        assert_eq!(harness.mailer.sent().last().unwrap().to, "new@x.com");

        let token = harness.mailer.last_verification_token().unwrap();
        assert!(harness.context.auth.verify_email(&token).await.unwrap().is_email_verified);
    }

    #[actix_web::test]
    async fn test_deactivate_user() {
        let harness = TestHarness::new(false);
        let user = register(&harness, "a@x.com", Role::Patient).await;

        harness.context.users.deactivate_user(&user.id_string().unwrap()).await.unwrap();
        assert!(!harness.store.snapshot("a@x.com").unwrap().is_active);

        let missing = harness.context.users.deactivate_user("65a000000000000000000001").await;
        assert_eq!(missing.unwrap_err(), AppError::UserNotFound);
    }

    #[actix_web::test]
    async fn test_verification_status_applies_to_doctors_only() {
        let harness = TestHarness::new(false);
        let doctor = register(&harness, "doc@x.com", Role::Doctor).await;
        let patient = register(&harness, "pat@x.com", Role::Patient).await;
        let users = &harness.context.users;

        let approved = users
            .set_verification_status(&doctor.id_string().unwrap(), VerificationStatus::Approved)
            .await
            .unwrap();
        assert_eq!(approved.verification_status, Some(VerificationStatus::Approved));

        let result = users
            .set_verification_status(&patient.id_string().unwrap(), VerificationStatus::Approved)
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
