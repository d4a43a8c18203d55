//! 인증 이후 단계의 접근 검사
//!
//! 모두 요청에 붙은 `AuthenticatedUser`만 보고 판정하는 순수 함수입니다.

use crate::domain::entities::users::user::{Role, VerificationStatus};
use crate::domain::models::auth::{AccessPolicy, AuthenticatedUser};
use crate::errors::{AppError, AppResult};

/// 허용 역할 검사
pub fn authorize(user: &AuthenticatedUser, roles: &[Role]) -> AppResult<()> {
    if user.has_any_role(roles) {
        return Ok(());
    }

    log::warn!("🔒 권한 부족 - ID: {}, 역할: {}", user.id, user.role);
    Err(AppError::Forbidden(format!(
        "User role '{}' is not authorized to access this route",
        user.role
    )))
}

pub fn require_verified_email(user: &AuthenticatedUser) -> AppResult<()> {
    if user.is_email_verified {
        Ok(())
    } else {
        Err(AppError::EmailNotVerified)
    }
}

/// 의사 계정 승인 검사
///
/// 의사가 아니면 항상 통과합니다. 의사는 `Approved`일 때만 통과합니다.
pub fn require_doctor_approval(user: &AuthenticatedUser) -> AppResult<()> {
    if user.role != Role::Doctor {
        return Ok(());
    }

    match user.verification_status {
        Some(VerificationStatus::Approved) => Ok(()),
        status => Err(AppError::DoctorNotApproved(status.unwrap_or(VerificationStatus::Pending))),
    }
}

/// 본인 또는 관리자만 허용
pub fn require_self_or_admin(user: &AuthenticatedUser, target_id: &str) -> AppResult<()> {
    if user.id == target_id || user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Not authorized to access this user".to_string()))
    }
}

/// 정책에 선언된 단계를 순서대로 실행합니다.
pub fn enforce(user: &AuthenticatedUser, policy: &AccessPolicy) -> AppResult<()> {
    if let Some(roles) = &policy.roles {
        authorize(user, roles)?;
    }
    if policy.verified_email {
        require_verified_email(user)?;
    }
    if policy.doctor_approval {
        require_doctor_approval(user)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, verified: bool, status: Option<VerificationStatus>) -> AuthenticatedUser {
        AuthenticatedUser {
            id: "65a000000000000000000001".to_string(),
            email: "a@x.com".to_string(),
            role,
            is_email_verified: verified,
            verification_status: status,
        }
    }

    #[test]
    fn test_authorize() {
        let admin = user(Role::Admin, true, None);
        assert!(authorize(&admin, &[Role::Admin]).is_ok());
        assert!(matches!(authorize(&admin, &[Role::Doctor, Role::Patient]), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_doctor_approval_passes_non_doctors() {
        assert!(require_doctor_approval(&user(Role::Patient, true, None)).is_ok());
        assert!(require_doctor_approval(&user(Role::Admin, true, None)).is_ok());
    }

    #[test]
    fn test_doctor_approval_requires_approved_status() {
        let approved = user(Role::Doctor, true, Some(VerificationStatus::Approved));
        assert!(require_doctor_approval(&approved).is_ok());

        let pending = user(Role::Doctor, true, Some(VerificationStatus::Pending));
        assert_eq!(
            require_doctor_approval(&pending),
            Err(AppError::DoctorNotApproved(VerificationStatus::Pending))
        );

        let rejected = user(Role::Doctor, true, Some(VerificationStatus::Rejected));
        assert_eq!(
            require_doctor_approval(&rejected),
            Err(AppError::DoctorNotApproved(VerificationStatus::Rejected))
        );

        let missing = user(Role::Doctor, true, None);
        assert_eq!(
            require_doctor_approval(&missing),
            Err(AppError::DoctorNotApproved(VerificationStatus::Pending))
        );
    }

    #[test]
    fn test_require_self_or_admin() {
        let patient = user(Role::Patient, true, None);
        assert!(require_self_or_admin(&patient, "65a000000000000000000001").is_ok());
        assert!(require_self_or_admin(&patient, "65a000000000000000000002").is_err());
        assert!(require_self_or_admin(&user(Role::Admin, true, None), "65a000000000000000000002").is_ok());
    }

    #[test]
    fn test_enforce_runs_stages_in_order() {
        let policy = AccessPolicy {
            roles: Some(vec![Role::Doctor]),
            verified_email: true,
            doctor_approval: true,
        };

        let wrong_role = user(Role::Patient, false, None);
        assert!(matches!(enforce(&wrong_role, &policy), Err(AppError::Forbidden(_))));

        let unverified = user(Role::Doctor, false, Some(VerificationStatus::Pending));
        assert_eq!(enforce(&unverified, &policy), Err(AppError::EmailNotVerified));

        let pending = user(Role::Doctor, true, Some(VerificationStatus::Pending));
        assert_eq!(enforce(&pending, &policy), Err(AppError::DoctorNotApproved(VerificationStatus::Pending)));

        let approved = user(Role::Doctor, true, Some(VerificationStatus::Approved));
        assert!(enforce(&approved, &policy).is_ok());
    }
}
