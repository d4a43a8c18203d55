use crate::domain::entities::users::user::Role;

/// 라우트 등록 시점에 고정되는 접근 정책
///
/// 인증 이후 단계들은 `roles → verified_email → doctor_approval` 순서로 실행됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessPolicy {
    /// 허용 역할 (None이면 역할 제한 없음)
    pub roles: Option<Vec<Role>>,
    /// 이메일 인증 완료 필요 여부
    pub verified_email: bool,
    /// 의사 계정 승인 필요 여부 (의사가 아닌 역할에는 영향 없음)
    pub doctor_approval: bool,
}

impl AccessPolicy {
    /// 인증만 요구하는 정책
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn is_authentication_only(&self) -> bool {
        self.roles.is_none() && !self.verified_email && !self.doctor_approval
    }
}
