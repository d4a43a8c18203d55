use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use crate::domain::entities::users::user::{Role, User, VerificationStatus};
use crate::errors::AppError;

/// 인증 미들웨어가 저장소에서 다시 읽어 요청에 붙이는 사용자 정보
///
/// 토큰 클레임이 아니라 현재 저장된 상태를 반영하므로
/// 역할/인증/심사 상태 검사는 항상 최신 값을 기준으로 합니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub is_email_verified: bool,
    pub verification_status: Option<VerificationStatus>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// 여러 역할 중 하나라도 해당하는지 확인
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
            role: user.role,
            is_email_verified: user.is_email_verified,
            verification_status: user.verification_status,
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// `AuthMiddleware` 뒤에서만 값이 존재합니다.
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::Unauthorized("Not authorized".to_string()))),
        }
    }
}
