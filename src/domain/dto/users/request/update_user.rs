//! 사용자 수정 요청 DTO
//!
//! 본인 또는 관리자가 변경할 수 있는 필드만 허용 목록으로 정의합니다.
//! 목록에 없는 필드(role, isActive 등)는 역직렬화 단계에서 거부됩니다.
use serde::Deserialize;
use validator::Validate;
use crate::domain::entities::users::user::VerificationStatus;
use crate::utils::string_utils::deserialize_optional_string;

/// 프로필 수정 요청
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 64, message = "First name is too long"))]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 64, message = "Last name is too long"))]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }
}

/// 관리자의 의사 계정 심사 요청
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVerificationStatusRequest {
    pub verification_status: VerificationStatus,
}
