use serde::Serialize;
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::{Role, User, VerificationStatus};

/// 사용자 응답 DTO
///
/// 비밀번호 해시와 토큰 관련 필드는 존재하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub is_email_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    pub created_at: String,
    pub updated_at: String,
}

fn to_rfc3339(value: DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            first_name,
            last_name,
            phone,
            role,
            is_active,
            is_email_verified,
            verification_status,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            first_name,
            last_name,
            phone,
            role,
            is_active,
            is_email_verified,
            verification_status,
            created_at: to_rfc3339(created_at),
            updated_at: to_rfc3339(updated_at),
        }
    }
}

/// 로그인 응답 DTO
///
/// 리프레시 토큰은 본문이 아닌 http-only 쿠키로만 전달됩니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl LoginResponse {
    pub fn new(user: User, access_token: String, expires_in: i64) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

/// 토큰 갱신 응답 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl RefreshResponse {
    pub fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_omits_secrets() {
        let mut user = User::new_local(
            "a@x.com".to_string(),
            "$2b$04$secret-hash".to_string(),
            "A".to_string(),
            "B".to_string(),
            None,
            Role::Doctor,
            DateTime::from_millis(0),
        );
        user.id = Some(ObjectId::new());
        user.refresh_token = Some("refresh".to_string());
        user.email_verification_token = Some("digest".to_string());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("refreshToken"));
        assert!(!object.contains_key("emailVerificationToken"));
        assert!(!object.contains_key("emailVerificationExpires"));
        assert_eq!(json["firstName"], "A");
        assert_eq!(json["role"], "doctor");
        assert_eq!(json["verificationStatus"], "pending");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }
}
