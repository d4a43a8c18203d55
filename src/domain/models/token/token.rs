//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! 액세스/리프레시 토큰이 공유하는 최소 신원 정보와 클레임, 그리고
//! 두 토큰을 묶은 쌍을 정의합니다.
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::{Role, User};

/// 토큰에 서명되는 최소 신원 정보 `{id, email, role}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl TokenPayload {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `iat`, `exp`: Unix timestamp (초)
/// - `jti`: 발급마다 새로 생성되는 UUID. 같은 초에 발급된 토큰도 서로 다릅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl TokenClaims {
    pub fn payload(&self) -> TokenPayload {
        TokenPayload {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// 토큰 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT 토큰 쌍 구조체
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
