//! User Entity Implementation
//!
//! 인증 코어가 소유하는 유일한 엔티티입니다.
//! 비밀번호 해시, 현재 리프레시 토큰, 이메일 인증 토큰 해시는 저장소 내부에만
//! 존재하며 API 응답으로 직렬화되지 않습니다 (응답은 `UserResponse`가 담당).

use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 가입 시 역할이 지정되지 않았을 때 사용하는 기본 역할
pub const DEFAULT_REGISTRATION_ROLE: Role = Role::Patient;

/// 사용자 역할
///
/// 가입 시 결정되며 이후 이 코어에서는 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 의사 계정 심사 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 식별자 (소문자로 정규화, unique)
    pub email: String,
    /// bcrypt 해시 (외부 ID 연동 계정은 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    /// false이면 소프트 삭제된 계정 - 모든 인증이 실패해야 함
    pub is_active: bool,
    pub is_email_verified: bool,
    /// 의사 계정에만 존재
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    /// 현재 유효한 유일한 리프레시 토큰
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// 이메일 인증 토큰의 SHA-256 해시 (원문은 저장하지 않음)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verification_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verification_expires: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 이메일/비밀번호 가입 사용자 생성
    ///
    /// 의사 계정은 `Pending` 심사 상태로 시작합니다.
    pub fn new_local(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        phone: Option<String>,
        role: Role,
        now: DateTime,
    ) -> Self {
        let verification_status = match role {
            Role::Doctor => Some(VerificationStatus::Pending),
            _ => None,
        };

        Self {
            id: None,
            email,
            password_hash: Some(password_hash),
            first_name,
            last_name,
            phone,
            role,
            is_active: true,
            is_email_verified: false,
            verification_status,
            refresh_token: None,
            email_verification_token: None,
            email_verification_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn is_doctor(&self) -> bool {
        self.role == Role::Doctor
    }
}

/// 허용된 필드만 담는 부분 업데이트
///
/// 임의의 객체를 문서에 병합하지 않도록 변경 가능한 필드를 명시합니다.
/// `None`인 필드는 변경하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub is_email_verified: Option<bool>,
    pub verification_status: Option<VerificationStatus>,
}

impl UserPatch {
    /// 메모리 상의 엔티티에 패치를 적용합니다.
    pub fn apply_to(&self, user: &mut User, now: DateTime) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(is_email_verified) = self.is_email_verified {
            user.is_email_verified = is_email_verified;
        }
        if let Some(status) = self.verification_status {
            user.verification_status = Some(status);
        }
        user.updated_at = now;
    }
}

/// 리프레시 토큰 조건부 교체의 기대값
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshTokenGuard {
    /// 현재 값과 무관하게 덮어쓰기 (로그인)
    Any,
    /// 저장된 값이 정확히 일치할 때만 교체 (회전, 로그아웃)
    Matches(String),
}

impl RefreshTokenGuard {
    pub fn admits(&self, stored: Option<&str>) -> bool {
        match self {
            RefreshTokenGuard::Any => true,
            RefreshTokenGuard::Matches(expected) => stored == Some(expected.as_str()),
        }
    }
}
