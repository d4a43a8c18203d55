//! # 사용자 저장소 추상화
//!
//! 서비스 계층은 이 trait에만 의존합니다. 운영 환경에서는
//! `TimedUserStore<MongoUserRepository>` 조합이, 테스트에서는 메모리 저장소가 주입됩니다.
//!
//! 모든 변경은 기본 키(또는 unique 필드) 기준의 단건 업데이트입니다.

use async_trait::async_trait;
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::{RefreshTokenGuard, User, UserPatch};
use crate::errors::AppResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// ID로 사용자 조회
    ///
    /// 형식이 잘못된 ID는 존재하지 않는 사용자와 같이 `Ok(None)`입니다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 정규화된(소문자) 이메일로 사용자 조회
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 전체 사용자 목록 (최근 가입 순)
    async fn list(&self) -> AppResult<Vec<User>>;

    /// 새 사용자 저장
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - ID가 할당된 사용자
    /// * `Err(AppError::DuplicateEmail)` - 이메일 unique 제약 위반
    async fn create(&self, user: User) -> AppResult<User>;

    /// 허용 목록 필드만 갱신하고 갱신 후 문서를 반환
    async fn apply_patch(&self, id: &str, patch: UserPatch, now: DateTime) -> AppResult<Option<User>>;

    /// 리프레시 토큰 조건부 교체 (compare-and-swap)
    ///
    /// `expected`가 저장된 값을 허용할 때만 `new_token`으로 교체합니다.
    /// `new_token`이 None이면 필드를 제거합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(true)` - 교체됨
    /// * `Ok(false)` - 사용자가 없거나 저장된 토큰이 기대값과 다름
    async fn swap_refresh_token(
        &self,
        id: &str,
        expected: RefreshTokenGuard,
        new_token: Option<String>,
    ) -> AppResult<bool>;

    /// 이메일 인증 토큰 소비
    ///
    /// 해시가 일치하고 만료 전인 사용자를 원자적으로 인증 완료 처리하고
    /// 토큰 필드를 제거합니다.
    async fn consume_verification_token(&self, token_hash: &str, now: DateTime) -> AppResult<Option<User>>;

    /// 이메일 인증 토큰 해시와 만료 시각 저장 (기존 값 덮어쓰기)
    async fn set_verification_token(
        &self,
        id: &str,
        token_hash: &str,
        expires: DateTime,
        now: DateTime,
    ) -> AppResult<bool>;
}
