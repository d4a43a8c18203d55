//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션에 대한 MongoDB 기반 `UserStore` 구현입니다.
//!
//! ## 특징
//!
//! - **단일 진실 공급원**: 캐시 없이 매 요청 저장소를 조회
//! - **조건부 쓰기**: 리프레시 토큰 회전과 인증 토큰 소비는 복합 필터를 가진
//!   단일 `update_one` / `find_one_and_update`로 수행
//! - **데이터 무결성**: email unique 인덱스, 중복 키(11000)는 `DuplicateEmail`

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::users::user::{RefreshTokenGuard, User, UserPatch},
    errors::{AppError, AppResult},
    repositories::users::user_store::UserStore,
};

pub const USERS_COLLECTION: &str = "users";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB 사용자 리포지토리
///
/// - **컬렉션명**: `users`
/// - **인덱스**: email(unique), created_at(desc), email_verification_token
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_database().collection::<User>(USERS_COLLECTION),
        }
    }

    /// 컬렉션 인덱스 생성
    ///
    /// 시작 시 한 번 호출합니다. 이미 존재하는 인덱스는 그대로 유지됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        let verification_index = IndexModel::builder()
            .keys(doc! { "email_verification_token": 1 })
            .options(IndexOptions::builder()
                .name("email_verification_token".to_string())
                .sparse(true)
                .build())
            .build();

        self.collection
            .create_indexes([email_index, created_at_index, verification_index])
            .await
            .map_err(map_mongo_error)?;

        Ok(())
    }

    fn after_update() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

/// 드라이버 에러를 도메인 에러로 변환
///
/// 네트워크/서버 선택 실패는 재시도 가능한 `ServiceUnavailable`이며
/// 인증 실패로 보고되지 않습니다.
pub(crate) fn map_mongo_error(e: mongodb::error::Error) -> AppError {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            AppError::DuplicateEmail
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            AppError::DuplicateEmail
        }
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => {
            AppError::ServiceUnavailable(e.to_string())
        }
        _ => AppError::DatabaseError(e.to_string()),
    }
}

fn patch_document(patch: &UserPatch, now: DateTime) -> Document {
    let mut set = doc! { "updated_at": now };

    if let Some(email) = &patch.email {
        set.insert("email", email.clone());
    }
    if let Some(first_name) = &patch.first_name {
        set.insert("first_name", first_name.clone());
    }
    if let Some(last_name) = &patch.last_name {
        set.insert("last_name", last_name.clone());
    }
    if let Some(phone) = &patch.phone {
        set.insert("phone", phone.clone());
    }
    if let Some(is_active) = patch.is_active {
        set.insert("is_active", is_active);
    }
    if let Some(is_email_verified) = patch.is_email_verified {
        set.insert("is_email_verified", is_email_verified);
    }
    if let Some(status) = patch.verification_status {
        set.insert("verification_status", status.as_str());
    }

    set
}

fn refresh_token_filter(object_id: ObjectId, expected: &RefreshTokenGuard) -> Document {
    match expected {
        RefreshTokenGuard::Any => doc! { "_id": object_id },
        RefreshTokenGuard::Matches(token) => doc! { "_id": object_id, "refresh_token": token.as_str() },
    }
}

fn refresh_token_update(new_token: Option<String>) -> Document {
    match new_token {
        Some(token) => doc! { "$set": { "refresh_token": token } },
        None => doc! { "$unset": { "refresh_token": "" } },
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(map_mongo_error)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(map_mongo_error)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(map_mongo_error)?;

        cursor.try_collect().await.map_err(map_mongo_error)
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection
            .insert_one(&user)
            .await
            .map_err(map_mongo_error)?;

        let object_id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("Inserted user id is not an ObjectId".to_string())
        })?;
        user.id = Some(object_id);

        Ok(user)
    }

    async fn apply_patch(&self, id: &str, patch: UserPatch, now: DateTime) -> AppResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.collection
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": patch_document(&patch, now) },
            )
            .with_options(Self::after_update())
            .await
            .map_err(map_mongo_error)
    }

    async fn swap_refresh_token(
        &self,
        id: &str,
        expected: RefreshTokenGuard,
        new_token: Option<String>,
    ) -> AppResult<bool> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self.collection
            .update_one(
                refresh_token_filter(object_id, &expected),
                refresh_token_update(new_token),
            )
            .await
            .map_err(map_mongo_error)?;

        Ok(result.matched_count == 1)
    }

    async fn consume_verification_token(&self, token_hash: &str, now: DateTime) -> AppResult<Option<User>> {
        self.collection
            .find_one_and_update(
                doc! {
                    "email_verification_token": token_hash,
                    "email_verification_expires": { "$gt": now },
                },
                doc! {
                    "$set": { "is_email_verified": true, "updated_at": now },
                    "$unset": { "email_verification_token": "", "email_verification_expires": "" },
                },
            )
            .with_options(Self::after_update())
            .await
            .map_err(map_mongo_error)
    }

    async fn set_verification_token(
        &self,
        id: &str,
        token_hash: &str,
        expires: DateTime,
        now: DateTime,
    ) -> AppResult<bool> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self.collection
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": {
                    "email_verification_token": token_hash,
                    "email_verification_expires": expires,
                    "updated_at": now,
                } },
            )
            .await
            .map_err(map_mongo_error)?;

        Ok(result.matched_count == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::from_document;
    use mongodb::error::{CommandError, Error as MongoError, WriteError};
    use crate::domain::entities::users::user::VerificationStatus;

    fn write_error(code: i32) -> MongoError {
        let write_error: WriteError = from_document(doc! { "code": code, "errmsg": "write failed" }).unwrap();
        MongoError::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    #[test]
    fn test_patch_document_contains_only_listed_fields() {
        let patch = UserPatch {
            first_name: Some("Z".to_string()),
            verification_status: Some(VerificationStatus::Approved),
            ..Default::default()
        };
        let set = patch_document(&patch, DateTime::from_millis(5));

        assert_eq!(set.get_str("first_name").unwrap(), "Z");
        assert_eq!(set.get_str("verification_status").unwrap(), "approved");
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("email"));
        assert!(!set.contains_key("role"));
        assert!(!set.contains_key("refresh_token"));
    }

    #[test]
    fn test_rotation_filter_matches_stored_token() {
        let id = ObjectId::new();
        let filter = refresh_token_filter(id, &RefreshTokenGuard::Matches("t1".to_string()));
        assert_eq!(filter.get_str("refresh_token").unwrap(), "t1");

        let filter = refresh_token_filter(id, &RefreshTokenGuard::Any);
        assert!(!filter.contains_key("refresh_token"));
    }

    #[test]
    fn test_clearing_refresh_token_unsets_field() {
        let update = refresh_token_update(None);
        assert!(update.contains_key("$unset"));

        let update = refresh_token_update(Some("t2".to_string()));
        assert_eq!(update.get_document("$set").unwrap().get_str("refresh_token").unwrap(), "t2");
    }

    #[test]
    fn test_duplicate_key_maps_to_duplicate_email() {
        assert!(matches!(map_mongo_error(write_error(11000)), AppError::DuplicateEmail));

        let command_error: CommandError =
            from_document(doc! { "code": 11000, "codeName": "DuplicateKey", "errmsg": "E11000" }).unwrap();
        let error = MongoError::from(ErrorKind::Command(command_error));
        assert!(matches!(map_mongo_error(error), AppError::DuplicateEmail));
    }

    #[test]
    fn test_network_failure_maps_to_service_unavailable() {
        let error = MongoError::from(std::io::Error::other("connection reset"));
        let mapped = map_mongo_error(error);
        assert!(matches!(mapped, AppError::ServiceUnavailable(_)), "{:?}", mapped);
        assert_eq!(mapped.code(), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn test_other_driver_errors_are_database_errors() {
        assert!(matches!(map_mongo_error(write_error(121)), AppError::DatabaseError(_)));
        assert!(matches!(map_mongo_error(MongoError::custom("boom")), AppError::DatabaseError(_)));
    }
}
