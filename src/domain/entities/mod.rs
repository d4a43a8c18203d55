//! # Domain Entities Module
//!
//! 영속성을 갖는 핵심 비즈니스 객체를 정의합니다.
//! 인증 코어가 소유하는 엔티티는 `User` 하나뿐입니다.
//!
//! ## 엔티티 설계 원칙
//!
//! - MongoDB 문서 필드는 snake_case, `_id`는 `ObjectId`
//! - 시간 필드는 `bson::DateTime` (주입된 시계에서 생성)
//! - 레코드는 하드 삭제되지 않으며 `is_active=false`로 비활성화
//! - 변경은 허용 목록 기반 `UserPatch`로만 수행

pub mod users;
