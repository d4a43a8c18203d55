//! # Repository Layer
//!
//! 자격 증명 저장소(Credential Store)에 대한 데이터 액세스 계층입니다.
//! 공유 가변 자원은 이 저장소뿐이며, 모든 쓰기는 단건 업데이트입니다.

pub mod users;
