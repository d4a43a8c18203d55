//! 사용자 저장소
//!
//! - [`user_store`] - 서비스가 의존하는 `UserStore` trait
//! - [`user_repo`] - MongoDB 구현 `MongoUserRepository`
//! - [`timed_store`] - 호출별 타임아웃 데코레이터 `TimedUserStore`

pub mod user_store;
pub mod user_repo;
pub mod timed_store;

pub use user_store::UserStore;
pub use user_repo::MongoUserRepository;
pub use timed_store::TimedUserStore;
