//! 사용자 관리 서비스 모듈
//!
//! 목록 조회, 프로필 수정, 소프트 삭제, 의사 심사 상태 변경을 담당합니다.
//! 권한 판정(본인 또는 관리자)은 미들웨어가 아닌 서비스에서 최종 확인합니다.

pub mod user_service;

pub use user_service::*;
