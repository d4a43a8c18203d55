//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 이메일 정규화
//! - [`display_terminal`] - 시작 시 컴포넌트 구성 요약 출력

pub mod string_utils;
pub mod display_terminal;
