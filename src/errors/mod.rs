//! 에러 타입 모듈
//!
//! [`errors::AppError`]와 [`errors::AppResult`], [`errors::ErrorContext`]를 제공합니다.

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
