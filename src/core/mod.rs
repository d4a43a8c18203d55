//! # Core Module
//!
//! - [`clock`] - 주입 가능한 시간 소스 (`Clock`, `SystemClock`)
//! - [`registry`] - 설정과 서비스 그래프를 묶는 `AppContext`

pub mod clock;
pub mod registry;

pub use registry::{AppContext, AppSettings};
