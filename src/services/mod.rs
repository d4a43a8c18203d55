//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 `AppContext`가 생성하며, 저장소/메일러/시계를 생성자 인자로 받습니다.
//!
//! - [`auth`] - 가입, 로그인, 토큰 회전, 로그아웃, 이메일 인증
//! - [`users`] - 관리자/본인 사용자 관리, 의사 심사 상태
//! - [`mail`] - 템플릿 메일 발송 협력자

pub mod auth;
pub mod users;
pub mod mail;
