//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 발급과 검증을 담당합니다.
//! 두 토큰은 서로 다른 비밀키로 서명되며, 한쪽 비밀키가 유출되어도
//! 다른 종류의 토큰은 위조할 수 없습니다.
//!
//! 만료 판정은 `jsonwebtoken`의 내장 검사 대신 주입된 `Clock`으로 수행합니다.
//! 서명이 틀린 토큰은 만료 여부와 관계없이 `TokenInvalid`입니다.

use std::sync::Arc;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use crate::config::JwtConfig;
use crate::core::clock::Clock;
use crate::domain::models::token::{TokenClaims, TokenKind, TokenPair, TokenPayload};
use crate::errors::{AppError, AppResult, ErrorContext};

pub struct TokenService {
    config: JwtConfig,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(config: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// 액세스 토큰 수명(초)
    pub fn access_expires_in(&self) -> i64 {
        self.config.access_ttl.num_seconds()
    }

    /// 리프레시 토큰 수명 (쿠키 max-age에 사용)
    pub fn refresh_ttl(&self) -> Duration {
        self.config.refresh_ttl
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.config.access_secret.as_bytes(),
            TokenKind::Refresh => self.config.refresh_secret.as_bytes(),
        }
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_ttl,
            TokenKind::Refresh => self.config.refresh_ttl,
        }
    }

    fn issue(&self, kind: TokenKind, payload: &TokenPayload) -> AppResult<String> {
        let now = self.clock.now();
        let claims = TokenClaims {
            id: payload.id.clone(),
            email: payload.email.clone(),
            role: payload.role,
            iat: now.timestamp(),
            exp: (now + self.ttl(kind)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret(kind));

        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
            .with_context(|| format!("Failed to sign {} token", kind.as_str()))
    }

    fn verify(&self, kind: TokenKind, token: &str) -> AppResult<TokenPayload> {
        let decoding_key = DecodingKey::from_secret(self.secret(kind));
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                log::debug!("{} 토큰 검증 실패: {}", kind.as_str(), e);
                AppError::TokenInvalid
            })?;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(AppError::TokenExpired);
        }

        Ok(claims.payload())
    }

    pub fn issue_access_token(&self, payload: &TokenPayload) -> AppResult<String> {
        self.issue(TokenKind::Access, payload)
    }

    pub fn issue_refresh_token(&self, payload: &TokenPayload) -> AppResult<String> {
        self.issue(TokenKind::Refresh, payload)
    }

    pub fn issue_token_pair(&self, payload: &TokenPayload) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access_token(payload)?,
            refresh_token: self.issue_refresh_token(payload)?,
            expires_in: self.access_expires_in(),
        })
    }

    /// # Errors
    ///
    /// * `AppError::TokenExpired` - 서명은 유효하나 만료됨
    /// * `AppError::TokenInvalid` - 서명/형식 오류 (리프레시 토큰 포함)
    pub fn verify_access_token(&self, token: &str) -> AppResult<TokenPayload> {
        self.verify(TokenKind::Access, token)
    }

    pub fn verify_refresh_token(&self, token: &str) -> AppResult<TokenPayload> {
        self.verify(TokenKind::Refresh, token)
    }
}

/// `Authorization` 헤더에서 Bearer 토큰을 추출합니다.
///
/// 정확히 `Bearer <token>` 형식(단일 공백, 비어 있지 않은 토큰)만 허용합니다.
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() && !token.contains(char::is_whitespace) => Ok(token),
        _ => Err(AppError::Unauthorized("Not authorized, invalid token format".to_string())),
    }
}
