pub mod token;

pub use token::{TokenClaims, TokenKind, TokenPair, TokenPayload};
