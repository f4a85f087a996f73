//! Credential seams used by the service
//!
//! The service only sees these traits; the JWT and argon2 implementations
//! live in `infra::auth`.

use crate::contract::{Account, TokenKind};
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Identity carried by a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub account_id: i64,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub kind: TokenKind,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed bearer tokens
pub trait TokenAuthority: Send + Sync {
    fn issue(&self, account: &Account, kind: TokenKind) -> Result<String>;

    /// Fails on a bad signature, an expired token or a token of another kind
    fn verify(&self, token: &str, kind: TokenKind) -> Result<VerifiedToken>;
}

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    /// `false` for a wrong password or an unreadable hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}
