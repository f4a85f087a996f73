//! HS256 bearer tokens

use crate::config::Config;
use crate::contract::{Account, TokenKind};
use crate::domain::auth::{TokenAuthority, VerifiedToken};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Account id
    sub: String,
    username: String,
    is_staff: bool,
    is_superuser: bool,
    /// "access" or "refresh"
    typ: String,
    iat: i64,
    exp: i64,
}

pub struct JwtAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtAuthority {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.jwt_secret, cfg.access_token_ttl, cfg.refresh_token_ttl)
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }
}

impl TokenAuthority for JwtAuthority {
    fn issue(&self, account: &Account, kind: TokenKind) -> Result<String> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl(kind).as_secs()).context("token lifetime overflow")?;
        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
            typ: kind.as_str().to_string(),
            iat: now,
            exp: now + ttl,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("failed to sign token")
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<VerifiedToken> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .context("token rejected")?;
        let claims = data.claims;
        if claims.typ != kind.as_str() {
            bail!("expected {} token, got {}", kind.as_str(), claims.typ);
        }

        let account_id = claims.sub.parse().context("token subject is not an account id")?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).context("token expiry out of range")?;

        Ok(VerifiedToken {
            account_id,
            username: claims.username,
            is_staff: claims.is_staff,
            is_superuser: claims.is_superuser,
            kind,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: 7,
            username: "amina".to_string(),
            email: "amina@example.com".to_string(),
            first_name: "Amina".to_string(),
            last_name: "Idrissi".to_string(),
            is_staff: true,
            is_superuser: false,
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    fn authority(secret: &str) -> JwtAuthority {
        JwtAuthority::new(secret, Duration::from_secs(300), Duration::from_secs(86_400))
    }

    #[test]
    fn issued_token_verifies() {
        let jwt = authority("s3cret");
        let token = jwt.issue(&account(), TokenKind::Access).unwrap();

        let verified = jwt.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(verified.account_id, 7);
        assert_eq!(verified.username, "amina");
        assert!(verified.is_staff);
        assert!(!verified.is_superuser);
        assert!(verified.expires_at > Utc::now());
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let jwt = authority("s3cret");
        let token = jwt.issue(&account(), TokenKind::Refresh).unwrap();

        assert!(jwt.verify(&token, TokenKind::Access).is_err());
        assert!(jwt.verify(&token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let token = authority("one").issue(&account(), TokenKind::Access).unwrap();
        assert!(authority("two").verify(&token, TokenKind::Access).is_err());
        assert!(authority("one").verify("not-a-token", TokenKind::Access).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "7".to_string(),
            username: "amina".to_string(),
            is_staff: false,
            is_superuser: false,
            typ: "access".to_string(),
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"s3cret"),
        )
        .unwrap();

        assert!(authority("s3cret").verify(&token, TokenKind::Access).is_err());
    }
}
