//! Signed, time-boxed session credentials (HS256 JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::errors::{SessionError, SessionResult};

/// Claims carried by a session credential.
///
/// `sub` is the provider access token obtained during the OAuth exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signer/verifier for session credentials.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: Duration) -> SessionResult<Self> {
        if secret.is_empty() {
            return Err(SessionError::Config("JWT secret must not be empty".into()));
        }

        if ttl <= Duration::zero() {
            return Err(SessionError::Config("session TTL must be positive".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // No grace period: a credential is dead from the second `exp` is reached.
        validation.leeway = 0;
        validation.reject_tokens_expiring_in_less_than = 1;
        validation.validate_exp = true;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Signs a credential for `subject` valid from `now` until `now + ttl`.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> SessionResult<(String, SessionClaims)> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| SessionError::Signing("session expiry is out of range".into()))?;
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SessionError::Signing(e.to_string()))?;
        Ok((token, claims))
    }

    /// Verifies the signature first, then the expiry.
    pub fn validate(&self, token: &str) -> SessionResult<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => SessionError::InvalidToken(e.to_string()),
            })
    }
}
