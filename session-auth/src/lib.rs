//! Session authentication for the review API.
//!
//! A caller logs in through GitHub's OAuth web flow; the returned provider
//! token becomes the subject of a short-lived HS256 session credential. The
//! credential is stateless: nothing is stored server-side and it expires on
//! its own after the configured TTL.

pub mod errors;
pub mod oauth;
pub mod token;

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};
use url::Url;

pub use errors::{SessionError, SessionResult};
pub use oauth::{DEFAULT_OAUTH_BASE, GitHubOAuth, OAuthApp};
pub use token::{SessionClaims, TokenSigner};

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 30;
/// The identity provider must answer the code exchange within this window.
pub const OAUTH_EXCHANGE_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Static configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub app: OAuthApp,
    pub jwt_secret: String,
    pub ttl: Duration,
    pub oauth_base: String,
    pub exchange_timeout: StdDuration,
}

/// Session credential handed back to the caller after login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates session credentials.
#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    oauth: GitHubOAuth,
    signer: TokenSigner,
}

impl SessionAuthenticator {
    pub fn new(cfg: SessionConfig) -> SessionResult<Self> {
        Ok(Self {
            oauth: GitHubOAuth::new(cfg.app, &cfg.oauth_base, cfg.exchange_timeout)?,
            signer: TokenSigner::new(&cfg.jwt_secret, cfg.ttl)?,
        })
    }

    /// GitHub page the user must visit to grant access.
    pub fn authorize_url(&self) -> &Url {
        self.oauth.authorize_url()
    }

    /// Exchanges the OAuth `code` and wraps the provider token in a session credential.
    #[instrument(skip_all)]
    pub async fn exchange_code(&self, code: &str) -> SessionResult<IssuedSession> {
        let provider_token = self.oauth.exchange_code(code).await?;
        let session = self.issue(&provider_token)?;
        info!(expires_at = %session.expires_at, "session issued");
        Ok(session)
    }

    /// Signs a credential for `subject` valid from now.
    pub fn issue(&self, subject: &str) -> SessionResult<IssuedSession> {
        self.issue_at(subject, Utc::now())
    }

    /// Signs a credential for `subject` as of `now`.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> SessionResult<IssuedSession> {
        let (access_token, claims) = self.signer.issue_at(subject, now)?;
        Ok(IssuedSession {
            access_token,
            token_type: "bearer",
            expires_at: DateTime::from_timestamp(claims.exp, 0)
                .ok_or_else(|| SessionError::Signing("session expiry is out of range".into()))?,
        })
    }

    /// Checks signature and expiry of a presented credential.
    pub fn validate(&self, token: &str) -> SessionResult<SessionClaims> {
        self.signer.validate(token)
    }
}
