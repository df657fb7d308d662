//! Error type for the OAuth exchange and session credential checks.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The identity provider answered but handed out no access token.
    #[error("GitHub authentication failed: {0}")]
    AuthExchange(String),

    /// The identity provider did not answer within the exchange timeout.
    #[error("Request timed out while fetching GitHub access token.")]
    Timeout,

    /// Any other transport or status failure talking to the identity provider.
    #[error("Error in request: {0}")]
    Upstream(String),

    /// Signature is valid but the credential is past its expiry.
    #[error("Token has expired")]
    Expired,

    /// Malformed, forged or otherwise unverifiable credential.
    #[error("Invalid token")]
    InvalidToken(String),

    /// Signing a fresh credential failed.
    #[error("failed to sign session token: {0}")]
    Signing(String),

    /// Startup configuration is unusable (bad OAuth base URL, empty secret).
    #[error("invalid session configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SessionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SessionError::Timeout
        } else {
            SessionError::Upstream(e.to_string())
        }
    }
}
