//! GitHub OAuth2 web flow: authorize URL and code → access token exchange.

use std::time::Duration;

use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::errors::{SessionError, SessionResult};

/// Default GitHub web base serving `/login/oauth/*`.
pub const DEFAULT_OAUTH_BASE: &str = "https://github.com";

/// OAuth application identity registered with GitHub.
#[derive(Clone)]
pub struct OAuthApp {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl std::fmt::Debug for OAuthApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthApp")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct GitHubOAuth {
    http: Client,
    app: OAuthApp,
    authorize_url: Url,
    token_url: Url,
}

impl GitHubOAuth {
    pub fn new(app: OAuthApp, oauth_base: &str, timeout: Duration) -> SessionResult<Self> {
        let base = oauth_base.trim().trim_end_matches('/');
        let authorize_url = Url::parse_with_params(
            &format!("{base}/login/oauth/authorize"),
            [
                ("client_id", app.client_id.as_str()),
                ("redirect_uri", app.redirect_uri.as_str()),
            ],
        )
        .map_err(|e| SessionError::Config(format!("invalid OAuth base '{oauth_base}': {e}")))?;
        let token_url = Url::parse(&format!("{base}/login/oauth/access_token"))
            .map_err(|e| SessionError::Config(format!("invalid OAuth base '{oauth_base}': {e}")))?;

        let http = Client::builder()
            .user_agent(concat!("session-auth/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::Config(e.to_string()))?;

        Ok(Self {
            http,
            app,
            authorize_url,
            token_url,
        })
    }

    /// Provider page the browser is sent to.
    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    /// Exchanges an authorization code for the provider's user access token.
    pub async fn exchange_code(&self, code: &str) -> SessionResult<String> {
        let code = code.trim();
        if code.is_empty() {
            return Err(SessionError::AuthExchange("missing authorization code".into()));
        }

        debug!("POST {}", self.token_url);
        let resp = self
            .http
            .post(self.token_url.clone())
            .header(header::ACCEPT, "application/json")
            .form(&TokenRequest {
                client_id: &self.app.client_id,
                client_secret: &self.app.client_secret,
                code,
                redirect_uri: &self.app.redirect_uri,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "OAuth token endpoint returned non-success status");
            return Err(SessionError::Upstream(format!(
                "token endpoint returned HTTP {status}"
            )));
        }

        let body: TokenResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                SessionError::Timeout
            } else {
                SessionError::AuthExchange(format!("undecodable token response: {e}"))
            }
        })?;

        match body.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(token),
            None => {
                let reason = body
                    .error_description
                    .or(body.error)
                    .unwrap_or_else(|| "no access token in response".into());
                warn!(%reason, "OAuth exchange yielded no access token");
                Err(SessionError::AuthExchange(reason))
            }
        }
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}
