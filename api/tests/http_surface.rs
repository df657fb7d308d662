use std::{sync::Arc, time::Duration as StdDuration};

use ai_llm_service::{LlmModelConfig, LlmProvider};
use api::{
    build_router,
    core::{app_config::AppConfig, app_state::AppState},
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use pr_context_engine::{ExtensionAllowlist, GitHubConfig};
use serde_json::{Value, json};
use session_auth::{OAuthApp, SessionAuthenticator, SessionConfig};
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JWT_SECRET: &str = "integration-secret";

struct Upstreams {
    github: MockServer,
    oauth: MockServer,
    llm: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        Self {
            github: MockServer::start().await,
            oauth: MockServer::start().await,
            llm: MockServer::start().await,
        }
    }

    fn config(&self) -> AppConfig {
        AppConfig {
            api_address: "127.0.0.1:0".into(),
            session: session_config(&self.oauth.uri(), JWT_SECRET),
            github: GitHubConfig {
                base_api: self.github.uri(),
                token: "ghp_service".into(),
                timeout: StdDuration::from_secs(5),
            },
            llm: LlmModelConfig {
                provider: LlmProvider::OpenAI,
                model: "llama-3.3-70b-versatile".into(),
                endpoint: self.llm.uri(),
                api_key: Some("gsk_test".into()),
                max_tokens: None,
                temperature: Some(0.0),
                timeout_secs: Some(5),
            },
            review_extensions: ExtensionAllowlist::default(),
            review_language: "Python".into(),
        }
    }

    fn router(&self) -> Router {
        let state = AppState::from_config(&self.config()).unwrap();
        build_router(Arc::new(state))
    }
}

fn session_config(oauth_base: &str, secret: &str) -> SessionConfig {
    SessionConfig {
        app: OAuthApp {
            client_id: "cid".into(),
            client_secret: "csecret".into(),
            redirect_uri: "http://127.0.0.1:8501/github/callback".into(),
        },
        jwt_secret: secret.into(),
        ttl: Duration::minutes(30),
        oauth_base: oauth_base.into(),
        exchange_timeout: StdDuration::from_secs(5),
    }
}

fn session_token(secret: &str, issued_at: chrono::DateTime<Utc>) -> String {
    SessionAuthenticator::new(session_config("https://github.com", secret))
        .unwrap()
        .issue_at("gho_user", issued_at)
        .unwrap()
        .access_token
}

fn review_request(token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/review_pr/")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn forbid_any_call(server: &MockServer) {
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

async fn mount_open_pr(server: &MockServer, number: u64, files: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/acme/widgets/pulls/{number}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": number,
            "title": "Update docs",
            "state": "open",
            "html_url": format!("https://github.com/acme/widgets/pull/{number}"),
            "merged": false
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/acme/widgets/pulls/{number}/files")))
        .respond_with(ResponseTemplate::new(200).set_body_json(files))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_returns_authorize_url() {
    let up = Upstreams::start().await;
    let request = Request::builder()
        .uri("/login/github")
        .body(Body::empty())
        .unwrap();

    let response = up.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with(&format!("{}/login/oauth/authorize?", up.oauth.uri())));
    assert!(url.contains("client_id=cid"));
}

#[tokio::test]
async fn callback_issues_bearer_session() {
    let up = Upstreams::start().await;
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "gho_user",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&up.oauth)
        .await;

    let request = Request::builder()
        .uri("/github/callback?code=abc123")
        .body(Body::empty())
        .unwrap();
    let response = up.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap();
    let claims = SessionAuthenticator::new(session_config(&up.oauth.uri(), JWT_SECRET))
        .unwrap()
        .validate(token)
        .unwrap();
    assert_eq!(claims.sub, "gho_user");
}

#[tokio::test]
async fn callback_without_code_is_bad_request() {
    let up = Upstreams::start().await;
    forbid_any_call(&up.oauth).await;

    let request = Request::builder()
        .uri("/github/callback")
        .body(Body::empty())
        .unwrap();
    let response = up.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn callback_without_provider_token_is_auth_failure() {
    let up = Upstreams::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "bad_verification_code"
        })))
        .mount(&up.oauth)
        .await;

    let request = Request::builder()
        .uri("/github/callback?code=stale")
        .body(Body::empty())
        .unwrap();
    let response = up.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "GITHUB_AUTH_FAILED");
}

#[tokio::test]
async fn review_without_credential_is_unauthorized() {
    let up = Upstreams::start().await;
    forbid_any_call(&up.github).await;

    let response = up
        .router()
        .oneshot(review_request(
            None,
            json!({ "repository_url": "https://github.com/acme/widgets", "pr_number": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    assert_eq!(body_json(response).await["error"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn review_with_forged_credential_is_forbidden() {
    let up = Upstreams::start().await;
    forbid_any_call(&up.github).await;
    let forged = session_token("someone-elses-secret", Utc::now());

    let response = up
        .router()
        .oneshot(review_request(
            Some(&forged),
            json!({ "repository_url": "https://github.com/acme/widgets", "pr_number": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "INVALID_TOKEN");
}

#[tokio::test]
async fn review_with_expired_credential_reports_expiry() {
    let up = Upstreams::start().await;
    forbid_any_call(&up.github).await;
    let expired = session_token(JWT_SECRET, Utc::now() - Duration::hours(2));

    let response = up
        .router()
        .oneshot(review_request(
            Some(&expired),
            json!({ "repository_url": "https://github.com/acme/widgets", "pr_number": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "TOKEN_EXPIRED");
    assert_eq!(body["detail"], "Token has expired");
}

#[tokio::test]
async fn missing_pull_request_is_not_found_with_number() {
    let up = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&up.github)
        .await;
    forbid_any_call(&up.llm).await;
    let token = session_token(JWT_SECRET, Utc::now());

    let response = up
        .router()
        .oneshot(review_request(
            Some(&token),
            json!({ "repository_url": "https://github.com/acme/widgets", "pr_number": 99 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "PR_NOT_FOUND");
    assert!(body["detail"].as_str().unwrap().contains("#99"));
}

#[tokio::test]
async fn malformed_repository_url_is_bad_request() {
    let up = Upstreams::start().await;
    forbid_any_call(&up.github).await;
    let token = session_token(JWT_SECRET, Utc::now());

    let response = up
        .router()
        .oneshot(review_request(
            Some(&token),
            json!({ "repository_url": "not-a-url", "pr_number": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "INVALID_REPOSITORY_URL");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let up = Upstreams::start().await;
    let token = session_token(JWT_SECRET, Utc::now());

    let response = up
        .router()
        .oneshot(review_request(
            Some(&token),
            json!({ "repository_url": "https://github.com/acme/widgets" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn merged_pull_request_is_refused() {
    let up = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 5,
            "title": "Shipped",
            "state": "closed",
            "html_url": "https://github.com/acme/widgets/pull/5",
            "merged": true
        })))
        .mount(&up.github)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/5/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&up.github)
        .await;
    let token = session_token(JWT_SECRET, Utc::now());

    let response = up
        .router()
        .oneshot(review_request(
            Some(&token),
            json!({ "repository_url": "https://github.com/acme/widgets", "pr_number": 5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "PR_ALREADY_MERGED");
}

#[tokio::test]
async fn readme_only_pull_request_still_gets_feedback() {
    let up = Upstreams::start().await;
    mount_open_pr(
        &up.github,
        7,
        json!([{ "filename": "README.md", "status": "modified", "patch": "@@ -1 +1 @@\n+# Widgets" }]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "No Python code to review." } }]
        })))
        .expect(1)
        .mount(&up.llm)
        .await;
    let token = session_token(JWT_SECRET, Utc::now());

    let response = up
        .router()
        .oneshot(review_request(
            Some(&token),
            json!({ "repository_url": "https://github.com/acme/widgets/", "pr_number": 7 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["feedback"],
        format!("{}\nNo Python code to review.", pr_reviewer::FEEDBACK_HEADING)
    );
}

#[tokio::test]
async fn generation_failure_is_reported_as_review_failure() {
    let up = Upstreams::start().await;
    mount_open_pr(
        &up.github,
        8,
        json!([{ "filename": "app.py", "status": "added", "patch": "+print('hi')" }]),
    )
    .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&up.llm)
        .await;
    let token = session_token(JWT_SECRET, Utc::now());

    let response = up
        .router()
        .oneshot(review_request(
            Some(&token),
            json!({ "repository_url": "https://github.com/acme/widgets", "pr_number": 8 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "GENERATION_FAILED");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Failed to review pull request:"));
}
