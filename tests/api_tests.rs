//! Integration tests for the Learnly API endpoints
//!
//! Drives the real router through `tower::ServiceExt::oneshot` with a
//! temporary flat-file user store and no upstream API keys configured, so
//! every test exercises the offline-deterministic paths: auth flows,
//! validation errors, session gating, soft-fail search, and the
//! configuration-error path of the generation endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

use learnly::config::Config;
use learnly::{build_router, AppState};

/// Test app plus the TempDir keeping its user store alive
struct TestApp {
    app: Router,
    _dir: TempDir,
}

fn setup_app() -> TestApp {
    let dir = TempDir::new().expect("temp dir");
    let config = Config {
        port: 0,
        gemini_api_key: None,
        youtube_api_key: None,
        users_file: dir.path().join("users.json"),
    };
    let state = AppState::new(&config).expect("app state");
    TestApp {
        app: build_router(state),
        _dir: dir,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json_with_cookie(uri: &str, body: Value, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

/// Pull the `name=value` pair out of a Set-Cookie response header
fn session_cookie_pair(response: &axum::response::Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

fn signup_body(name: &str, email: &str, password: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": password,
        "confirm_password": password,
    })
}

/// Register an account and return the session cookie pair
async fn signup_session(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/api/auth/signup", signup_body("Ada", email, "secret1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_pair(&response)
}

// =============================================================================
// Health endpoint
// =============================================================================

#[tokio::test]
async fn test_health_no_auth_required() {
    let TestApp { app, _dir } = setup_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Learnly API is running");
    assert_eq!(body["gemini_status"], "not configured");
}

// =============================================================================
// Signup validation
// =============================================================================

#[tokio::test]
async fn test_signup_success_sets_session_cookie() {
    let TestApp { app, _dir } = setup_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/signup",
            signup_body("Ada", "Ada@Example.com", "secret1"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie_pair(&response);
    assert!(cookie.starts_with("learnly_session="));

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["name"], "Ada");
    // Email key is normalized
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_signup_missing_fields_is_400() {
    let TestApp { app, _dir } = setup_app();

    let response = app
        .oneshot(post_json("/api/auth/signup", json!({"email": "a@b.com"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "All fields are required");
}

#[tokio::test]
async fn test_signup_password_mismatch_is_400() {
    let TestApp { app, _dir } = setup_app();

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({
                "name": "Ada",
                "email": "a@b.com",
                "password": "secret1",
                "confirm_password": "secret2",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Passwords do not match");
}

#[tokio::test]
async fn test_signup_short_password_is_400() {
    let TestApp { app, _dir } = setup_app();

    // "ééééé" is five characters but ten UTF-8 bytes; the minimum is
    // measured in characters
    for short in ["abc", "ééééé"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/signup",
                signup_body("Ada", "a@b.com", short),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "password {:?} should be rejected",
            short
        );
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "Password must be at least 6 characters");
    }
}

#[tokio::test]
async fn test_signup_malformed_email_is_400() {
    let TestApp { app, _dir } = setup_app();

    for bad_email in ["no-at-sign.com", "no-dot@domain", "two@@x.com"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/auth/signup",
                signup_body("Ada", bad_email, "secret1"),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "email {:?} should be rejected",
            bad_email
        );
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "Invalid email format");
    }
}

#[tokio::test]
async fn test_signup_duplicate_email_is_409() {
    let TestApp { app, _dir } = setup_app();

    signup_session(&app, "a@b.com").await;

    // Same address with different case and surrounding whitespace
    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            signup_body("Bea", "  A@B.com ", "other-secret"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "User already exists with this email");
}

// =============================================================================
// Signin
// =============================================================================

#[tokio::test]
async fn test_signin_success_after_signup() {
    let TestApp { app, _dir } = setup_app();
    signup_session(&app, "a@b.com").await;

    let response = app
        .oneshot(post_json(
            "/api/auth/signin",
            json!({"email": "a@b.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie_pair(&response).starts_with("learnly_session="));

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "a@b.com");
}

#[tokio::test]
async fn test_signin_missing_fields_is_400() {
    let TestApp { app, _dir } = setup_app();

    let response = app
        .oneshot(post_json("/api/auth/signin", json!({"email": "a@b.com"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn test_signin_failures_share_one_message() {
    let TestApp { app, _dir } = setup_app();
    signup_session(&app, "a@b.com").await;

    // Wrong password for an existing account
    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/auth/signin",
            json!({"email": "a@b.com", "password": "wrong-password"}),
        ))
        .await
        .unwrap();

    // Unknown account entirely
    let unknown_user = app
        .oneshot(post_json(
            "/api/auth/signin",
            json!({"email": "ghost@b.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // No user-enumeration distinction between the two failures
    let body_a = extract_json(wrong_password.into_body()).await;
    let body_b = extract_json(unknown_user.into_body()).await;
    assert_eq!(body_a["error"], "Invalid email or password");
    assert_eq!(body_a["error"], body_b["error"]);
}

// =============================================================================
// Session lifecycle: check and signout
// =============================================================================

#[tokio::test]
async fn test_auth_check_reflects_session_state() {
    let TestApp { app, _dir } = setup_app();

    let anonymous = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/check")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::OK);
    let body = extract_json(anonymous.into_body()).await;
    assert_eq!(body["authenticated"], false);
    assert!(body.get("user").is_none());

    let cookie = signup_session(&app, "a@b.com").await;
    let signed_in = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/check")
                .header(header::COOKIE, cookie.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = extract_json(signed_in.into_body()).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], "a@b.com");
    assert_eq!(body["user"]["name"], "Ada");
}

#[tokio::test]
async fn test_signout_invalidates_session() {
    let TestApp { app, _dir } = setup_app();
    let cookie = signup_session(&app, "a@b.com").await;

    let response = app
        .clone()
        .oneshot(post_json_with_cookie("/api/auth/signout", json!({}), &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    // The old token no longer authenticates
    let after = app
        .oneshot(post_json_with_cookie(
            "/api/chat",
            json!({"message": "hi"}),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Session gating of proxy endpoints
// =============================================================================

#[tokio::test]
async fn test_proxy_endpoints_require_session() {
    let TestApp { app, _dir } = setup_app();

    let cases = [
        ("/api/chat", json!({"message": "hi"})),
        ("/api/gemini", json!({"message": "hi"})),
        ("/api/generate-course", json!({"topic": "Rust"})),
        ("/api/search-videos", json!({"query": "rust"})),
    ];

    for (uri, body) in cases {
        let response = app.clone().oneshot(post_json(uri, body)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} should require a session",
            uri
        );
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "Authentication required");
    }
}

#[tokio::test]
async fn test_proxy_endpoints_validate_input() {
    let TestApp { app, _dir } = setup_app();
    let cookie = signup_session(&app, "a@b.com").await;

    let cases = [
        ("/api/chat", json!({}), "Message is required"),
        ("/api/gemini", json!({}), "Missing message"),
        ("/api/generate-course", json!({}), "Topic is required"),
        ("/api/search-videos", json!({}), "Search query is required"),
    ];

    for (uri, body, expected) in cases {
        let response = app
            .clone()
            .oneshot(post_json_with_cookie(uri, body, &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], expected);
    }
}

// =============================================================================
// Upstream degradation policies
// =============================================================================

#[tokio::test]
async fn test_search_without_key_returns_empty_list_not_error() {
    let TestApp { app, _dir } = setup_app();
    let cookie = signup_session(&app, "a@b.com").await;

    let response = app
        .oneshot(post_json_with_cookie(
            "/api/search-videos",
            json!({"query": "rust tutorials"}),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["videos"], json!([]));
}

#[tokio::test]
async fn test_generation_endpoints_without_key_are_500() {
    let TestApp { app, _dir } = setup_app();
    let cookie = signup_session(&app, "a@b.com").await;

    let cases = [
        ("/api/chat", json!({"message": "hi"})),
        ("/api/gemini", json!({"message": "hi"})),
        ("/api/generate-course", json!({"topic": "Rust"})),
    ];

    for (uri, body) in cases {
        let response = app
            .clone()
            .oneshot(post_json_with_cookie(uri, body, &cookie))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{} should fail without a configured key",
            uri
        );
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "Gemini API is not configured on the server");
    }
}
