mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{app_state, user, FakeStore, StoreCall, GOOD_GOOGLE_TOKEN, SECRET};
use docsync_server::{router, Authenticator, HmacAuthenticator};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(store: Arc<FakeStore>) -> Router {
    router(app_state(store))
}

fn session_token() -> String {
    HmacAuthenticator::new(SECRET, 3600).issue(&user()).unwrap()
}

fn post_json(uri: &str, bearer: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_google_login_issues_session_token() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(
        app(store),
        post_json("/api/auth/google", None, json!({ "accessToken": GOOD_GOOGLE_TOKEN })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ada@example.com");

    let token = body["token"].as_str().unwrap();
    let claims = HmacAuthenticator::new(SECRET, 3600).verify(token).unwrap();
    assert_eq!(claims, user());
}

#[tokio::test]
async fn test_google_login_requires_access_token() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(app(store), post_json("/api/auth/google", None, json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Google access token is required");
}

#[tokio::test]
async fn test_google_login_rejected_by_identity_provider() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(
        app(store),
        post_json("/api/auth/google", None, json!({ "accessToken": "stolen" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication failed");
}

#[tokio::test]
async fn test_protected_route_without_bearer() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(app(store), get("/api/user/profile", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access token is required");
}

#[tokio::test]
async fn test_protected_route_with_forged_bearer() {
    let forged = HmacAuthenticator::new("other-secret", 3600)
        .issue(&user())
        .unwrap();
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(app(store), get("/api/user/profile", Some(&forged))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_profile_returns_claims() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(app(store), get("/api/user/profile", Some(&session_token()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["googleId"], "g-1");
    assert_eq!(body["user"]["name"], "Ada");
}

#[tokio::test]
async fn test_refresh_returns_valid_token() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(
        app(store),
        post_json("/api/auth/refresh", Some(&session_token()), json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    assert!(HmacAuthenticator::new(SECRET, 3600).verify(token).is_ok());
}

#[tokio::test]
async fn test_logout() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(
        app(store),
        post_json("/api/auth/logout", Some(&session_token()), json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_save_to_drive() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(
        app(store.clone()),
        post_json(
            "/api/save-to-drive",
            Some(&session_token()),
            json!({
                "title": "Notes",
                "content": "<h2>Plan</h2><p>Ship it</p>",
                "accessToken": "drive-token"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["documentId"], "doc-1");
    assert_eq!(
        body["documentUrl"],
        "https://docs.google.com/document/d/doc-1/edit"
    );

    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    match &calls[1] {
        StoreCall::BatchUpdate { token, batch, .. } => {
            assert_eq!(token, "drive-token");
            assert_eq!(batch.len(), 3);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[tokio::test]
async fn test_save_to_drive_requires_store_token() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(
        app(store.clone()),
        post_json(
            "/api/save-to-drive",
            Some(&session_token()),
            json!({ "content": "<p>x</p>" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No Google access token provided");
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_save_to_drive_store_failure() {
    let store = Arc::new(FakeStore {
        fail_create: true,
        ..FakeStore::default()
    });
    let (status, body) = send(
        app(store),
        post_json(
            "/api/save-to-drive",
            Some(&session_token()),
            json!({ "content": "<p>x</p>", "accessToken": "drive-token" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to save document to Google Drive");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_get_documents() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(
        app(store.clone()),
        get(
            "/api/get-documents?accessToken=drive-token",
            Some(&session_token()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["documents"], json!([]));
    assert_eq!(
        store.calls(),
        vec![StoreCall::List {
            token: "drive-token".to_string(),
            mime_type: "application/vnd.google-apps.document".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_google_url() {
    let store = Arc::new(FakeStore::default());
    let (status, body) = send(app(store), get("/api/auth/google/url", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://accounts.example.com/auth?client_id=test");
}

#[tokio::test]
async fn test_callback_redirects_with_token() {
    let store = Arc::new(FakeStore::default());
    let response = app(store)
        .oneshot(get("/auth/google/callback?code=good-code", None))
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers()[header::LOCATION],
        "http://frontend.test/auth-callback?token=exchanged+token"
    );
}

#[tokio::test]
async fn test_callback_redirects_to_error_page() {
    for uri in ["/auth/google/callback", "/auth/google/callback?code=bad"] {
        let store = Arc::new(FakeStore::default());
        let response = app(store).oneshot(get(uri, None)).await.unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers()[header::LOCATION],
            "http://frontend.test/auth-error"
        );
    }
}

#[tokio::test]
async fn test_security_headers() {
    let store = Arc::new(FakeStore::default());
    let response = app(store)
        .oneshot(get("/api/auth/google/url", None))
        .await
        .unwrap();
    let headers = response.headers();

    assert_eq!(headers["cross-origin-opener-policy"], "same-origin-allow-popups");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN");
    assert_eq!(headers[header::REFERRER_POLICY], "no-referrer");
    assert!(headers.contains_key(header::STRICT_TRANSPORT_SECURITY));
    assert!(!headers.contains_key("cross-origin-embedder-policy"));
}

#[tokio::test]
async fn test_security_headers_on_rejections() {
    let store = Arc::new(FakeStore::default());
    let response = app(store)
        .oneshot(get("/api/user/profile", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
}
