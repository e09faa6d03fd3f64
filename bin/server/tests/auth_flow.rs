//! End-to-end tests for the session-gated OAuth flow, driven through the
//! assembled router with the Google endpoints mocked out.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum_extra::extract::cookie::Key;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use classhub_google::{ClassroomClient, IdentityResolver};
use classhub_server::app;
use classhub_server::auth::GoogleOAuthClient;
use classhub_server::config::GoogleCredentials;
use classhub_server::error::ErrorTranslator;
use classhub_server::state::AppState;
use classhub_session::SessionStore;

fn test_state(server_uri: &str) -> AppState {
    let credentials = GoogleCredentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_uri: "http://localhost:3000/auth".to_string(),
    };
    let oauth = GoogleOAuthClient::new(&credentials)
        .expect("oauth client")
        .with_endpoints(
            format!("{server_uri}/consent"),
            format!("{server_uri}/token"),
        );

    AppState {
        sessions: SessionStore::new(),
        oauth,
        identity: IdentityResolver::with_base_url(server_uri),
        classroom: ClassroomClient::with_base_url(server_uri),
        errors: ErrorTranslator::new(false),
        cookie_key: Key::derive_from(b"an-integration-test-secret-at-least-32-bytes"),
        secure_cookies: false,
    }
}

/// Mounts the happy-path Google mocks: token exchange for `VALIDCODE`,
/// rejection for `USEDCODE`, the People identity, and one course.
async fn mount_google_mocks(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("code=USEDCODE"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "error": "invalid_grant" })),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.test-access",
            "token_type": "Bearer",
            "expires_in": 3599,
            "refresh_token": "1//test-refresh"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/people/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "names": [{ "displayName": "Jane Doe" }],
            "emailAddresses": [{ "value": "jane@example.com" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "courses": [{ "id": "1", "name": "Biology" }]
        })))
        .mount(server)
        .await;
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("session="))
        .map(|value| value.split(';').next().unwrap_or(value).to_string())
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn get(app: &axum::Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

#[tokio::test]
async fn protected_path_without_session_redirects_to_login() {
    let server = MockServer::start().await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/courses", None).await;

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn login_redirects_to_consent_with_scope_and_offline_access() {
    let server = MockServer::start().await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/login", None).await;

    assert!(response.status().is_redirection());
    let target = location(&response).to_string();
    let url = url::Url::parse(&target).expect("consent URL");
    assert!(url.as_str().contains("access_type=offline"));
    assert!(url.as_str().contains("classroom.courses.readonly"));
    assert!(url.as_str().contains("client_id=test-client"));
}

#[tokio::test]
async fn auth_without_code_is_a_client_error() {
    let server = MockServer::start().await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/auth", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("Code not found."));
}

#[tokio::test]
async fn full_login_flow_returns_to_the_requested_page() {
    let server = MockServer::start().await;
    mount_google_mocks(&server).await;
    let app = app::router(test_state(&server.uri()));

    // Blocked request captures /courses as the post-login target.
    let response = get(&app, "/courses", None).await;
    assert_eq!(location(&response), "/login");
    let cookie = session_cookie(&response).expect("session cookie");

    // Completing the exchange lands back on the captured target.
    let response = get(&app, "/auth?code=VALIDCODE", Some(&cookie)).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/courses");

    // The gate now passes and the handler renders the course list.
    let response = get(&app, "/courses", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Biology"));
    assert!(body.contains("Jane Doe"));
}

#[tokio::test]
async fn redirect_target_is_consumed_once() {
    let server = MockServer::start().await;
    mount_google_mocks(&server).await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/courseworks", None).await;
    let cookie = session_cookie(&response).expect("session cookie");

    let response = get(&app, "/auth?code=VALIDCODE", Some(&cookie)).await;
    assert_eq!(location(&response), "/courseworks");

    // A second callback must not see the stale target.
    let response = get(&app, "/auth?code=VALIDCODE", Some(&cookie)).await;
    assert_eq!(location(&response), "/courses_create_edit");
}

#[tokio::test]
async fn captured_redirect_target_keeps_the_query_string() {
    let server = MockServer::start().await;
    mount_google_mocks(&server).await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/courses?page=2", None).await;
    assert_eq!(location(&response), "/login");
    let cookie = session_cookie(&response).expect("session cookie");

    let response = get(&app, "/auth?code=VALIDCODE", Some(&cookie)).await;
    assert_eq!(location(&response), "/courses?page=2");
}

#[tokio::test]
async fn auth_without_pending_target_lands_on_the_default_page() {
    let server = MockServer::start().await;
    mount_google_mocks(&server).await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/auth?code=VALIDCODE", None).await;

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/courses_create_edit");
}

#[tokio::test]
async fn replayed_code_fails_without_touching_the_session() {
    let server = MockServer::start().await;
    mount_google_mocks(&server).await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/courses", None).await;
    let cookie = session_cookie(&response).expect("session cookie");
    let response = get(&app, "/auth?code=VALIDCODE", Some(&cookie)).await;
    assert!(response.status().is_redirection());

    // Replaying a consumed code is rejected upstream and surfaces as 500,
    // with no internal detail in the production body.
    let response = get(&app, "/auth?code=USEDCODE", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(body.contains("Authentication failed"));
    assert!(!body.contains("invalid_grant"));

    // The session established by the first login is unchanged.
    let response = get(&app, "/courses", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let server = MockServer::start().await;
    mount_google_mocks(&server).await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/courses", None).await;
    let cookie = session_cookie(&response).expect("session cookie");
    get(&app, "/auth?code=VALIDCODE", Some(&cookie)).await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");

    // The destroyed session no longer passes the gate.
    let response = get(&app, "/courses", Some(&cookie)).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn logout_with_a_stale_cookie_is_a_server_error() {
    let server = MockServer::start().await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/courses", None).await;
    let cookie = session_cookie(&response).expect("session cookie");

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert!(response.status().is_redirection());

    // The cookie now points at a destroyed session; destruction fails.
    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(body.contains("Could not log out"));
}

#[tokio::test]
async fn unmatched_path_renders_the_error_view() {
    let server = MockServer::start().await;
    let app = app::router(test_state(&server.uri()));

    let response = get(&app, "/definitely/not/a/route", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_string(response).await;
    assert!(body.contains("404"));
    assert!(body.contains("Not Found"));
}
