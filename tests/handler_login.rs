mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{
    cookie_value, create_failing_test_server, create_test_server,
    create_test_server_with_idle_timeout, encode, location, set_cookie_named,
};
use std::time::Duration;

const LOGIN_ERROR: &str = "Invalid login name or password.";

async fn submit(server: &TestServer, fields: &[(&str, &str)]) -> axum_test::TestResponse {
    server.post("/login").form(&fields).await
}

/// Logs alice in through the form and returns the session cookie value.
async fn login_alice(server: &TestServer) -> String {
    let response = submit(server, &[("loginName", "alice"), ("password", "pw1")]).await;
    response.assert_status(StatusCode::SEE_OTHER);
    cookie_value(&response, "jtrac_session").unwrap()
}

// ─── GET /login ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_page_renders_form() {
    let server = create_test_server().await;

    let response = server.get("/login").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("JTrac Login"));
    assert!(html.contains(r#"name="loginName""#));
    assert!(html.contains(r#"name="password""#));
    assert!(html.contains(r#"name="rememberMe""#));
    assert!(html.contains("getElementById('loginName').focus()"));
    assert!(html.contains(env!("CARGO_PKG_VERSION")));
    assert!(!html.contains(LOGIN_ERROR));
    assert!(set_cookie_named(&response, "jtrac_session").is_none());
}

#[tokio::test]
async fn test_remember_me_cookie_logs_in_silently() {
    let server = create_test_server().await;

    let response = server
        .get("/login")
        .add_header("Cookie", format!("jtrac=alice:{}", encode("pw1")))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let session = cookie_value(&response, "jtrac_session").unwrap();

    let dashboard = server
        .get("/")
        .add_header("Cookie", format!("jtrac_session={session}"))
        .await;
    dashboard.assert_status_ok();
    assert!(dashboard.text().contains("Alice (alice)"));
}

#[tokio::test]
async fn test_malformed_remember_me_cookie_shows_form() {
    let server = create_test_server().await;

    let response = server.get("/login").add_header("Cookie", "jtrac=alice").await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"name="loginName""#));
    assert!(set_cookie_named(&response, "jtrac_session").is_none());
}

#[tokio::test]
async fn test_remember_me_cookie_for_unknown_user_shows_form() {
    let server = create_test_server().await;

    let response = server
        .get("/login")
        .add_header("Cookie", format!("jtrac=bob:{}", encode("pw1")))
        .await;

    response.assert_status_ok();
    assert!(!response.text().contains(LOGIN_ERROR));
}

#[tokio::test]
async fn test_remember_me_cookie_with_stale_password_shows_form() {
    let server = create_test_server().await;

    let response = server
        .get("/login")
        .add_header("Cookie", format!("jtrac=alice:{}", encode("old")))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_first_valid_remember_me_cookie_wins() {
    let server = create_test_server().await;

    let response = server
        .get("/login")
        .add_header(
            "Cookie",
            format!("jtrac=garbage; jtrac=bob:x; jtrac=alice:{}", encode("pw1")),
        )
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

// ─── POST /login ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_unknown_user() {
    let server = create_test_server().await;

    let response = submit(&server, &[("loginName", "bob"), ("password", "pw1")]).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(LOGIN_ERROR));
    assert!(html.contains(r#"value="bob""#));
    assert!(set_cookie_named(&response, "jtrac_session").is_none());
    assert!(set_cookie_named(&response, "jtrac").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = create_test_server().await;

    let response = submit(
        &server,
        &[
            ("loginName", "alice"),
            ("password", "wrong"),
            ("rememberMe", "on"),
        ],
    )
    .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(LOGIN_ERROR));
    assert!(html.contains("getElementById('password').focus()"));
    assert!(set_cookie_named(&response, "jtrac").is_none());
}

#[tokio::test]
async fn test_login_empty_password() {
    let server = create_test_server().await;

    let response = submit(&server, &[("loginName", "alice"), ("password", "")]).await;

    response.assert_status_ok();
    assert!(response.text().contains(LOGIN_ERROR));
    assert!(set_cookie_named(&response, "jtrac_session").is_none());
}

#[tokio::test]
async fn test_login_missing_fields() {
    let server = create_test_server().await;

    let response = submit(&server, &[]).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(LOGIN_ERROR));
    assert!(html.contains("getElementById('loginName').focus()"));
}

#[tokio::test]
async fn test_login_success_without_remember_me() {
    let server = create_test_server().await;

    let response = submit(&server, &[("loginName", "alice"), ("password", "pw1")]).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(cookie_value(&response, "jtrac_session").is_some());
    assert!(set_cookie_named(&response, "jtrac").is_none());
}

#[tokio::test]
async fn test_login_success_with_remember_me() {
    let server = create_test_server().await;

    let response = submit(
        &server,
        &[
            ("loginName", "alice"),
            ("password", "pw1"),
            ("rememberMe", "on"),
        ],
    )
    .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let cookie = set_cookie_named(&response, "jtrac").unwrap();
    assert!(cookie.starts_with(&format!("jtrac=alice:{};", encode("pw1"))));
    assert!(cookie.contains("Max-Age=2592000"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_issued_remember_me_cookie_round_trips() {
    let server = create_test_server().await;

    let response = submit(
        &server,
        &[
            ("loginName", "alice"),
            ("password", "pw1"),
            ("rememberMe", "on"),
        ],
    )
    .await;
    let token = cookie_value(&response, "jtrac").unwrap();

    let silent = server
        .get("/login")
        .add_header("Cookie", format!("jtrac={token}"))
        .await;

    silent.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&silent), "/");
}

// ─── Sessions and access control ─────────────────────────────────────────────

#[tokio::test]
async fn test_protected_page_requires_login() {
    let server = create_test_server().await;

    let response = server.get("/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_returns_to_original_destination() {
    let server = create_test_server().await;

    let response = server.get("/?tab=open").await;
    let session = cookie_value(&response, "jtrac_session").unwrap();

    let login = server
        .post("/login")
        .add_header("Cookie", format!("jtrac_session={session}"))
        .form(&[("loginName", "alice"), ("password", "pw1")])
        .await;

    login.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&login), "/?tab=open");

    let rotated = cookie_value(&login, "jtrac_session").unwrap();
    assert_ne!(rotated, session);

    // The pre-login id no longer grants access.
    server
        .get("/")
        .add_header("Cookie", format!("jtrac_session={session}"))
        .await
        .assert_status(StatusCode::SEE_OTHER);

    server
        .get("/")
        .add_header("Cookie", format!("jtrac_session={rotated}"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_dashboard_shows_logged_in_user() {
    let server = create_test_server().await;
    let session = login_alice(&server).await;

    let response = server
        .get("/")
        .add_header("Cookie", format!("jtrac_session={session}"))
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Welcome, Alice (alice)"));
    assert!(html.contains(r#"href="/logout""#));
}

#[tokio::test]
async fn test_logout_clears_session_and_cookies() {
    let server = create_test_server().await;
    let session = login_alice(&server).await;

    let response = server
        .get("/logout")
        .add_header("Cookie", format!("jtrac_session={session}"))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(set_cookie_named(&response, "jtrac").unwrap().contains("Max-Age=0"));
    assert!(
        set_cookie_named(&response, "jtrac_session")
            .unwrap()
            .contains("Max-Age=0")
    );

    server
        .get("/")
        .add_header("Cookie", format!("jtrac_session={session}"))
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_unknown_session_id_is_treated_as_anonymous() {
    let server = create_test_server().await;

    let response = server
        .get("/")
        .add_header("Cookie", "jtrac_session=does-not-exist")
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_active_session_outlives_idle_timeout() {
    let server = create_test_server_with_idle_timeout(time::Duration::seconds(1)).await;
    let session = login_alice(&server).await;

    // Requests spaced inside the timeout keep the session alive well past
    // one timeout from login.
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(400)).await;
        server
            .get("/")
            .add_header("Cookie", format!("jtrac_session={session}"))
            .await
            .assert_status_ok();
    }

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let response = server
        .get("/")
        .add_header("Cookie", format!("jtrac_session={session}"))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

// ─── User store failures ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_remember_me_lookup_failure_shows_form() {
    let server = create_failing_test_server();

    let response = server
        .get("/login")
        .add_header("Cookie", "jtrac=alice:x")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"name="loginName""#));
    assert!(set_cookie_named(&response, "jtrac_session").is_none());
}

#[tokio::test]
async fn test_login_submit_lookup_failure_is_server_error() {
    let server = create_failing_test_server();

    let response = submit(&server, &[("loginName", "alice"), ("password", "pw1")]).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert!(set_cookie_named(&response, "jtrac").is_none());
    assert!(set_cookie_named(&response, "jtrac_session").is_none());
}
