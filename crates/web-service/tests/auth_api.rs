//! 登录、退出和授权检查

mod common;

use axum::http::{header, Method, StatusCode};
use common::{body_json, build_test_app, send, ADMIN_COOKIE, TEST_PASSWORD};
use database::ProjectRepositoryTrait;
use serde_json::json;

#[tokio::test]
async fn login_sets_admin_cookie() {
    let app = build_test_app();

    let response = send(&app, Method::POST, "/api/v1/auth/login", Some(json!({ "password": TEST_PASSWORD })), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("admin_authenticated=true"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(!cookie.contains("Secure"));
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = build_test_app();

    let response = send(&app, Method::POST, "/api/v1/auth/login", Some(json!({ "password": "guess" })), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(response).await["error"], "Unauthorized");
}

#[tokio::test]
async fn auth_check_reflects_cookie() {
    let app = build_test_app();

    let anonymous = send(&app, Method::GET, "/api/v1/auth/check", None, None).await;
    assert_eq!(anonymous.status(), StatusCode::OK);
    assert_eq!(body_json(anonymous).await, json!({ "isAuthenticated": false }));

    let admin = send(&app, Method::GET, "/api/v1/auth/check", None, Some(ADMIN_COOKIE)).await;
    assert_eq!(body_json(admin).await, json!({ "isAuthenticated": true }));
}

#[tokio::test]
async fn logout_expires_cookie() {
    let app = build_test_app();

    let response = send(&app, Method::POST, "/api/v1/auth/logout", None, Some(ADMIN_COOKIE)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("admin_authenticated="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn mutations_without_cookie_leave_store_unchanged() {
    let app = build_test_app();
    let id = common::create(&app, "Alpha", &[]).await;
    let before = app.repo.list_projects().await.unwrap();

    let attempts = [
        (Method::POST, "/api/v1/projects".to_string(), Some(json!({ "name": "B", "url": "https://b.dev" }))),
        (Method::PUT, "/api/v1/projects".to_string(), Some(json!({ "id": id, "name": "Renamed" }))),
        (Method::DELETE, format!("/api/v1/projects?id={id}"), None),
        (Method::PUT, "/api/v1/projects/reorder".to_string(), Some(json!({ "items": [{ "id": id }] }))),
    ];

    for (method, uri, body) in attempts {
        let response = send(&app, method, &uri, body, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let after = app.repo.list_projects().await.unwrap();
    assert_eq!(
        before.iter().map(|p| (&p.id, &p.name, p.rank)).collect::<Vec<_>>(),
        after.iter().map(|p| (&p.id, &p.name, p.rank)).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn unauthorized_is_checked_before_body() {
    let app = build_test_app();

    let response = common::send_raw(&app, Method::PUT, "/api/v1/projects/reorder", "{not json", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
