#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use database::FileProjectRepository;
use http_body_util::BodyExt;
use serde_json::Value;
use shared_lib::{AppConfig, StorageBackend};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use web_service::routes::create_app_router;
use web_service::services::ProjectService;
use web_service::AppState;

pub const TEST_PASSWORD: &str = "s3cret";

/// 登录后浏览器会带上的 cookie
pub const ADMIN_COOKIE: &str = "admin_authenticated=true";

/// 使用临时目录里的 JSON 文件作为存储的完整应用
pub struct TestApp {
    pub router: Router,
    pub repo: FileProjectRepository,
    _dir: TempDir,
}

pub fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    let repo = FileProjectRepository::new(path.clone());

    let config = AppConfig {
        storage: StorageBackend::File { path },
        admin_password: TEST_PASSWORD.to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        cookie_secure: false,
        import_file: None,
    };
    let state = AppState::new(Arc::new(ProjectService::new(repo.clone())), Arc::new(config));

    TestApp {
        router: create_app_router(state),
        repo,
        _dir: dir,
    }
}

pub async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn send_raw(app: &TestApp, method: Method, uri: &str, raw: &'static str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.router
        .clone()
        .oneshot(builder.body(Body::from(raw)).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// 以管理员身份新建项目，返回项目 id
pub async fn create(app: &TestApp, name: &str, tags: &[&str]) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/v1/projects",
        Some(serde_json::json!({
            "name": name,
            "description": format!("{name} description"),
            "url": "https://example.com",
            "tags": tags,
        })),
        Some(ADMIN_COOKIE),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    body_json(response).await["data"]["id"].as_str().unwrap().to_string()
}

/// 当前展示顺序里的项目名称
pub async fn listed_names(app: &TestApp) -> Vec<String> {
    let response = send(app, Method::GET, "/api/v1/projects", None, None).await;
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}
