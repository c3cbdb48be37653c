//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 导出路由时传入共享数据 [`AppState`]，所有路由函数都可以访问。

use crate::routes::auth::__path_check_auth;
use crate::routes::auth::__path_login;
use crate::routes::auth::__path_logout;
use crate::routes::auth::{check_auth, login, logout};
use crate::routes::health::health_check;
use crate::routes::projects::__path_create_project;
use crate::routes::projects::__path_delete_project;
use crate::routes::projects::__path_find_projects;
use crate::routes::projects::__path_get_project;
use crate::routes::projects::__path_list_projects;
use crate::routes::projects::__path_list_tags;
use crate::routes::projects::__path_reorder_projects;
use crate::routes::projects::__path_update_project;
use crate::routes::projects::{
    create_project, delete_project, find_projects, get_project, list_projects, list_tags, reorder_projects,
    update_project,
};
use crate::AppState;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod auth;
pub mod health;
pub mod projects;

/// 导出当前App的所有路由
///
/// ## **❗️注意事项：**
///
/// 由于 [`routes!`] 宏限制，同一个宏里的接口必须是同一个路径，并且不能有相同类型的http方法。
/// `/projects` 的四个方法可以放在一起，`/projects/{id}` 和 `/projects/reorder` 需要拆开定义。
fn routers(state: AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_projects, create_project, update_project, delete_project))
        .routes(routes!(reorder_projects))
        .routes(routes!(get_project))
        .routes(routes!(find_projects))
        .routes(routes!(list_tags))
        .routes(routes!(check_auth))
        .routes(routes!(login))
        .routes(routes!(logout))
        .with_state(state)
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档
/// - 生成App路由
/// - 使用Scalar作为最终在线文档格式
/// - 健康检查 `/health`
///
/// 由于使用了 `utoipa` 库来自动化生成`openapi`文档，因此我们没有使用原生的 [`Router`]，而是使用了
/// [`OpenApiRouter`] 。
pub fn create_app_router(shared_state: AppState) -> Router {
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "projects", description = r#"
项目展示墙：

- 按 rank 排序的项目列表
- 拖拽重排后整体提交新顺序
- 按搜索词和标签过滤
            "#),
            (name = "auth", description = "管理员口令登录，修改类接口需要登录"),
        ),
    )]
    struct ApiDoc;

    // 使用`utoipa_axum`提供的OpenApiRouter来创建路由。
    // - router: Axum的Router，实际的路由对象
    // - api: utoipa的OpenApi，生成的OpenAPI对象
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1", routers(shared_state))
        .split_for_parts();

    // 合并文档路由，用户可通过 /docs 访问文档网页地址
    router
        .merge(Scalar::with_url("/docs", api))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}
