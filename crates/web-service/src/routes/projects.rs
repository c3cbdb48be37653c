//! 项目相关接口
//!
//! 读取类接口不需要登录；修改类接口（新建、更新、删除、重排）需要管理员 cookie，
//! 授权检查先于请求体解析，未登录时一律返回 401，不会触达存储层。

use crate::auth::AuthContext;
use crate::models::common::{Reply, ReplyList, Success};
use crate::models::err::AppError;
use crate::models::projects::{DeleteQuery, ProjectCreate, ProjectInfo, ProjectSearch, ProjectUpdate, ReorderRequest};
use crate::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 列出全部项目
///
/// 按 `rank` 升序排列，`rank` 相同时较新的项目在前。
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All projects in display order", body = ReplyList<ProjectInfo>)
    ),
)]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<ReplyList<ProjectInfo>>, AppError> {
    debug!("📋 列出全部项目");

    let projects = state.project_service.list_projects().await?;

    Ok(Json(ReplyList::new(projects.into_iter().map(Into::into).collect())))
}

/// 根据搜索词、分类和标签过滤项目
///
/// 查询参数由 [`ProjectSearch`] 决定：
///
/// - `query`: 名称或描述包含该文字（不区分大小写），为空时不过滤
/// - `category`: 分类完全一致，不传或为 `All` 时不过滤
/// - `tags`: 项目必须包含全部标签，为空时不过滤
///
/// 过滤只会移除项目，不会改变展示顺序。
#[utoipa::path(post,
    path = "/search-projects",
    tag = "projects",
    request_body = ProjectSearch,
    responses(
        (status = 200, description = "Search results", body = ReplyList<ProjectInfo>),
        (status = 400, description = "Malformed search"),
    ),
)]
pub async fn find_projects(
    State(state): State<AppState>,
    payload: Result<Json<ProjectSearch>, JsonRejection>,
) -> Result<Json<ReplyList<ProjectInfo>>, AppError> {
    let Json(search) = payload?;
    debug!("🔍 搜索项目 {:#?}", search);

    // 验证输入参数，确保有效性
    search.validate()?;

    let projects = state.project_service.search_projects(search.into()).await?;

    Ok(Json(ReplyList::new(projects.into_iter().map(Into::into).collect())))
}

/// 全部可选标签
///
/// 所有项目标签的并集，去重后按字典序排列。
#[utoipa::path(get,
    path = "/project-tags",
    tag = "projects",
    responses(
        (status = 200, description = "Available tags", body = Reply<Vec<String>>)
    ),
)]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Reply<Vec<String>>>, AppError> {
    let tags = state.project_service.list_tags().await?;

    Ok(Json(Reply { data: tags }))
}

/// 查询指定项目信息
#[utoipa::path(get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Project", body = Reply<ProjectInfo>),
        (status = 404, description = "Project not found"),
    ),
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    debug!("Getting project id {}", project_id);

    let project = state.project_service.get_project(&project_id).await?;

    Ok(Json(Reply { data: project.into() }))
}

/// 创建项目
///
/// 新项目排在最后（`rank` 为当前最大值 + 1），id 和创建时间由服务端生成。
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    request_body = ProjectCreate,
    responses(
        (status = 201, description = "Create project result", body = Reply<ProjectInfo>),
        (status = 400, description = "Invalid project fields"),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: Result<Json<ProjectCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Reply<ProjectInfo>>), AppError> {
    let admin = auth.require_admin()?;
    let Json(project) = payload?;
    debug!("Creating project {:#?}", project);

    let project = project.into_validated()?;
    let project = state.project_service.create_project(&admin, project).await?;

    Ok((StatusCode::CREATED, Json(Reply { data: project.into() })))
}

/// 更新项目信息
///
/// 请求体中的 `id` 指定要更新的项目，其余字段只更新提供了的部分，`rank` 和创建时间不会改变。
#[utoipa::path(put,
    path = "/projects",
    tag = "projects",
    request_body = ProjectUpdate,
    responses(
        (status = 200, description = "Updated project", body = Reply<ProjectInfo>),
        (status = 400, description = "Missing id or invalid fields"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: Result<Json<ProjectUpdate>, JsonRejection>,
) -> Result<Json<Reply<ProjectInfo>>, AppError> {
    let admin = auth.require_admin()?;
    let Json(info) = payload?;
    debug!("Updating project with {:#?}", info);

    let (project_id, update) = info.into_validated()?;
    let project = state.project_service.update_project(&admin, &project_id, update).await?;

    Ok(Json(Reply { data: project.into() }))
}

/// 删除指定的项目
///
/// 项目已经不存在时返回 404，调用方无法区分「已被删除」和「从未存在」。
#[utoipa::path(delete,
    path = "/projects",
    tag = "projects",
    params(DeleteQuery),
    responses(
        (status = 200, description = "Deleted", body = Success),
        (status = 400, description = "Missing id"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthContext,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Json<Success>, AppError> {
    let admin = auth.require_admin()?;
    let Query(query) = query?;
    debug!("delete project {:?}", query.id);

    let project_id = query
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::invalid_input("ID is required"))?;
    state.project_service.delete_project(&admin, &project_id).await?;

    Ok(Json(Success::ok()))
}

/// 提交拖拽后的新顺序
///
/// `items` 中第 i 个项目的 `rank` 被设置为 i，所有写入整体生效。
/// 已被删除的 id 会被跳过，不在列表中的项目保持原来的 `rank`。
///
/// 成功时不返回项目数据，客户端以本地的乐观顺序为准；失败时客户端应重新拉取列表。
#[utoipa::path(put,
    path = "/projects/reorder",
    tag = "projects",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Reordered", body = Success),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn reorder_projects(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<Success>, AppError> {
    let admin = auth.require_admin()?;
    let Json(request) = payload?;
    debug!("🔀 重排项目 {:?}", request);

    state.project_service.reorder_projects(&admin, request.into_ids()).await?;

    Ok(Json(Success::ok()))
}
