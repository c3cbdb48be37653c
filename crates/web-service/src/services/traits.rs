//! 服务层 trait 定义
//!
//! 定义服务层的抽象接口，遵循六边形架构的端口适配器模式

use crate::auth::AdminCapability;
use crate::models::err::AppResult;
use database::{ProjectCreate, ProjectInfo, ProjectUpdate};
use shared_lib::ProjectFilter;

/// 项目服务 trait 定义
///
/// 定义了项目相关的业务逻辑接口，作为应用层的端口(Port)
///
/// 读取类方法不需要授权；修改类方法必须传入 [`AdminCapability`]。
/// 该 trait 作为业务逻辑的抽象接口，具体实现由 [`crate::services::ProjectService`] 提供，
/// 在 [`crate::AppState`] 中以 trait object 的形式保存。
#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync + 'static {
    /// 按展示顺序列出全部项目
    async fn list_projects(&self) -> AppResult<Vec<ProjectInfo>>;

    /// 按搜索词和标签过滤项目，结果保持展示顺序
    async fn search_projects(&self, filter: ProjectFilter) -> AppResult<Vec<ProjectInfo>>;

    /// 全部项目标签的并集，按字典序排列
    async fn list_tags(&self) -> AppResult<Vec<String>>;

    /// 根据 ID 获取项目信息
    async fn get_project(&self, id: &str) -> AppResult<ProjectInfo>;

    /// 创建新项目
    async fn create_project(&self, admin: &AdminCapability, project: ProjectCreate) -> AppResult<ProjectInfo>;

    /// 更新项目信息
    async fn update_project(&self, admin: &AdminCapability, id: &str, update: ProjectUpdate) -> AppResult<ProjectInfo>;

    /// 删除项目，返回被删除的项目信息
    async fn delete_project(&self, admin: &AdminCapability, id: &str) -> AppResult<ProjectInfo>;

    /// 提交重排，返回实际更新的项目数量
    async fn reorder_projects(&self, admin: &AdminCapability, ids: Vec<String>) -> AppResult<u64>;
}
