//! 项目仓库 trait 定义
//!
//! 定义项目存储操作的抽象接口

use crate::models::project::{ProjectCreate, ProjectInfo, ProjectUpdate};
use crate::DatabaseResult;

/// 项目仓库trait定义
///
/// 定义了项目相关的存储操作接口，支持：
/// - 按展示顺序列出全部项目
/// - 项目创建（自动分配 id / rank / 创建时间）
/// - 项目查询、更新、删除
/// - 重排提交（整批原子生效）
/// - 导入已有记录（迁移数据用）
#[async_trait::async_trait]
pub trait ProjectRepositoryTrait: Send + Sync + 'static {
    /// 列出全部项目
    ///
    /// 按 `rank` 升序排列，`rank` 相同时按创建时间倒序，与物理存储顺序无关。
    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectInfo>>;

    /// 根据 ID 获取项目信息
    ///
    /// # 错误
    /// id 不存在时返回 [`crate::DatabaseError::NotFound`]
    async fn get_project_by_id(&self, id: &str) -> DatabaseResult<ProjectInfo>;

    /// 创建新项目
    ///
    /// 新项目的 `rank` 为当前最大值 + 1（集合为空时为 1），排在最后。
    ///
    /// # 返回值
    /// 返回创建的项目信息，包含分配的 id、rank 和创建时间
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo>;

    /// 更新项目信息
    ///
    /// 只修改 `update` 中提供的字段，`rank` 和创建时间保持不变。
    ///
    /// # 错误
    /// id 不存在时返回 [`crate::DatabaseError::NotFound`]
    async fn update_project(&self, id: &str, update: ProjectUpdate) -> DatabaseResult<ProjectInfo>;

    /// 删除项目
    ///
    /// 重复删除同一个 id 时第二次返回 [`crate::DatabaseError::NotFound`]。
    ///
    /// # 返回值
    /// 返回被删除的项目信息
    async fn delete_project(&self, id: &str) -> DatabaseResult<ProjectInfo>;

    /// 提交重排
    ///
    /// 把 `ids[i]` 的 `rank` 设置为 `i`。不存在的 id 直接跳过，未出现在序列中的项目保持原 rank。
    /// 所有写入要么全部生效，要么全部不生效。
    ///
    /// # 返回值
    /// 实际被更新的项目数量
    async fn reorder_projects(&self, ids: &[String]) -> DatabaseResult<u64>;

    /// 导入已有的项目记录
    ///
    /// 原样保留 `id`、`rank` 和创建时间，已存在的 id 直接跳过，所以重复导入同一份数据是安全的。
    ///
    /// # 返回值
    /// 实际新增的项目数量
    async fn import_projects(&self, projects: &[ProjectInfo]) -> DatabaseResult<u64>;
}
