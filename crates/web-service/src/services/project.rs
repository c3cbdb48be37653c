//! 项目服务
//!
//! 提供项目相关的业务逻辑操作

use crate::auth::AdminCapability;
use crate::models::err::AppResult;
use crate::services::traits::ProjectServiceTrait;
use database::{ProjectCreate, ProjectInfo, ProjectRepositoryTrait, ProjectUpdate};
use shared_lib::{available_tags, ProjectFilter};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProjectService<PR: ProjectRepositoryTrait> {
    project_repository: PR,
}

impl<PR: ProjectRepositoryTrait> ProjectService<PR> {
    pub fn new(project_repository: PR) -> Self {
        Self { project_repository }
    }
}

#[async_trait::async_trait]
impl<PR: ProjectRepositoryTrait> ProjectServiceTrait for ProjectService<PR> {
    async fn list_projects(&self) -> AppResult<Vec<ProjectInfo>> {
        Ok(self.project_repository.list_projects().await?)
    }

    async fn search_projects(&self, filter: ProjectFilter) -> AppResult<Vec<ProjectInfo>> {
        let projects = self.project_repository.list_projects().await?;
        Ok(filter.apply(projects))
    }

    async fn list_tags(&self) -> AppResult<Vec<String>> {
        let projects = self.project_repository.list_projects().await?;
        Ok(available_tags(&projects))
    }

    async fn get_project(&self, id: &str) -> AppResult<ProjectInfo> {
        Ok(self.project_repository.get_project_by_id(id).await?)
    }

    async fn create_project(&self, _admin: &AdminCapability, project: ProjectCreate) -> AppResult<ProjectInfo> {
        let project = self.project_repository.create_project(project).await?;
        info!("➕ 新建项目 {} ({}), rank = {}", project.name, project.id, project.rank);
        Ok(project)
    }

    async fn update_project(&self, _admin: &AdminCapability, id: &str, update: ProjectUpdate) -> AppResult<ProjectInfo> {
        let project = self.project_repository.update_project(id, update).await?;
        info!("✏️ 更新项目 {} ({})", project.name, project.id);
        Ok(project)
    }

    async fn delete_project(&self, _admin: &AdminCapability, id: &str) -> AppResult<ProjectInfo> {
        let project = self.project_repository.delete_project(id).await?;
        info!("🗑️ 删除项目 {} ({})", project.name, project.id);
        Ok(project)
    }

    async fn reorder_projects(&self, _admin: &AdminCapability, ids: Vec<String>) -> AppResult<u64> {
        let updated = self.project_repository.reorder_projects(&ids).await?;
        info!("🔀 重排项目：提交 {} 个，更新 {} 个", ids.len(), updated);
        Ok(updated)
    }
}
