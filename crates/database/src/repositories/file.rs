//! 项目仓库（本地 JSON 文件）
//!
//! 数据保存为一个 JSON 数组，适合没有数据库的部署环境。
//!
//! - 文件不存在时视为空集合
//! - 所有写操作在同一把互斥锁内完成「读取 -> 修改 -> 写回」
//! - 写回时先写临时文件再 `rename`，文件不会处于写了一半的状态

use crate::models::project::{ProjectCreate, ProjectInfo, ProjectUpdate};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use chrono::Utc;
use shared_lib::{assign_positions, next_rank, sort_for_display};
use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// 生成的 id 与已有记录冲突时最多重试的次数
const MAX_ID_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct FileProjectRepository {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl FileProjectRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> DatabaseResult<Vec<ProjectInfo>> {
        match tokio::fs::read(self.path.as_path()).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, projects: &[ProjectInfo]) -> DatabaseResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let data = serde_json::to_vec_pretty(projects)?;
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, self.path.as_path()).await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for FileProjectRepository {
    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectInfo>> {
        debug!("🔍 读取项目文件: {}", self.path.display());

        let mut projects = self.load().await?;
        sort_for_display(&mut projects);

        debug!("✅ 读取完成 - 共 {} 个项目", projects.len());
        Ok(projects)
    }

    async fn get_project_by_id(&self, id: &str) -> DatabaseResult<ProjectInfo> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        self.load()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DatabaseError::not_found(id))
    }

    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        debug!("📝 创建项目: {:#?}", project);

        let _guard = self.write_lock.lock().await;
        let mut projects = self.load().await?;

        let mut id = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = Uuid::now_v7().to_string();
            if projects.iter().any(|p| p.id == candidate) {
                warn!("⚠️ 项目 id 冲突，重新生成: {}", candidate);
                continue;
            }
            id = Some(candidate);
            break;
        }
        let id = id.ok_or(DatabaseError::IdExhausted)?;

        let info = ProjectInfo {
            id,
            name: project.name,
            description: project.description,
            url: project.url,
            category: project.category,
            tags: project.tags,
            preview: project.preview,
            rank: next_rank(projects.iter().map(|p| p.rank)),
            created_at: Utc::now(),
        };

        projects.push(info.clone());
        self.save(&projects).await?;

        debug!("✅ 项目创建成功: {:#?}", info);
        Ok(info)
    }

    async fn update_project(&self, id: &str, update: ProjectUpdate) -> DatabaseResult<ProjectInfo> {
        debug!("🔄 更新项目 {} 信息: {:#?}", id, update);

        let _guard = self.write_lock.lock().await;
        let mut projects = self.load().await?;

        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DatabaseError::not_found(id))?;
        update.apply_to(project);
        let updated = project.clone();

        self.save(&projects).await?;

        debug!("✅ 项目更新成功: {:#?}", updated);
        Ok(updated)
    }

    async fn delete_project(&self, id: &str) -> DatabaseResult<ProjectInfo> {
        debug!("🗑️ 删除项目: {}", id);

        let _guard = self.write_lock.lock().await;
        let mut projects = self.load().await?;

        let index = projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DatabaseError::not_found(id))?;
        let removed = projects.remove(index);

        self.save(&projects).await?;

        debug!("✅ 项目删除成功: {}", removed.id);
        Ok(removed)
    }

    /// 提交重排
    ///
    /// 所有 rank 在内存中改完后一次性写回文件，写回失败时文件保持原样。
    async fn reorder_projects(&self, ids: &[String]) -> DatabaseResult<u64> {
        debug!("🔀 重排项目: {:?}", ids);

        let _guard = self.write_lock.lock().await;
        let mut projects = self.load().await?;

        let positions: HashMap<String, i32> = assign_positions(ids).into_iter().collect();
        let mut updated = 0;
        for project in projects.iter_mut() {
            if let Some(&rank) = positions.get(&project.id) {
                project.rank = rank;
                updated += 1;
            }
        }

        if updated > 0 {
            self.save(&projects).await?;
        }

        debug!("✅ 重排完成 - 提交 {} 个，更新 {} 个", positions.len(), updated);
        Ok(updated)
    }

    async fn import_projects(&self, projects: &[ProjectInfo]) -> DatabaseResult<u64> {
        debug!("📦 导入 {} 个项目到 {}", projects.len(), self.path.display());

        let _guard = self.write_lock.lock().await;
        let mut existing = self.load().await?;

        let mut known: HashSet<String> = existing.iter().map(|p| p.id.clone()).collect();
        let mut imported = 0;
        for project in projects {
            if known.insert(project.id.clone()) {
                existing.push(project.clone());
                imported += 1;
            } else {
                debug!("⏭️ 已存在，跳过: {} ({})", project.name, project.id);
            }
        }

        if imported > 0 {
            self.save(&existing).await?;
        }

        debug!("✅ 导入完成 - 新增 {} 个", imported);
        Ok(imported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, FileProjectRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileProjectRepository::new(dir.path().join("data").join("projects.json"));
        (dir, repo)
    }

    fn new_project(name: &str) -> ProjectCreate {
        ProjectCreate {
            name: name.to_string(),
            description: format!("{name} description"),
            url: format!("https://{}.dev", name.to_lowercase()),
            category: "Web".to_string(),
            tags: vec!["web".to_string()],
            preview: None,
        }
    }

    fn names(projects: &[ProjectInfo]) -> Vec<&str> {
        projects.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_collection() {
        let (_dir, repo) = repo();

        assert!(repo.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ranks() {
        let (_dir, repo) = repo();

        let a = repo.create_project(new_project("A")).await.unwrap();
        let b = repo.create_project(new_project("B")).await.unwrap();

        assert_eq!(a.rank, 1);
        assert_eq!(b.rank, 2);
        assert_ne!(a.id, b.id);
        assert_eq!(names(&repo.list_projects().await.unwrap()), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_create_appends_after_max_rank() {
        let (_dir, repo) = repo();
        let a = repo.create_project(new_project("A")).await.unwrap();
        repo.create_project(new_project("B")).await.unwrap();
        repo.reorder_projects(&[a.id.clone()]).await.unwrap();

        // A 变为 0，B 仍为 2，新项目应为 3
        let c = repo.create_project(new_project("C")).await.unwrap();

        assert_eq!(c.rank, 3);
    }

    #[tokio::test]
    async fn test_reorder_rewrites_ranks_by_position() {
        let (_dir, repo) = repo();
        let a = repo.create_project(new_project("A")).await.unwrap();
        let b = repo.create_project(new_project("B")).await.unwrap();
        let c = repo.create_project(new_project("C")).await.unwrap();

        let updated = repo
            .reorder_projects(&[b.id.clone(), a.id.clone(), c.id.clone()])
            .await
            .unwrap();

        assert_eq!(updated, 3);
        let projects = repo.list_projects().await.unwrap();
        assert_eq!(names(&projects), vec!["B", "A", "C"]);
        assert_eq!(projects.iter().map(|p| p.rank).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_reorder_skips_unknown_ids() {
        let (_dir, repo) = repo();
        let a = repo.create_project(new_project("A")).await.unwrap();
        let b = repo.create_project(new_project("B")).await.unwrap();

        let updated = repo
            .reorder_projects(&["ghost".to_string(), b.id.clone()])
            .await
            .unwrap();

        assert_eq!(updated, 1);
        assert_eq!(repo.get_project_by_id(&b.id).await.unwrap().rank, 1);
        // 未出现在序列中的项目保持原 rank
        assert_eq!(repo.get_project_by_id(&a.id).await.unwrap().rank, 1);
    }

    #[tokio::test]
    async fn test_failed_reorder_leaves_ranks_untouched() {
        let (_dir, repo) = repo();
        let a = repo.create_project(new_project("A")).await.unwrap();
        let b = repo.create_project(new_project("B")).await.unwrap();

        // 临时文件的位置被目录占用，写回必然失败
        let mut tmp = repo.path().as_os_str().to_owned();
        tmp.push(".tmp");
        tokio::fs::create_dir(PathBuf::from(tmp)).await.unwrap();

        let result = repo.reorder_projects(&[b.id.clone(), a.id.clone()]).await;

        assert!(result.is_err());
        let projects = repo.list_projects().await.unwrap();
        assert_eq!(
            projects.iter().map(|p| (p.name.as_str(), p.rank)).collect::<Vec<_>>(),
            vec![("A", 1), ("B", 2)]
        );
    }

    #[tokio::test]
    async fn test_import_keeps_fields_and_skips_existing_ids() {
        let (_dir, source) = repo();
        let a = source.create_project(new_project("A")).await.unwrap();
        let b = source.create_project(new_project("B")).await.unwrap();
        source.reorder_projects(&[b.id.clone(), a.id.clone()]).await.unwrap();
        let records = source.list_projects().await.unwrap();

        let (_target_dir, target) = repo();
        let existing = target.create_project(new_project("Existing")).await.unwrap();

        assert_eq!(target.import_projects(&records).await.unwrap(), 2);
        // 重复导入不会产生新记录
        assert_eq!(target.import_projects(&records).await.unwrap(), 0);

        let imported_b = target.get_project_by_id(&b.id).await.unwrap();
        assert_eq!(imported_b, records[0]);
        assert_eq!(imported_b.rank, 0);
        assert_eq!(target.get_project_by_id(&a.id).await.unwrap().created_at, a.created_at);
        assert_eq!(target.list_projects().await.unwrap().len(), 3);
        assert_eq!(target.get_project_by_id(&existing.id).await.unwrap(), existing);
    }

    #[tokio::test]
    async fn test_update_keeps_rank_and_created_at() {
        let (_dir, repo) = repo();
        let a = repo.create_project(new_project("A")).await.unwrap();

        let updated = repo
            .update_project(
                &a.id,
                ProjectUpdate {
                    name: Some("A2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "A2");
        assert_eq!(updated.description, a.description);
        assert_eq!(updated.rank, a.rank);
        assert_eq!(updated.created_at, a.created_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id_is_not_found() {
        let (_dir, repo) = repo();

        let err = repo.update_project("nope", ProjectUpdate::default()).await.unwrap_err();
        assert!(err.is_not_found());

        let err = repo.delete_project("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_second_delete_fails() {
        let (_dir, repo) = repo();
        let a = repo.create_project(new_project("A")).await.unwrap();
        repo.create_project(new_project("B")).await.unwrap();

        repo.delete_project(&a.id).await.unwrap();

        assert_eq!(names(&repo.list_projects().await.unwrap()), vec!["B"]);
        assert!(repo.delete_project(&a.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_reads_legacy_file_and_orders_by_rank_then_newest() {
        let (_dir, repo) = repo();
        tokio::fs::create_dir_all(repo.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(
            repo.path(),
            r#"[
                {"id": "1", "name": "Older", "url": "https://o.dev", "createdAt": "2024-01-01T00:00:00Z"},
                {"id": "2", "name": "Newer", "url": "https://n.dev", "createdAt": "2024-06-01T00:00:00Z"},
                {"id": "3", "name": "Ranked", "url": "https://r.dev", "rank": -1, "createdAt": "2023-01-01T00:00:00Z"}
            ]"#,
        )
        .await
        .unwrap();

        let projects = repo.list_projects().await.unwrap();

        assert_eq!(names(&projects), vec!["Ranked", "Newer", "Older"]);
    }
}
