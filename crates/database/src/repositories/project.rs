//! 项目仓库（PostgreSQL）
//!
//! 负责项目相关的数据库操作

use crate::models::project::{ProjectCreate, ProjectInfo, ProjectUpdate};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use shared_lib::assign_positions;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

/// 查询返回的列，顺序与 [`ProjectInfo`] 字段一致
const COLUMNS: &str = "id, name, description, url, category, tags, preview, rank, created_at";

/// 生成的 id 与已有记录冲突时最多重试的次数
const MAX_ID_ATTEMPTS: usize = 3;

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    /// 按展示顺序列出全部项目
    ///
    /// 最后的 `id` 排序只用来保证结果稳定。
    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectInfo>> {
        debug!("🔍 查询全部项目");

        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY rank ASC, created_at DESC, id ASC");
        let projects = sqlx::query_as::<_, ProjectInfo>(&query).fetch_all(&self.pool).await?;

        debug!("✅ 查询完成 - 共 {} 个项目", projects.len());
        Ok(projects)
    }

    async fn get_project_by_id(&self, id: &str) -> DatabaseResult<ProjectInfo> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 LIMIT 1");
        sqlx::query_as::<_, ProjectInfo>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(id))
    }

    /// 创建新项目
    ///
    /// ## SQL
    ///
    /// rank 在同一条 `INSERT ... SELECT` 里通过 `COALESCE(MAX(rank), 0) + 1` 计算，
    /// 聚合查询在表为空时也会返回一行，所以第一个项目的 rank 为 1。
    ///
    /// id 使用 UUIDv7，唯一性由主键保证：`ON CONFLICT DO NOTHING` 没有返回行时重新生成 id。
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        debug!("📝 创建项目: {:#?}", project);

        let query = format!(
            r#"
            INSERT INTO projects (id, name, description, url, category, tags, preview, rank, created_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, COALESCE(MAX(rank), 0) + 1, now()
            FROM projects
            ON CONFLICT (id) DO NOTHING
            RETURNING {COLUMNS}
            "#
        );

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = Uuid::now_v7().to_string();
            let created = sqlx::query_as::<_, ProjectInfo>(&query)
                .bind(&id)
                .bind(&project.name)
                .bind(&project.description)
                .bind(&project.url)
                .bind(&project.category)
                .bind(&project.tags)
                .bind(&project.preview)
                .fetch_optional(&self.pool)
                .await?;

            match created {
                Some(info) => {
                    debug!("✅ 项目创建成功: {:#?}", info);
                    return Ok(info);
                }
                None => warn!("⚠️ 项目 id 冲突，重新生成: {}", id),
            }
        }

        Err(DatabaseError::IdExhausted)
    }

    /// 更新项目信息
    ///
    /// ## SQL
    ///
    /// 更新数据中的字段都是[`Option`]，使用`coalesce`函数把 `None`（数据库null）转换为之前的值，
    /// 这样不用`if`拼接SQL。`preview` 额外用 `NULLIF` 把空字符串转成 null，表示清除。
    async fn update_project(&self, id: &str, update: ProjectUpdate) -> DatabaseResult<ProjectInfo> {
        debug!("🔄 更新项目 {} 信息: {:#?}", id, update);

        let query = format!(
            r#"
            UPDATE projects
            SET name = coalesce($2, name),
                description = coalesce($3, description),
                url = coalesce($4, url),
                category = coalesce($5, category),
                tags = coalesce($6, tags),
                preview = CASE WHEN $7::text IS NULL THEN preview ELSE NULLIF($7::text, '') END
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        let project = sqlx::query_as::<_, ProjectInfo>(&query)
            .bind(id)
            .bind(update.name)
            .bind(update.description)
            .bind(update.url)
            .bind(update.category)
            .bind(update.tags)
            .bind(update.preview)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(id))?;

        debug!("✅ 项目更新成功: {:#?}", project);
        Ok(project)
    }

    async fn delete_project(&self, id: &str) -> DatabaseResult<ProjectInfo> {
        debug!("🗑️ 删除项目: {}", id);

        let query = format!("DELETE FROM projects WHERE id = $1 RETURNING {COLUMNS}");
        let project = sqlx::query_as::<_, ProjectInfo>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(id))?;

        debug!("✅ 项目删除成功: {}", project.id);
        Ok(project)
    }

    /// 提交重排
    ///
    /// 所有 rank 写入放在同一个事务中，任意一条失败时事务回滚（`tx` 被 drop 时自动回滚），
    /// 不会出现部分项目已更新、部分未更新的情况。
    async fn reorder_projects(&self, ids: &[String]) -> DatabaseResult<u64> {
        debug!("🔀 重排项目: {:?}", ids);

        let positions = assign_positions(ids);
        let mut tx = self.pool.begin().await?;
        let mut updated = 0;

        for (id, rank) in &positions {
            let result = sqlx::query("UPDATE projects SET rank = $2 WHERE id = $1")
                .bind(id)
                .bind(rank)
                .execute(&mut *tx)
                .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;

        debug!("✅ 重排完成 - 提交 {} 个，更新 {} 个", positions.len(), updated);
        Ok(updated)
    }

    /// 导入已有的项目记录
    ///
    /// ## SQL
    ///
    /// `ON CONFLICT (id) DO NOTHING` 跳过已存在的 id，整批在一个事务中完成。
    async fn import_projects(&self, projects: &[ProjectInfo]) -> DatabaseResult<u64> {
        debug!("📦 导入 {} 个项目", projects.len());

        let mut tx = self.pool.begin().await?;
        let mut imported = 0;

        for project in projects {
            let result = sqlx::query(
                r#"
                INSERT INTO projects (id, name, description, url, category, tags, preview, rank, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&project.id)
            .bind(&project.name)
            .bind(&project.description)
            .bind(&project.url)
            .bind(&project.category)
            .bind(&project.tags)
            .bind(&project.preview)
            .bind(project.rank)
            .bind(project.created_at)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                debug!("⏭️ 已存在，跳过: {} ({})", project.name, project.id);
            }
            imported += result.rows_affected();
        }

        tx.commit().await?;

        debug!("✅ 导入完成 - 新增 {} 个", imported);
        Ok(imported)
    }
}
