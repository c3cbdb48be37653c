//! 项目数据库模型
//!
//! 定义项目相关的数据库模型结构体。
//!
//! [`ProjectInfo`] 同时也是文件存储中 JSON 数组的元素格式（字段名为 camelCase）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_lib::{Ranked, Searchable};

/// 旧数据缺少分类时使用的默认值
pub const DEFAULT_CATEGORY: &str = "Web";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// 项目信息结构体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// 排序提示，加入 rank 之前的旧数据默认为 0
    #[serde(default)]
    pub rank: i32,
    pub created_at: DateTime<Utc>,
}

impl Ranked for ProjectInfo {
    fn id(&self) -> &str {
        &self.id
    }

    fn rank(&self) -> i32 {
        self.rank
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Searchable for ProjectInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// 项目创建参数
///
/// `id`、`rank`、`created_at` 由存储层分配
#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub preview: Option<String>,
}

/// 项目更新参数
///
/// 为 `None` 的字段保持不变。`preview` 传入空字符串表示清除预览图。
/// `rank` 和 `created_at` 不允许通过更新修改。
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub preview: Option<String>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.preview.is_none()
    }

    /// 把更新合并到已有记录上
    pub fn apply_to(self, project: &mut ProjectInfo) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(url) = self.url {
            project.url = url;
        }
        if let Some(category) = self.category {
            project.category = category;
        }
        if let Some(tags) = self.tags {
            project.tags = tags;
        }
        if let Some(preview) = self.preview {
            project.preview = Some(preview).filter(|p| !p.is_empty());
        }
    }
}
