use crate::models::err::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_lib::{effective_preview, ProjectFilter};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateUrl};

/// 项目信息
#[derive(Deserialize, Debug, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[schema(example = "0192f5c4-6a1e-7c3b-9d2e-4f5a6b7c8d9e")]
    /// 项目ID
    pub id: String,

    #[schema(example = "Alpha Site")]
    /// 项目名称
    pub name: String,

    /// 项目描述
    pub description: String,

    #[schema(example = "https://alpha.dev")]
    /// 项目地址
    pub url: String,

    #[schema(example = "Web")]
    /// 项目分类：Web / App / Experimental / Media
    pub category: String,

    /// 项目标签
    pub tags: Vec<String>,

    /// 手动设置的预览图
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,

    /// 最终展示的预览图，未设置预览图时由截图服务生成
    pub preview_url: String,

    #[schema(example = 0)]
    /// 排序值，越小越靠前
    pub rank: i32,

    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl From<database::ProjectInfo> for ProjectInfo {
    fn from(p: database::ProjectInfo) -> Self {
        Self {
            preview_url: effective_preview(p.preview.as_deref(), &p.url),
            id: p.id,
            name: p.name,
            description: p.description,
            url: p.url,
            category: p.category,
            tags: p.tags,
            preview: p.preview,
            rank: p.rank,
            created_at: p.created_at,
        }
    }
}

fn default_category() -> String {
    database::models::project::DEFAULT_CATEGORY.to_string()
}

/// 新建项目
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectCreate {
    #[schema(example = "Alpha Site")]
    #[validate(length(min = 1, max = 200))]
    /// 项目名称，不能为空
    pub name: String,

    /// 项目描述，必填，可以为空字符串
    pub description: String,

    #[schema(example = "https://alpha.dev")]
    #[validate(url)]
    /// 项目地址
    pub url: String,

    #[schema(example = "Web")]
    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 50))]
    /// 项目分类
    pub category: String,

    #[serde(default)]
    /// 项目标签
    pub tags: Vec<String>,

    #[serde(default)]
    /// 预览图地址，可为空
    pub preview: Option<String>,
}

impl ProjectCreate {
    /// 规范化后校验，并转换为仓库层参数
    pub fn into_validated(mut self) -> AppResult<database::ProjectCreate> {
        self.name = self.name.trim().to_string();
        self.url = self.url.trim().to_string();
        self.category = self.category.trim().to_string();
        self.tags = normalize_tags(self.tags);
        self.preview = self.preview.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());

        self.validate()?;
        validate_preview(self.preview.as_deref())?;

        Ok(database::ProjectCreate {
            name: self.name,
            description: self.description,
            url: self.url,
            category: self.category,
            tags: self.tags,
            preview: self.preview,
        })
    }
}

/// 更新项目
///
/// 除 `id` 外都是可选字段，未提供的字段保持不变。`preview` 传空字符串表示清除预览图。
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectUpdate {
    #[schema(example = "0192f5c4-6a1e-7c3b-9d2e-4f5a6b7c8d9e")]
    /// 要更新的项目ID，必填
    pub id: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(url)]
    pub url: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    pub tags: Option<Vec<String>>,

    pub preview: Option<String>,
}

impl ProjectUpdate {
    /// 取出项目ID并校验其余字段
    pub fn into_validated(mut self) -> AppResult<(String, database::ProjectUpdate)> {
        let id = self
            .id
            .take()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::invalid_input("ID is required"))?;

        self.name = self.name.map(|s| s.trim().to_string());
        self.url = self.url.map(|s| s.trim().to_string());
        self.category = self.category.map(|s| s.trim().to_string());
        self.tags = self.tags.map(normalize_tags);
        self.preview = self.preview.map(|p| p.trim().to_string());

        self.validate()?;
        validate_preview(self.preview.as_deref())?;

        Ok((
            id,
            database::ProjectUpdate {
                name: self.name,
                description: self.description,
                url: self.url,
                category: self.category,
                tags: self.tags,
                preview: self.preview,
            },
        ))
    }
}

/// 搜索项目
///
/// 所有条件同时满足才会返回，结果保持列表的展示顺序
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ProjectSearch {
    #[schema(example = "alpha")]
    #[validate(length(max = 100))]
    #[serde(default)]
    /// 名称或描述包含的文字（不区分大小写）
    pub query: Option<String>,

    #[schema(example = "App")]
    #[validate(length(max = 50))]
    #[serde(default)]
    /// 项目分类，不传或传 `All` 表示全部分类
    pub category: Option<String>,

    #[serde(default)]
    /// 必须全部包含的标签
    pub tags: Vec<String>,
}

impl From<ProjectSearch> for ProjectFilter {
    fn from(search: ProjectSearch) -> Self {
        ProjectFilter {
            category: search.category,
            ..ProjectFilter::new(search.query.unwrap_or_default(), search.tags)
        }
    }
}

/// 删除项目的查询参数
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    /// 要删除的项目ID
    pub id: Option<String>,
}

/// 重排提交中的一项，其余字段会被忽略
#[derive(Deserialize, Debug, ToSchema)]
pub struct ReorderItem {
    pub id: String,
}

/// 重排提交
///
/// `items` 的顺序就是新的展示顺序，第 i 项的 rank 会被设置为 i
#[derive(Deserialize, Debug, ToSchema)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

impl ReorderRequest {
    pub fn into_ids(self) -> Vec<String> {
        self.items.into_iter().map(|item| item.id).collect()
    }
}

/// 去掉首尾空白和空标签，重复标签只保留第一次出现的
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

/// 预览图为空字符串时表示不设置（或清除），否则必须是合法的地址
fn validate_preview(preview: Option<&str>) -> AppResult<()> {
    match preview {
        Some(p) if !p.is_empty() && !p.validate_url() => Err(AppError::invalid_input("preview must be a valid URL")),
        _ => Ok(()),
    }
}
