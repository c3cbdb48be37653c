//! 列表过滤视图
//!
//! 根据存储中的项目列表加上临时的界面状态（搜索词、分类、已选标签）计算出最终展示的内容。
//! 过滤只会移除元素，不会改变顺序，基础顺序就是存储层 `list` 返回的顺序。

use std::collections::BTreeSet;

/// 可被搜索和按标签过滤的记录
pub trait Searchable {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;
    fn tags(&self) -> &[String];
}

/// 表示「不按分类过滤」的分类名
pub const ALL_CATEGORIES: &str = "All";

/// 过滤条件，三个条件同时满足才算匹配
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// 对名称或描述做不区分大小写的子串匹配，空字符串匹配全部。
    ///
    /// 匹配前会去掉首尾空白，所以 `"app "` 与 `"app"` 等价，也能匹配 `Apple`。
    pub query: String,

    /// 分类必须完全一致；`None` 或 `"All"` 匹配全部
    pub category: Option<String>,

    /// 项目的标签集合必须包含全部已选标签（AND 语义），空集合匹配全部
    pub tags: BTreeSet<String>,
}

impl ProjectFilter {
    pub fn new<I, S>(query: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: query.into(),
            category: None,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.wanted_category().is_none() && self.tags.is_empty()
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.matches_query(item) && self.matches_category(item) && self.matches_tags(item)
    }

    fn wanted_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
    }

    fn matches_category<T: Searchable>(&self, item: &T) -> bool {
        self.wanted_category().is_none_or(|wanted| item.category() == wanted)
    }

    fn matches_query<T: Searchable>(&self, item: &T) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        item.name().to_lowercase().contains(&needle) || item.description().to_lowercase().contains(&needle)
    }

    fn matches_tags<T: Searchable>(&self, item: &T) -> bool {
        self.tags
            .iter()
            .all(|wanted| item.tags().iter().any(|tag| tag == wanted))
    }

    /// 过滤并保持原有顺序
    pub fn apply<T: Searchable>(&self, items: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// 所有已加载项目的标签并集，去重后按字典序排列
pub fn available_tags<'a, T, I>(items: I) -> Vec<String>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .flat_map(|item| item.tags().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
