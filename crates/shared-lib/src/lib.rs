//! 🔧 共享库模块
//!
//! 这个模块包含了在多个服务之间共享的通用代码，包括：
//! - 程序配置
//! - 项目排序规则（rank 分配与重排）
//! - 列表过滤视图（搜索 + 分类 + 标签）
//! - 客户端拖拽重排的本地状态
//! - 预览图地址推导

pub mod board;
pub mod listing;
pub mod models;
pub mod preview;
pub mod ranking;

// 重新导出常用类型
pub use board::ProjectBoard;
pub use listing::{available_tags, ProjectFilter, Searchable, ALL_CATEGORIES};
pub use models::{AppConfig, StorageBackend};
pub use preview::effective_preview;
pub use ranking::{assign_positions, compare_display_order, next_rank, sort_for_display, Ranked};
