//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository Trait 设计模式 🎯
//!
//! 所有 Repository trait 都遵循统一的约束：
//!
//! ```rust,ignore
//! pub trait XxxRepositoryTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send` / `Sync`：仓库实例放在 `Arc` 里被多个并发请求共享
//! - `'static`：仓库作为应用服务长期存活，不依赖短期引用
//!
//! 同一个 trait 目前有两个实现：
//!
//! - [`crate::ProjectRepository`]：PostgreSQL
//! - [`crate::FileProjectRepository`]：本地 JSON 文件
//!
//! 服务层只依赖 trait，启动时根据配置选择具体实现：
//!
//! ```rust,ignore
//! let service = match &config.storage {
//!     StorageBackend::Postgres { .. } => ProjectService::new(ProjectRepository::new(pool)),
//!     StorageBackend::File { path } => ProjectService::new(FileProjectRepository::new(path)),
//! };
//! ```

pub mod project;

// 重新导出
pub use project::ProjectRepositoryTrait;
