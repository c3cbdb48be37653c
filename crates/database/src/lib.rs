//! 数据库操作模块
//!
//! 这个模块提供了项目存储的抽象接口和两种实现：
//! - PostgreSQL（连接池 + 迁移）
//! - 本地 JSON 文件

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{initialize_database, DatabasePool};
pub use error::DatabaseError;
pub use models::project::{ProjectCreate, ProjectInfo, ProjectUpdate};
pub use repositories::{file::FileProjectRepository, project::ProjectRepository, traits::ProjectRepositoryTrait};

/// 数据库操作结果类型
pub type DatabaseResult<T> = Result<T, DatabaseError>;
