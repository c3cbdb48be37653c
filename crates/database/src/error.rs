use thiserror::Error;

/// 数据库操作错误类型
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLX 错误
    #[error("数据库操作错误: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// 连接错误
    #[error("数据库连接错误: {0}")]
    ConnectionError(String),

    /// 迁移错误
    #[error("数据库迁移错误: {0}")]
    MigrationError(String),

    /// 记录不存在
    #[error("项目不存在: {0}")]
    NotFound(String),

    /// 数据文件读写错误
    #[error("数据文件读写错误: {0}")]
    Io(#[from] std::io::Error),

    /// 数据文件格式错误
    #[error("数据文件格式错误: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 多次生成的 id 都已存在
    #[error("无法生成唯一的项目 id")]
    IdExhausted,
}

impl DatabaseError {
    /// 创建连接错误
    pub fn connection<T: ToString>(msg: T) -> Self {
        Self::ConnectionError(msg.to_string())
    }

    /// 创建迁移错误
    pub fn migration<T: ToString>(msg: T) -> Self {
        Self::MigrationError(msg.to_string())
    }

    /// 创建记录不存在错误
    pub fn not_found<T: ToString>(id: T) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::SqlxError(sqlx::Error::RowNotFound))
    }
}
