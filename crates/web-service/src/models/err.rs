use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use color_eyre::eyre::Error;
use database::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 修改类接口缺少管理员凭证
    #[error("Unauthorized")]
    Unauthorized,

    /// 请求体格式错误或缺少必填字段
    #[error("{0}")]
    InvalidInput(String),

    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 仓库层错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

/// 接口统一的结果类型
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn invalid_input<T: ToString>(msg: T) -> Self {
        Self::InvalidInput(msg.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(format!("Invalid body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidInput(format!("Invalid query: {}", rejection.body_text()))
    }
}

/// Tell axum how to convert `AppError` into a response.
///
/// 存储层和内部错误只记录日志，返回给调用方的是通用的提示信息。
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ValidationFailed(err) => (StatusCode::BAD_REQUEST, format!("Validate failed: {err}")),
            AppError::RepositoryError(err) if err.is_not_found() => (StatusCode::NOT_FOUND, "Project not found".to_string()),
            AppError::RepositoryError(err) => {
                error!("❌ 存储操作失败: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to access project storage".to_string())
            }
            AppError::InternalError(err) => {
                error!("❌ 内部错误: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AppError::invalid_input("ID is required"), StatusCode::BAD_REQUEST),
            (AppError::from(DatabaseError::not_found("p1")), StatusCode::NOT_FOUND),
            (AppError::from(DatabaseError::IdExhausted), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::from(color_eyre::eyre::eyre!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
