use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 管理员登录请求
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    /// 管理员共享口令
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest").field("password", &"***").finish()
    }
}

/// 当前请求的登录状态
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    #[schema(example = false)]
    pub is_authenticated: bool,
}
