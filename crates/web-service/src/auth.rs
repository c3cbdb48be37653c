//! 管理员凭证
//!
//! 登录成功后服务端下发一个 `admin_authenticated` cookie，之后每个请求都只检查这个 cookie 是否存在，
//! 服务端不保存任何会话状态。
//!
//! 每个请求都会提取出一个 [`AuthContext`]，修改类接口必须先通过 [`AuthContext::require_admin`]
//! 拿到 [`AdminCapability`]，服务层的修改方法只接受这个凭证，没有凭证就无法触达存储层。

use crate::models::err::AppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::convert::Infallible;
use tracing::warn;

/// 管理员 cookie 名称
pub const ADMIN_COOKIE: &str = "admin_authenticated";

/// 登录状态保持一周
pub const ADMIN_COOKIE_MAX_AGE: time::Duration = time::Duration::weeks(1);

/// 修改操作的授权凭证
///
/// 只能通过 [`AuthContext::require_admin`] 获得
#[derive(Debug, Clone, Copy)]
pub struct AdminCapability {
    _private: (),
}

/// 单个请求的授权上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    is_admin: bool,
}

impl AuthContext {
    pub fn new(is_admin: bool) -> Self {
        Self { is_admin }
    }

    pub fn from_jar(jar: &CookieJar) -> Self {
        Self::new(jar.get(ADMIN_COOKIE).is_some())
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// 获取修改操作的授权凭证，未登录时返回 [`AppError::Unauthorized`]
    pub fn require_admin(&self) -> Result<AdminCapability, AppError> {
        if self.is_admin {
            Ok(AdminCapability { _private: () })
        } else {
            warn!("🚫 未登录的修改请求被拒绝");
            Err(AppError::Unauthorized)
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_jar(&CookieJar::from_headers(&parts.headers)))
    }
}

/// 登录成功后下发的 cookie
pub fn admin_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE, "true"))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(ADMIN_COOKIE_MAX_AGE)
        .path("/")
        .build()
}

/// 退出登录时用来删除 cookie，path 必须与下发时一致
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(ADMIN_COOKIE).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    #[test]
    fn test_cookie_presence_grants_capability() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; admin_authenticated=true"));

        let ctx = AuthContext::from_jar(&CookieJar::from_headers(&headers));

        assert!(ctx.is_admin());
        assert!(ctx.require_admin().is_ok());
    }

    #[test]
    fn test_missing_cookie_is_unauthorized() {
        let ctx = AuthContext::from_jar(&CookieJar::from_headers(&HeaderMap::new()));

        assert!(!ctx.is_admin());
        assert!(matches!(ctx.require_admin(), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_admin_cookie_attributes() {
        let cookie = admin_cookie(true).to_string();

        assert!(cookie.starts_with("admin_authenticated=true"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));
    }
}
