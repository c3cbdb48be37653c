//! 登录相关接口

use crate::auth::{admin_cookie, removal_cookie, AuthContext};
use crate::models::auth::{AuthStatus, LoginRequest};
use crate::models::common::Success;
use crate::models::err::AppError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

/// 查询当前是否已登录
#[utoipa::path(get,
    path = "/auth/check",
    tag = "auth",
    responses(
        (status = 200, description = "Login status", body = AuthStatus)
    )
)]
pub async fn check_auth(auth: AuthContext) -> Json<AuthStatus> {
    Json(AuthStatus {
        is_authenticated: auth.is_admin(),
    })
}

/// 管理员登录
///
/// 口令正确时下发 `admin_authenticated` cookie，有效期一周。
#[utoipa::path(post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, cookie set", body = Success),
        (status = 401, description = "Invalid password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<Success>), AppError> {
    let Json(request) = payload?;

    if request.password != state.config.admin_password {
        warn!("🚫 管理员口令错误");
        return Err(AppError::Unauthorized);
    }

    info!("🔑 管理员登录成功");
    Ok((jar.add(admin_cookie(state.config.cookie_secure)), Json(Success::ok())))
}

/// 退出登录，删除管理员 cookie
#[utoipa::path(post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = Success)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Success>) {
    (jar.remove(removal_cookie()), Json(Success::ok()))
}
