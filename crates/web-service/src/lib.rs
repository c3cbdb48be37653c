//! Web服务模块
//!
//! 提供 HTTP API 接口和文档服务

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use services::ProjectServiceTrait;
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod auth;
pub mod models;
pub mod routes;
pub mod services;

/// 应用共享状态
///
/// 项目服务以 trait object 保存，存储后端（PostgreSQL 或 JSON 文件）在启动时决定。
#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(project_service: Arc<dyn ProjectServiceTrait>, config: Arc<AppConfig>) -> Self {
        Self {
            project_service,
            config,
        }
    }
}

/// 启动 Web 服务，收到关闭信号后停止接收新请求
pub async fn start_web_service(state: AppState, mut shutdown_rx: Receiver<bool>) -> Result<()> {
    let bind_addr = state.config.bind_addr.clone();
    let router = routes::create_app_router(state);

    info!("🚀 启动 Web Service 在 {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .wrap_err_with(|| format!("无法监听地址 {bind_addr}"))?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被丢弃时同样视为关闭
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
