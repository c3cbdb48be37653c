use color_eyre::eyre::Context;
use color_eyre::{Result, Section};
use database::{FileProjectRepository, ProjectRepository, ProjectRepositoryTrait};
use shared_lib::{AppConfig, StorageBackend};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use web_service::services::{ProjectService, ProjectServiceTrait};
use web_service::{start_web_service, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // 默认 info 级别，可通过 RUST_LOG 调整，例如 RUST_LOG=debug
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;

    let project_service: Arc<dyn ProjectServiceTrait> = match &config.storage {
        StorageBackend::Postgres {
            conn_str,
            max_connections,
        } => {
            let pool = database::initialize_database(conn_str, *max_connections)
                .await
                .context("Connect to postgresql database")?;
            let repo = ProjectRepository::new(pool);
            import_if_configured(&repo, config.import_file.as_deref()).await?;
            Arc::new(ProjectService::new(repo))
        }
        StorageBackend::File { path } => {
            info!("📁 使用本地文件存储: {}", path.display());
            let repo = FileProjectRepository::new(path.clone());
            import_if_configured(&repo, config.import_file.as_deref()).await?;
            Arc::new(ProjectService::new(repo))
        }
    };

    let state = AppState::new(project_service, config);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(forward_shutdown(tokio::signal::ctrl_c(), shutdown_tx));

    start_web_service(state, shutdown_rx).await?;

    info!("👋 服务已退出");
    Ok(())
}

/// 等待退出信号并通知 Web 服务关闭
///
/// 无法监听信号时只记录错误并一直持有发送端，发送端被丢弃也会触发关闭。
async fn forward_shutdown<F>(signal: F, shutdown_tx: watch::Sender<bool>)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("📴 收到退出信号");
            let _ = shutdown_tx.send(true);
        }
        Err(e) => {
            error!("❌ 无法监听退出信号，服务将持续运行: {}", e);
            std::future::pending::<()>().await;
            drop(shutdown_tx);
        }
    }
}

/// 启动时把 `IMPORT_FILE` 指向的 JSON 文件导入当前存储，已存在的 id 会被跳过
async fn import_if_configured<PR: ProjectRepositoryTrait>(repo: &PR, import_file: Option<&Path>) -> Result<()> {
    let Some(path) = import_file else {
        return Ok(());
    };

    tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Can not read IMPORT_FILE {}", path.display()))
        .suggestion("检查 IMPORT_FILE 路径，或者删除该环境变量")?;

    let projects = FileProjectRepository::new(path)
        .list_projects()
        .await
        .with_context(|| format!("Can not load projects from {}", path.display()))?;
    let imported = repo
        .import_projects(&projects)
        .await
        .context("Import projects")?;

    info!(
        "📦 从 {} 导入项目：共 {} 个，新增 {} 个",
        path.display(),
        projects.len(),
        imported
    );
    Ok(())
}
