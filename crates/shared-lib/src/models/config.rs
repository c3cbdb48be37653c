use color_eyre::eyre::{eyre, Context};
use color_eyre::{Result, Section};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// 管理员口令的默认值，仅用于本地开发
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// 数据库连接池默认大小
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// 存储后端
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL 数据库
    Postgres {
        /// postgresql数据库链接字符串
        conn_str: String,

        /// 连接池最大连接数
        ///
        /// 可通过环境变量 `DB_MAX_CONNECTIONS` 来调整
        max_connections: u32,
    },

    /// 本地 JSON 文件
    File {
        /// 数据文件路径，可通过环境变量 `PROJECTS_FILE` 来调整
        path: PathBuf,
    },
}

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 存储后端配置
    pub storage: StorageBackend,

    /// 管理员共享口令（明文比较）
    pub admin_password: String,

    /// Web 服务监听地址
    pub bind_addr: String,

    /// 登录 cookie 是否带 `Secure` 标记，生产环境需要开启
    pub cookie_secure: bool,

    /// 启动时要导入的 JSON 项目文件，已存在的 id 会被跳过
    ///
    /// 可通过环境变量 `IMPORT_FILE` 来设置，用于从文件存储迁移到数据库
    pub import_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e).context("Can not parse .env file");
            }
        }

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Arc::new(config))
    }

    /// 从任意键值来源构建配置
    ///
    /// [`AppConfig::load`] 传入的是环境变量，测试里可以传入一个 `HashMap`
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());

        // 未指定后端时，有数据库地址就用 postgres，否则退回到本地文件
        let backend = lookup("STORAGE_BACKEND")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| if db_url.is_some() { "postgres" } else { "file" }.to_string());

        let storage = match backend.as_str() {
            "postgres" | "postgresql" => {
                let conn_str = db_url
                    .ok_or_else(|| eyre!("Can not load DATABASE_URL in environment"))
                    .suggestion("设置 DATABASE_URL 环境变量，或者设置 STORAGE_BACKEND=file")?;
                StorageBackend::Postgres {
                    conn_str,
                    max_connections: match lookup("DB_MAX_CONNECTIONS").filter(|s| !s.trim().is_empty()) {
                        Some(s) => s
                            .trim()
                            .parse::<u32>()
                            .with_context(|| format!("Invalid DB_MAX_CONNECTIONS: {s}"))
                            .suggestion("DB_MAX_CONNECTIONS 必须是正整数，例如 10")?,
                        None => DEFAULT_MAX_CONNECTIONS,
                    },
                }
            }
            "file" => StorageBackend::File {
                path: lookup("PROJECTS_FILE")
                    .filter(|s| !s.is_empty())
                    .map_or_else(|| PathBuf::from("data/projects.json"), PathBuf::from),
            },
            other => {
                return Err(eyre!("Unknown STORAGE_BACKEND: {other}")).suggestion("可选值为 postgres 或 file");
            }
        };

        let admin_password = match lookup("ADMIN_PASSWORD").filter(|s| !s.is_empty()) {
            Some(password) => password,
            None => {
                warn!("⚠️ 未设置 ADMIN_PASSWORD，使用默认口令，请勿用于生产环境");
                DEFAULT_ADMIN_PASSWORD.to_string()
            }
        };

        Ok(AppConfig {
            storage,
            admin_password,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            cookie_secure: lookup("COOKIE_SECURE").is_some_and(|s| matches!(s.trim(), "1" | "true" | "TRUE" | "True")),
            import_file: lookup("IMPORT_FILE").filter(|s| !s.is_empty()).map(PathBuf::from),
        })
    }
}
