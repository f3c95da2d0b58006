use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// 服务器状态 - 所有处理器共享的句柄
///
/// 使用 Clone 浅拷贝 (Config 为小结构, SqlitePool 内部为 Arc)，
/// 作为 axum 的应用状态传入每个 handler。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录 (确保存在)
    /// 2. 数据库 (连接池 + migrations)
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| ServerError::Config(format!("Cannot create work_dir: {e}")))?;

        let db = DbService::new(&config.database_path())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self::new(config.clone(), db.pool))
    }

    /// 测试用: 基于已有连接池构造状态 (跳过工作目录)
    pub fn for_pool(config: Config, pool: SqlitePool) -> Self {
        Self::new(config, pool)
    }
}
