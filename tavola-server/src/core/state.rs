//! 服务器状态

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::SessionStore;
use crate::core::Config;
use crate::db::{DbService, seed};
use crate::utils::AppResult;

/// 服务器状态 - 由所有请求处理器共享
///
/// Cheap to clone: the pool and session store are reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 员工会话
    pub sessions: Arc<SessionStore>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let sessions = Arc::new(SessionStore::new(config.session_ttl_minutes));
        Self {
            config,
            pool,
            sessions,
        }
    }

    /// Open the database, apply migrations and optionally seed sample data
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        Self::finish(config, db).await
    }

    /// State over a private in-memory database (tests)
    pub async fn in_memory(config: &Config) -> AppResult<Self> {
        let db = DbService::in_memory().await?;
        Self::finish(config, db).await
    }

    async fn finish(config: &Config, db: DbService) -> AppResult<Self> {
        if config.seed_sample_data {
            seed::seed_sample_data(&db.pool).await?;
        }
        Ok(Self::new(config.clone(), db.pool))
    }
}
