/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | sqlite:tavola.db | SQLite 连接 |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SESSION_TTL_MINUTES | 480 | 会话空闲超时 |
/// | SESSION_COOKIE_SECURE | production 时为 true | Cookie `Secure` 标志 |
/// | SEED_SAMPLE_DATA | development 时为 true | 写入示例员工和菜单 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/tavola.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// Pool size
    pub db_max_connections: u32,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// Idle lifetime of a staff session
    pub session_ttl_minutes: i64,
    /// Mark the session cookie `Secure`
    pub session_cookie_secure: bool,
    /// Insert the sample staff accounts and menu on startup
    pub seed_sample_data: bool,
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";
        let is_development = environment == "development";

        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:tavola.db".into()),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(5),
            http_port: env_parse("HTTP_PORT").unwrap_or(3000),
            session_ttl_minutes: env_parse("SESSION_TTL_MINUTES").unwrap_or(480),
            session_cookie_secure: env_parse("SESSION_COOKIE_SECURE").unwrap_or(is_production),
            seed_sample_data: env_parse("SEED_SAMPLE_DATA").unwrap_or(is_development),
            environment,
        }
    }

    /// In-memory configuration for tests
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            db_max_connections: 1,
            http_port: 0,
            environment: "test".into(),
            session_ttl_minutes: 480,
            session_cookie_secure: false,
            seed_sample_data: true,
        }
    }
}
