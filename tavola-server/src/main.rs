use tavola_server::{Config, Server, ServerState, setup_environment};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // 1. 设置环境 (dotenv, 日志)
    setup_environment();

    // 2. 加载配置
    let config = Config::from_env();
    tracing::info!("Starting tavola-server (env: {})", config.environment);

    // 3. 初始化服务器状态 (数据库、迁移、示例数据)
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器 (Server::run 会自动启动后台任务)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
