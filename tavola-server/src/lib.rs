//! Tavola Server - restaurant reservations and staff portal
//!
//! # 架构概述
//!
//! - **预订** (`booking`): table availability and the reservation workflow
//! - **订单** (`orders`): transactional order save and the kitchen display
//! - **排班** (`scheduling`): shifts and overlap-checked staff assignments
//! - **认证** (`auth`): argon2 passwords, cookie sessions, role gate
//! - **数据库** (`db`): SQLite pool, migrations, repositories
//! - **HTTP API** (`api`): axum routes
//!
//! # 模块结构
//!
//! ```text
//! tavola-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 会话、密码、中间件
//! ├── booking/       # 桌位分配、预订
//! ├── orders/        # 订单保存、厨房
//! ├── scheduling/    # 排班
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 工具函数
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod orders;
pub mod scheduling;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentStaff, SessionStore};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and initialize logging from the environment
pub fn setup_environment() {
    let _ = dotenvy::dotenv();

    let level = std::env::var("LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger(level.as_deref(), log_dir.as_deref());
}
