//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;
use std::time::Duration;

use crate::api::build_app;
use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, ServerState};
use crate::utils::{AppError, AppResult};

/// How often expired sessions are swept
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> AppResult<()> {
        let state = self.state.clone();

        let mut tasks = BackgroundTasks::new();
        let sessions = state.sessions.clone();
        tasks.spawn_periodic("session_purge", SESSION_PURGE_INTERVAL, move || {
            let sessions = sessions.clone();
            async move {
                let purged = sessions.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, remaining = sessions.len(), "Expired sessions purged");
                }
            }
        });

        let app = build_app(state);
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        tracing::info!(
            %addr,
            environment = %self.config.environment,
            "Tavola server listening"
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")));

        tasks.shutdown();
        served
    }
}
