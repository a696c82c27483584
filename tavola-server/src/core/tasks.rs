//! 后台任务管理
//!
//! Registers long-running background tasks and aborts them on shutdown.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// 已注册的后台任务
struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// 后台任务管理器
///
/// ```ignore
/// let mut tasks = BackgroundTasks::new();
/// tasks.spawn_periodic("session_purge", Duration::from_secs(60), move || {
///     let sessions = sessions.clone();
///     async move { sessions.purge_expired(); }
/// });
/// tasks.shutdown();
/// ```
#[derive(Default)]
pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册定时任务，每个 `period` 执行一次 `job`
    ///
    /// The first tick fires immediately and is skipped so the job first runs
    /// one full period after startup.
    pub fn spawn_periodic<F, Fut>(&mut self, name: &'static str, period: Duration, mut job: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                job().await;
            }
        });
        tracing::debug!(task = %name, period_secs = period.as_secs(), "Background task registered");
        self.tasks.push(RegisteredTask { name, handle });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Abort every registered task
    pub fn shutdown(self) {
        for task in self.tasks {
            task.handle.abort();
            tracing::debug!(task = %task.name, "Background task stopped");
        }
    }
}
