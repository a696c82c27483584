//! Logging Infrastructure
//!
//! `EnvFilter`-driven subscriber, optionally writing to a daily rolling file.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "tavola_server=info,tower_http=info";

/// Initialize the global subscriber
///
/// `filter` follows `RUST_LOG` syntax; falls back to [`DEFAULT_FILTER`].
/// When `log_dir` is given (and can be created) output goes to
/// `<log_dir>/tavola-server.<date>` instead of stdout.
pub fn init_logger(filter: Option<&str>, log_dir: Option<&str>) {
    let env_filter = filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "tavola-server");
            // try_init: tests may initialize more than once
            let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
    }

    let _ = subscriber.try_init();
}
