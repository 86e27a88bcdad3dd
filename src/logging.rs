use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EngineConfig;

/// Keeps the non-blocking file writer alive; dropping it flushes and stops
/// file logging.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

/// Installs the global tracing subscriber: stdout always, plus a daily
/// rolling file when `ENABLE_FILE_LOGS` is set. Level filtering comes from
/// the config's log level (overridable via `RUST_LOG` syntax).
pub fn init_tracing(config: &EngineConfig) -> Option<FileLogGuard> {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout = fmt::layer().with_target(true);
    let registry = tracing_subscriber::registry().with(filter).with(stdout);

    if env_flag("ENABLE_FILE_LOGS") {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
        match std::fs::create_dir_all(&log_dir) {
            Ok(()) => {
                let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "engine.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                registry
                    .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
                    .init();
                return Some(FileLogGuard { _guard: guard });
            }
            Err(err) => eprintln!("failed to create log directory {log_dir}: {err}"),
        }
    }

    registry.init();
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_callable_once_with_config_level() {
        let config = EngineConfig {
            log_level: "debug".to_string(),
            ..EngineConfig::default()
        };
        // File logging is off in the test environment, so no guard returns.
        let guard = init_tracing(&config);
        assert!(guard.is_none());
        tracing::debug!("logging initialized for tests");
    }
}
