//! Logging and tracing bootstrap.
//!
//! Console logging goes to stderr filtered by `-q`/`-v`/`RUST_LOG`; when a
//! log directory is known, a JSONL file layer is added with a non-blocking
//! writer whose guard must live for the duration of the process.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Where file logs go, resolved from env and config.
#[derive(Debug, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path (`PERMSCAN_LOG_PATH`).
    pub log_path: Option<PathBuf>,
    /// Log directory (`PERMSCAN_LOG_DIR`, or the config `log_dir`).
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve from environment variables, with the config file's `log_dir`
    /// as a fallback.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: std::env::var_os("PERMSCAN_LOG_PATH").map(PathBuf::from),
            log_dir: std::env::var_os("PERMSCAN_LOG_DIR")
                .map(PathBuf::from)
                .or(config_log_dir),
        }
    }
}

/// Resolve the default level from CLI verbosity flags and the configured
/// level: `-q` forces `error`, each `-v` step raises the default (`-v`
/// debug, `-vv` trace).
fn default_level(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Build the env filter. `RUST_LOG` wins when set.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(quiet, verbose, config_level)))
}

/// Install the global subscriber.
///
/// Returns the non-blocking writer guard when a file layer was added; the
/// caller keeps it alive so buffered log lines are flushed on exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_appender = match (&config.log_path, &config.log_dir) {
        (Some(path), _) => {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let name = path.file_name().map_or_else(
                || std::ffi::OsString::from("permscan.jsonl"),
                std::ffi::OsStr::to_os_string,
            );
            std::fs::create_dir_all(dir)?;
            Some(tracing_appender::rolling::never(dir, name))
        }
        (None, Some(dir)) => {
            std::fs::create_dir_all(dir)?;
            Some(tracing_appender::rolling::daily(dir, "permscan.jsonl"))
        }
        (None, None) => None,
    };

    match file_appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_config_level() {
        assert_eq!(default_level(true, 0, "debug"), "error");
    }

    #[test]
    fn verbose_steps_raise_the_level() {
        assert_eq!(default_level(false, 1, "info"), "debug");
        assert_eq!(default_level(false, 2, "info"), "trace");
    }

    #[test]
    fn config_level_is_the_default() {
        assert_eq!(default_level(false, 0, "warn"), "warn");
    }
}
