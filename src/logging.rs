//! File logging for the CLI and TUI.
//!
//! Logs go to `<data-dir>/logs/` so the terminal UI never has stray output
//! drawn over it. Initialization happens at most once per process and a
//! failure to start logging is never fatal to the caller.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use once_cell::sync::OnceCell;

/// Environment variable overriding the configured level
pub const LOG_LEVEL_ENV: &str = "PETO_LOG";

const LOG_FILE_BASENAME: &str = "peto";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    _logger: LoggerHandle,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unsupported log level '{0}' (expected trace, debug, info, warn, error, off)")]
    InvalidLevel(String),
    #[error("could not create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not start logger: {0}")]
    Start(#[from] flexi_logger::FlexiLoggerError),
}

/// Normalize a user-supplied level name
pub fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        _ => Err(LoggingError::InvalidLevel(level.to_string())),
    }
}

/// Pick the effective level: a non-empty `PETO_LOG` beats the config value
pub fn effective_level(configured: &str, env_override: Option<String>) -> String {
    env_override
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Start rotating file logs under `data_dir/logs`. Repeat calls are no-ops.
pub fn init_logging(level: &str, data_dir: &Path) -> Result<(), LoggingError> {
    if LOGGING_STATE.get().is_some() {
        return Ok(());
    }
    let level = normalize_level(level)?;
    let log_dir = data_dir.join("logs");

    LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        std::fs::create_dir_all(&log_dir).map_err(|e| LoggingError::CreateDir {
            path: log_dir.clone(),
            source: e,
        })?;

        let logger = Logger::try_with_str(level)?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::Direct)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()?;

        log::info!(
            "event=app_start version={} level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            level,
            log_dir.display()
        );

        Ok(LoggingState { _logger: logger })
    })?;
    Ok(())
}
