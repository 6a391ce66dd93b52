//! Tracing setup for the `wiretap` binary.
//!
//! Stdout carries the relayed bytes, so console output only ever goes to
//! stderr. The file appender is named after the wrapped program, so logs for
//! different children in the same log directory stay apart.
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use wiretap_core::api::LoggingConfig;

// Not a OnceLock: the guard must be taken and dropped before process::exit.
static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// `wiretap-<label>.<pid>.log`, with anything outside `[A-Za-z0-9_-]` in the
/// label replaced by `_`.
pub fn log_file_name(label: &str, pid: u32) -> String {
    let label: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if label.is_empty() {
        format!("wiretap.{pid}.log")
    } else {
        format!("wiretap-{label}.{pid}.log")
    }
}

/// Label for a child program: its file stem, so `/opt/jdk/bin/java` logs as `java`.
pub fn program_label(program: &str) -> String {
    Path::new(program.trim())
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub fn log_dir(logging: &LoggingConfig) -> PathBuf {
    match logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(d) => PathBuf::from(d),
        None => std::env::temp_dir().join("wiretap"),
    }
}

pub fn init_tracing(logging: &LoggingConfig, label: &str) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err("logging disabled for both console and file".to_string());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let file_layer = if logging.file {
        let dir = log_dir(logging);
        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender =
            tracing_appender::rolling::never(dir, log_file_name(label, std::process::id()));
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        if let Ok(mut slot) = LOG_GUARD.lock() {
            *slot = Some(guard);
        }
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
    } else {
        None
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Drops the appender guard so buffered lines reach the file.
pub fn flush_logs() {
    if let Ok(mut slot) = LOG_GUARD.lock() {
        drop(slot.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_follows_program() {
        assert_eq!(
            log_file_name(&program_label("/opt/jdk/bin/java"), 42),
            "wiretap-java.42.log"
        );
        assert_eq!(log_file_name(&program_label("node.exe"), 7), "wiretap-node.7.log");
    }

    #[test]
    fn file_name_sanitizes_label() {
        assert_eq!(log_file_name("my tool!", 1), "wiretap-my_tool_.1.log");
        assert_eq!(log_file_name("", 1), "wiretap.1.log");
        assert_eq!(log_file_name(&program_label("  "), 3), "wiretap.3.log");
    }

    #[test]
    fn blank_directory_falls_back_to_temp() {
        let logging = LoggingConfig {
            directory: Some(" ".into()),
            ..LoggingConfig::default()
        };
        assert_eq!(log_dir(&logging), std::env::temp_dir().join("wiretap"));

        let logging = LoggingConfig {
            directory: Some("/var/log/wiretap".into()),
            ..LoggingConfig::default()
        };
        assert_eq!(log_dir(&logging), PathBuf::from("/var/log/wiretap"));
    }

    #[test]
    fn disabled_logging_is_a_no_op() {
        let logging = LoggingConfig {
            enabled: false,
            console: false,
            file: false,
            ..LoggingConfig::default()
        };
        assert!(init_tracing(&logging, "java").is_ok());
    }

    #[test]
    fn no_sink_is_rejected() {
        let logging = LoggingConfig {
            console: false,
            file: false,
            ..LoggingConfig::default()
        };
        assert!(init_tracing(&logging, "java").is_err());
    }
}
