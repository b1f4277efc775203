use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const APP_DIR: &str = ".gate-reports";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.gate-reports/` and `~/.gate-reports/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    ensure_directories_in(&home_dir())
}

pub fn ensure_directories_in(home: &Path) -> anyhow::Result<()> {
    let app_dir = home.join(APP_DIR);
    std::fs::create_dir_all(&app_dir)?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

/// Log file used while the TUI owns the terminal.
pub fn default_log_file() -> PathBuf {
    home_dir().join(APP_DIR).join("logs").join("gate-reports.log")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name onto an [`EnvFilter`] directive.
///
/// Unknown names are passed through unchanged.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, output is appended to that file; otherwise it goes
/// to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };
    let stderr_layer = log_file.is_none().then(|| {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Locate a backend export directory under the home directory.
///
/// Checks, in order:
/// 1. `~/.gate-reports/exports/`
/// 2. `~/.config/gate-reports/exports/`
pub fn discover_data_path() -> Option<PathBuf> {
    discover_data_path_in(&dirs::home_dir()?)
}

pub fn discover_data_path_in(home: &Path) -> Option<PathBuf> {
    let candidates = [
        home.join(APP_DIR).join("exports"),
        home.join(".config").join("gate-reports").join("exports"),
    ];
    candidates.into_iter().find(|p| p.exists())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");
        ensure_directories_in(tmp.path()).expect("ensure_directories should succeed");

        let app_dir = tmp.path().join(APP_DIR);
        assert!(app_dir.is_dir());
        assert!(app_dir.join("logs").is_dir());

        // Idempotent.
        ensure_directories_in(tmp.path()).expect("second run");
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("critical"), "error");
        assert_eq!(filter_directive("INFO"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("error"), "error");
        assert_eq!(filter_directive("gate_data=trace"), "gate_data=trace");
    }

    #[test]
    fn test_discover_data_path_none_when_absent() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(discover_data_path_in(tmp.path()).is_none());
    }

    #[test]
    fn test_discover_data_path_prefers_app_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let primary = tmp.path().join(APP_DIR).join("exports");
        let secondary = tmp.path().join(".config").join("gate-reports").join("exports");
        std::fs::create_dir_all(&primary).unwrap();
        std::fs::create_dir_all(&secondary).unwrap();

        assert_eq!(discover_data_path_in(tmp.path()), Some(primary));
    }

    #[test]
    fn test_discover_data_path_finds_config_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let secondary = tmp.path().join(".config").join("gate-reports").join("exports");
        std::fs::create_dir_all(&secondary).unwrap();

        assert_eq!(discover_data_path_in(tmp.path()), Some(secondary));
    }
}
