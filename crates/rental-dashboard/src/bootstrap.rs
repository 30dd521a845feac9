use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File looked for in the working directory when no data path is configured.
pub const DEFAULT_DATA_FILE: &str = "daily_rent_detail.csv";

const APP_DIR: &str = ".rental-dashboard";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Root of the per-user directory, `~/.rental-dashboard/`.
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Ensure `~/.rental-dashboard/` and its `logs/` and `data/` subdirectories
/// exist, returning the root.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let root = app_dir();
    std::fs::create_dir_all(root.join("logs"))?;
    std::fs::create_dir_all(root.join("data"))?;
    Ok(root)
}

/// Log file used by the interactive views when `--log-file` is not given.
pub fn default_log_file(root: &Path) -> PathBuf {
    root.join("logs").join("rental-dashboard.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name to an [`EnvFilter`] directive.
fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With a `log_file` every event is appended to that file without ANSI
/// colours; otherwise output goes to stderr. Unrecognised levels fall back
/// to `info`.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };
    let stderr_layer = log_file.is_none().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Decide which input to load.
///
/// An explicit path always wins. Otherwise the first existing candidate is
/// used:
/// 1. `<cwd>/daily_rent_detail.csv`
/// 2. `~/.rental-dashboard/data/`
pub fn discover_data_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidates = [cwd.join(DEFAULT_DATA_FILE), app_dir().join("data")];
    candidates.into_iter().find(|p| p.exists())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
