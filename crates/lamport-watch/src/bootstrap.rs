use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.lamport-watch/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing
/// parents):
/// - `~/.lamport-watch/`
/// - `~/.lamport-watch/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let watch_dir = home.join(".lamport-watch");
    std::fs::create_dir_all(&watch_dir)?;
    std::fs::create_dir_all(watch_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive,
/// falling back to `"info"` if the level string is not recognised.
///
/// Diagnostics are appended to a file (`--log-file`, defaulting to
/// `~/.lamport-watch/logs/lamport-watch.log`) rather than stderr, so they
/// never interleave with the TUI's alternate screen.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(normalise_level(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let path = match log_file {
        Some(p) => p.to_path_buf(),
        None => default_log_path(),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Arc::new(file));

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

/// Map the CLI log-level names to tracing directive names (tracing uses
/// lowercase).
fn normalise_level(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

fn default_log_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".lamport-watch")
        .join("logs")
        .join("lamport-watch.log")
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let watch_dir = tmp.path().join(".lamport-watch");
        assert!(watch_dir.is_dir(), ".lamport-watch dir must exist");
        assert!(watch_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    // ── test_normalise_level ──────────────────────────────────────────────

    #[test]
    fn test_normalise_level_known_names() {
        assert_eq!(normalise_level("DEBUG"), "debug");
        assert_eq!(normalise_level("CRITICAL"), "debug");
        assert_eq!(normalise_level("INFO"), "info");
        assert_eq!(normalise_level("WARNING"), "warn");
        assert_eq!(normalise_level("ERROR"), "error");
    }

    #[test]
    fn test_normalise_level_is_case_insensitive() {
        assert_eq!(normalise_level("debug"), "debug");
        assert_eq!(normalise_level("warning"), "warn");
    }

    #[test]
    fn test_normalise_level_unknown_falls_back_to_info() {
        assert_eq!(normalise_level("verbose"), "info");
        assert_eq!(normalise_level(""), "info");
    }
}
