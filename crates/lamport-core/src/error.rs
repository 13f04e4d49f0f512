use thiserror::Error;

/// All errors produced by the lamport-watch crates.
///
/// Producer-facing store operations are fire-and-forget and never return
/// these; the taxonomy covers the fallible edges only (terminal setup,
/// configuration).
#[derive(Error, Debug)]
pub enum WatchError {
    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the lamport-watch crates.
pub type Result<T> = std::result::Result<T, WatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_terminal() {
        let err = WatchError::Terminal("raw mode unavailable".to_string());
        assert_eq!(err.to_string(), "Terminal error: raw mode unavailable");
    }

    #[test]
    fn test_error_display_config() {
        let err = WatchError::Config("failure chance out of range".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: failure chance out of range"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: WatchError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: WatchError = anyhow::anyhow!("driver misbehaved").into();
        assert!(err.to_string().contains("driver misbehaved"));
    }
}
