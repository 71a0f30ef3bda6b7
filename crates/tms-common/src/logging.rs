//! Logging bootstrap
//!
//! Library code only emits `tracing` events; binaries call [`init`] once to
//! install a formatting subscriber that writes to stdout.

use tracing::Level;

/// Install the global fmt subscriber at `level`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is kept.
pub fn init(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stdout)
        .try_init()
        .is_ok()
}

/// Parse a textual log level (trace, debug, info, warn, error), case-insensitive.
pub fn parse_level(value: &str) -> Option<Level> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("info"), Some(Level::INFO));
        assert_eq!(parse_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_level(" error "), Some(Level::ERROR));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_init_is_idempotent() {
        init(Level::INFO);
        assert!(!init(Level::DEBUG));
    }
}
