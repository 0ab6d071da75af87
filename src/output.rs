//! Global output configuration and diagnostic logging.
//!
//! - Results (catalog, quotes, concierge replies) go to stdout
//! - Status messages, spinners and logs go to stderr
//! - Quiet mode suppresses non-essential output
//! - Colors can be disabled via flag or `NO_COLOR` environment variable

use std::sync::OnceLock;
use tracing::Level;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
    /// Log background work at debug level.
    pub verbose: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // https://no-color.org/
            no_color: std::env::var("NO_COLOR").is_ok(),
            verbose: false,
        }
    }
}

/// Initialize the global output configuration and the log subscriber.
///
/// This should be called once at startup with the CLI flags.
/// If called multiple times, subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let level = log_level(&config);
    let ansi = !config.no_color;
    if OUTPUT_CONFIG.set(config).is_err() {
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(ansi)
        .try_init();
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

const fn log_level(config: &OutputConfig) -> Level {
    if config.verbose {
        Level::DEBUG
    } else if config.quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for progress indicators, informational messages, etc.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a warning message to stderr (always shown, even in quiet mode).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert!(!config.quiet);
        assert!(!config.verbose);
    }

    #[test]
    fn test_log_level() {
        let mut config = OutputConfig {
            quiet: false,
            no_color: true,
            verbose: false,
        };
        assert_eq!(log_level(&config), Level::WARN);

        config.quiet = true;
        assert_eq!(log_level(&config), Level::ERROR);

        config.verbose = true;
        assert_eq!(log_level(&config), Level::DEBUG);
    }
}
