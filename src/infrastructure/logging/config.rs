//! Logger configuration

use clap::ValueEnum;
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (json, pretty)
    pub format: LogFormat,

    /// Directory for log files (optional, if None logs only to stdout)
    pub log_dir: Option<PathBuf>,

    /// Log rotation policy
    pub rotation: RotationPolicy,

    /// Rotated files kept on disk
    pub max_log_files: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-line human-readable output
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RotationPolicy {
    /// New file every day
    #[default]
    Daily,
    /// New file every hour
    Hourly,
    /// Single file, never rotated
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Pretty,
            log_dir: None,
            rotation: RotationPolicy::default(),
            max_log_files: default_max_log_files(),
        }
    }
}

impl LogConfig {
    /// Raise the level to `debug` when the application runs in debug mode
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug && !self.level.eq_ignore_ascii_case("trace") {
            self.level = "debug".to_string();
        }
        self
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_max_log_files() -> usize {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_debug() {
        assert_eq!(LogConfig::default().with_debug(false).level, "info");
        assert_eq!(LogConfig::default().with_debug(true).level, "debug");

        let trace = LogConfig {
            level: "trace".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(trace.with_debug(true).level, "trace");
    }
}
