//! Logging infrastructure built on `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `warn`: fallbacks such as an unrecognised stored display mode
//! - `info`: verdicts and saved preferences
//! - `debug`: session transitions and plate renders
//! - `trace`: every generated color pair

use std::io;

use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target prefix shared by the binary and every huecheck library crate.
const HUECHECK_TARGET: &str = "huecheck";

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub(crate) struct LogConfig {
    /// Level applied to huecheck crates.
    pub(crate) level: Level,
    /// Whether to include timestamps in log output.
    pub(crate) with_timestamps: bool,
    /// Whether to include the module path in log output.
    pub(crate) with_target: bool,
    /// Whether to use ANSI colors in output.
    pub(crate) with_ansi: bool,
    /// Output layout.
    pub(crate) format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable multi-line format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Creates a `LogConfig` from the `-v` count.
    ///
    /// - 0: info
    /// - 1 (`-v`): debug
    /// - 2+ (`-vv`): trace
    #[must_use]
    pub(crate) fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Self::default()
        }
    }

    /// Sets the output format.
    #[must_use]
    pub(crate) fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub(crate) fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG`, when set, replaces the level derived from the configuration.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub(crate) fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = build_env_filter(config.level);
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_target(config.with_target),
            )
            .try_init()?,
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            if config.with_timestamps {
                registry.with(layer).try_init()?;
            } else {
                registry.with(layer.without_time()).try_init()?;
            }
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            if config.with_timestamps {
                registry.with(layer).try_init()?;
            } else {
                registry.with(layer.without_time()).try_init()?;
            }
        }
    }
    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Filter directives used when `RUST_LOG` is not set.
///
/// Dependencies stay at `warn`; targets match by prefix, so one directive
/// covers `huecheck_core`, `huecheck_system_*` and the binary itself.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    format!("warn,{HUECHECK_TARGET}={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(2).level, Level::TRACE);
        assert_eq!(LogConfig::from_verbosity(9).level, Level::TRACE);
    }

    #[test]
    fn builder_overrides_format_and_ansi() {
        let config = LogConfig::from_verbosity(0)
            .with_format(LogFormat::Json)
            .with_ansi(false);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.with_ansi);
        assert!(!config.with_timestamps);
    }

    #[test]
    fn default_directives_raise_only_huecheck_targets() {
        assert_eq!(default_directives(Level::DEBUG), "warn,huecheck=debug");
        assert_eq!(default_directives(Level::TRACE), "warn,huecheck=trace");
    }
}
