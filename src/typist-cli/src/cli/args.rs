//! CLI argument structures and parsing.

use clap::Parser;
use std::path::PathBuf;

use super::styles::get_styles;

/// Environment variable consulted when `--log-level` is not given.
pub const LOG_LEVEL_ENV: &str = "TYPIST_LOG_LEVEL";

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including per-character trace output
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Typist - a typing animation that types, makes mistakes, and fixes them.
///
/// Cycles through the given messages forever. Press q, Esc, or Ctrl+C to quit.
#[derive(Debug, Parser)]
#[command(name = "typist")]
#[command(author, version)]
#[command(about = "Human-like typing animation for the terminal", long_about = None)]
#[command(styles = get_styles())]
pub struct Cli {
    /// Messages to type, in order
    #[arg(value_name = "MESSAGES")]
    pub messages: Vec<String>,

    /// TOML config file (default: <config dir>/typist/config.toml if present)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Delay between typed characters, in milliseconds
    #[arg(long = "type-speed", value_name = "MS", help_heading = "Typing")]
    pub type_speed: Option<u64>,

    /// Delay between erased characters, in milliseconds
    #[arg(long = "backspace-speed", value_name = "MS", help_heading = "Typing")]
    pub backspace_speed: Option<u64>,

    /// Hold time after a message is fully typed, in milliseconds
    #[arg(long = "pause", value_name = "MS", help_heading = "Typing")]
    pub pause: Option<u64>,

    /// Probability of a typo per character, 0.0 to 1.0
    #[arg(long = "error-chance", value_name = "P", help_heading = "Typing")]
    pub error_chance: Option<f64>,

    /// Plain variant: no typos and no speed jitter
    #[arg(long = "plain", default_value_t = false, help_heading = "Typing")]
    pub plain: bool,

    /// Seed the random source for a reproducible run
    #[arg(long = "seed", value_name = "N", help_heading = "Typing")]
    pub seed: Option<u64>,

    /// Frames per second (default 60)
    #[arg(long = "fps", value_name = "N", help_heading = "Output")]
    pub fps: Option<u32>,

    /// Stop after this many seconds
    #[arg(long = "duration", value_name = "SECS", help_heading = "Output")]
    pub duration: Option<f64>,

    /// Print each frame on its own line instead of animating in place
    #[arg(long = "headless", default_value_t = false, help_heading = "Output")]
    pub headless: bool,

    /// Set log verbosity level (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        short = 'L',
        value_enum,
        help_heading = "Debugging"
    )]
    pub log_level: Option<LogLevel>,

    /// Enable debug mode: writes ALL trace-level logs to ./typist-debug.log
    #[arg(long = "debug", help_heading = "Debugging")]
    pub debug: bool,
}

impl Cli {
    /// Log level from the flag, then the environment value, then the default.
    pub fn effective_log_level(&self, env_value: Option<&str>) -> LogLevel {
        self.log_level
            .or_else(|| env_value.and_then(LogLevel::from_str_loose))
            .unwrap_or_default()
    }
}
