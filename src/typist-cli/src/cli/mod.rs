//! CLI argument parsing, settings layering, and run handlers.
//!
//! # Module Structure
//!
//! - `args` - Command-line argument structures
//! - `settings` - Defaults, config file, and flags merged into [`Settings`]
//! - `handlers` - Headless and interactive run loops
//! - `styles` - ANSI styling for help output

pub mod args;
pub mod handlers;
pub mod settings;
pub mod styles;

pub use args::{Cli, LOG_LEVEL_ENV, LogLevel};
pub use handlers::run;
pub use settings::{FileConfig, Settings, default_config_path};
pub use styles::get_styles;
