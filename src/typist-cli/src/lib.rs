//! Typist CLI library module.
//!
//! - `cli/` - argument parsing, settings layering, run handlers
//! - `render` - inline terminal and line-per-frame sinks
//! - `terminal` - raw-mode guard and quit keys

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod cli;
pub mod render;
pub mod terminal;

static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install a panic hook that restores the terminal before the panic
/// message is printed, so it is not garbled by raw mode.
pub fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);

        if std::env::var("RUST_BACKTRACE").is_err() {
            eprintln!();
            eprintln!("\x1b[1;33mTip:\x1b[0m For a full backtrace, run with RUST_BACKTRACE=1");
        }
    }));
}

/// Restore terminal state (raw mode off, cursor visible).
pub fn restore_terminal() {
    let _ = terminal::restore();
    eprintln!();
    let _ = std::io::Write::flush(&mut std::io::stderr());
}
