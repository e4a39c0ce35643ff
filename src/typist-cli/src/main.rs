//! Typist CLI - Main entry point.
//!
//! Animates the given messages in place, or prints one frame per line with
//! `--headless`.

use anyhow::Result;
use clap::Parser;

use typist_cli::cli::{Cli, LOG_LEVEL_ENV, run};

/// Guard that ensures the debug log file is flushed when dropped.
struct DebugLogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Set up debug file logging that writes ALL trace-level logs to ./typist-debug.log.
fn setup_debug_file_logging() -> Result<DebugLogGuard> {
    use std::fs::File;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let debug_file_path = std::env::current_dir()?.join("typist-debug.log");

    let file = File::create(&debug_file_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create typist-debug.log: {}. Check write permissions.",
            e
        )
    })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("trace"))
        .with(file_layer)
        .init();

    eprintln!(
        "Debug mode enabled: logging to {}",
        debug_file_path.display()
    );

    Ok(DebugLogGuard { _guard: guard })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Restore the terminal before printing panics from raw mode
    typist_cli::install_panic_hook();

    let cli = Cli::parse();

    let _debug_guard = if cli.debug {
        Some(setup_debug_file_logging()?)
    } else {
        None
    };

    // Stderr logging only makes sense when frames are not drawn in place
    if cli.headless && !cli.debug {
        let env_level = std::env::var(LOG_LEVEL_ENV).ok();
        let log_level = cli.effective_log_level(env_level.as_deref());

        let filter = if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::EnvFilter::from_default_env()
        } else {
            tracing_subscriber::EnvFilter::new(format!(
                "error,typist_core={level},typist_cli={level},typist={level}",
                level = log_level.as_filter_str()
            ))
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    run(cli).await
}
