//! Run handlers: wire settings into a stepper, a driver, and a sink.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tracing::{debug, info};
use typist_core::{Driver, DriverHandle, RenderSink, RngSource, Stepper, TokioClock};

use super::args::Cli;
use super::settings::Settings;
use crate::render::{LineSink, TerminalSink};
use crate::terminal::{TerminalGuard, is_quit_key};

/// Entry point after argument parsing.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(&cli).context("failed to load configuration")?;
    info!(
        messages = settings.messages.len(),
        fps = settings.fps,
        variant = ?settings.typing.variant,
        headless = settings.headless,
        "starting typist"
    );

    let stepper = build_stepper(&settings);
    if settings.headless {
        run_headless(stepper, &settings).await
    } else {
        run_interactive(stepper, &settings).await
    }
}

/// Builds the stepper, seeded when `--seed` was given.
pub fn build_stepper(settings: &Settings) -> Stepper {
    let messages = settings.messages.clone();
    let typing = settings.typing.clone();
    match settings.seed {
        Some(seed) => {
            debug!(seed, "using seeded random source");
            Stepper::with_random(messages, typing, RngSource::seeded(seed))
        }
        None => Stepper::new(messages, typing),
    }
}

fn start<S: RenderSink>(stepper: Stepper, sink: S, settings: &Settings) -> DriverHandle {
    Driver::new(stepper, TokioClock::new(), sink)
        .with_frame_rate(settings.fps)
        .start()
}

/// Prints frames line by line until the duration elapses or Ctrl+C.
async fn run_headless(stepper: Stepper, settings: &Settings) -> Result<()> {
    let handle = start(stepper, LineSink::stdout(), settings);

    tokio::select! {
        _ = deadline(settings.duration) => debug!("duration elapsed"),
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl+C")?;
            debug!("interrupted");
        }
    }

    handle.shutdown().await;
    Ok(())
}

/// Animates in place until a quit key or the duration elapses.
async fn run_interactive(stepper: Stepper, settings: &Settings) -> Result<()> {
    let _guard = TerminalGuard::enter().context("failed to enter raw mode")?;
    let mut sink = TerminalSink::inline().context("failed to set up terminal")?;
    sink.render("");

    let handle = start(stepper, sink, settings);
    let mut events = EventStream::new();
    let timeout = deadline(settings.duration);
    tokio::pin!(timeout);

    let outcome = loop {
        tokio::select! {
            _ = &mut timeout => {
                debug!("duration elapsed");
                break Ok(());
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if is_quit_key(&key) => {
                    debug!(?key, "quit requested");
                    break Ok(());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err::<(), _>(e).context("failed to read terminal events"),
                None => break Ok(()),
            }
        }
    };

    handle.shutdown().await;
    outcome
}

async fn deadline(duration: Option<Duration>) {
    match duration {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn settings(args: &[&str]) -> Settings {
        let mut argv = vec!["typist"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        Settings::from_layers(None, &cli).unwrap()
    }

    #[test]
    fn test_seeded_stepper_is_reproducible() {
        let settings = settings(&["--seed", "42", "--error-chance", "0.5", "hello there"]);
        let mut a = build_stepper(&settings);
        let mut b = build_stepper(&settings);

        for i in 1..=500u64 {
            let now = Duration::from_millis(i * 20);
            assert_eq!(a.step(now), b.step(now));
            assert_eq!(a.visible_text(), b.visible_text());
        }
    }

    #[test]
    fn test_build_stepper_uses_settings() {
        let settings = settings(&["--plain", "--type-speed", "5", "abc"]);
        let stepper = build_stepper(&settings);
        assert_eq!(stepper.messages(), &["abc".to_string()]);
        assert_eq!(stepper.config().base_type_speed_ms, 5);
        assert!(!stepper.config().variant.is_human());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_waits_for_duration() {
        let start = tokio::time::Instant::now();
        deadline(Some(Duration::from_secs(2))).await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }
}
