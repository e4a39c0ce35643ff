//! End-to-end tests for the typing driver.
//!
//! All tests run on paused tokio time, so frame timing is exact and the
//! suite never sleeps for real.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use typist_core::{
    Driver, ManualClock, RngSource, ScriptedRandom, Stepper, TokioClock, TypingConfig, Variant,
};

fn fast(variant: Variant) -> TypingConfig {
    TypingConfig::default()
        .with_variant(variant)
        .with_type_speed(10)
        .with_backspace_speed(10)
        .with_pause_delay(10)
}

fn messages(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

async fn collect(rx: &mut mpsc::UnboundedReceiver<String>, count: usize) -> Vec<String> {
    let mut frames = Vec::with_capacity(count);
    while frames.len() < count {
        match rx.recv().await {
            Some(frame) => frames.push(frame),
            None => break,
        }
    }
    frames
}

// ============================================================================
// FULL CYCLE
// ============================================================================

mod full_cycle {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn test_plain_cycle_through_driver() {
        let stepper = Stepper::with_random(
            messages(&["hi"]),
            fast(Variant::Plain),
            ScriptedRandom::default(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, TokioClock::new(), tx).start();

        let frames = collect(&mut rx, 5).await;
        assert_eq!(frames, vec!["h", "hi", "h", "", "h"]);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_through_messages() {
        let stepper = Stepper::with_random(
            messages(&["ab", "c"]),
            fast(Variant::Plain),
            ScriptedRandom::default(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, TokioClock::new(), tx)
            .with_frame_rate(30)
            .start();

        let frames = collect(&mut rx, 9).await;
        assert_eq!(frames, vec!["a", "ab", "a", "", "c", "", "a", "ab", "a"]);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_cycle_ends_on_target_text() {
        let config = fast(Variant::Human).with_error_chance(0.4);
        let stepper = Stepper::with_random(messages(&["typing"]), config, RngSource::seeded(1234));
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, TokioClock::new(), tx).start();

        // Typos may overshoot by one char but the message always gets finished
        loop {
            let frame = rx.recv().await.unwrap();
            assert!(frame.chars().count() <= "typing".len() + 1);
            if frame == "typing" {
                break;
            }
        }

        handle.shutdown().await;
    }
}

// ============================================================================
// DETERMINISM
// ============================================================================

mod determinism {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn run_seeded(seed: u64) -> Vec<String> {
        let config = fast(Variant::Human).with_error_chance(0.3);
        let stepper = Stepper::with_random(
            messages(&["hello", "world"]),
            config,
            RngSource::seeded(seed),
        );
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, TokioClock::new(), tx).start();
        let frames = collect(&mut rx, 60).await;
        handle.shutdown().await;
        frames
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_same_frames() {
        let first = run_seeded(99).await;
        let second = run_seeded(99).await;
        assert_eq!(first.len(), 60);
        assert_eq!(first, second);
    }
}

// ============================================================================
// CLOCK
// ============================================================================

mod clock {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn test_frozen_clock_emits_nothing() {
        let clock = ManualClock::new();
        let stepper = Stepper::with_random(
            messages(&["hi"]),
            fast(Variant::Plain),
            ScriptedRandom::default(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, clock.clone(), tx).start();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err());

        clock.advance(Duration::from_millis(11));
        assert_eq!(rx.recv().await.as_deref(), Some("h"));

        handle.shutdown().await;
    }
}

// ============================================================================
// TEARDOWN
// ============================================================================

mod teardown {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test(start_paused = true)]
    async fn test_no_frames_after_stop() {
        let stepper = Stepper::with_random(
            messages(&["hello"]),
            fast(Variant::Plain),
            ScriptedRandom::default(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, TokioClock::new(), tx).start();

        assert_eq!(collect(&mut rx, 2).await, vec!["h", "he"]);
        handle.stop();
        assert!(!handle.is_running());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.recv().await, None);

        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_twice_then_shutdown() {
        let stepper = Stepper::new(messages(&["hi"]), TypingConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, TokioClock::new(), tx).start();

        handle.stop();
        handle.stop();
        handle.shutdown().await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_frame_rate_still_ticks() {
        let stepper = Stepper::with_random(
            messages(&["hi"]),
            fast(Variant::Plain),
            ScriptedRandom::default(),
        );
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, TokioClock::new(), tx)
            .with_frame_rate(u32::MAX)
            .start();

        assert_eq!(rx.recv().await.as_deref(), Some("h"));
        assert!(handle.is_running());

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_message_list_never_renders() {
        let stepper = Stepper::new(Vec::new(), TypingConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = Driver::new(stepper, TokioClock::new(), tx).start();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());

        handle.shutdown().await;
        assert_eq!(rx.recv().await, None);
    }
}
