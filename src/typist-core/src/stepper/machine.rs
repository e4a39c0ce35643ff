//! The typing state machine.
//!
//! This module provides the [`Stepper`] struct that advances a
//! [`StepperState`] once per tick.

use std::time::Duration;

use tracing::{debug, trace};

use super::state::{Phase, StepEvent, StepperState};
use crate::config::{JITTER_MIN, JITTER_SPAN, TypingConfig};
use crate::random::{RandomSource, RngSource};

/// Error-progress value at which the next correct character triggers the fix.
const CORRECTION_THRESHOLD: u8 = 3;

/// Error-progress value meaning "correction due".
const CORRECTION_DUE: u8 = 4;

/// Finite-state typing animation.
///
/// Cycles through `messages` forever: type a message, hold for the pause
/// delay, delete it, move to the next one. In the human variant it sometimes
/// types a wrong letter, keeps going for a couple of characters, then backs
/// up and fixes it.
///
/// The stepper never reads a clock itself. The host passes the current
/// monotonic reading to [`Stepper::step`] on every tick.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use typist_core::{Stepper, TypingConfig};
///
/// let config = TypingConfig::plain().with_type_speed(10);
/// let mut stepper = Stepper::new(vec!["hi".to_string()], config);
///
/// let event = stepper.step(Duration::from_millis(11));
/// assert!(event.changes_text());
/// assert_eq!(stepper.visible_text(), "h");
/// ```
pub struct Stepper {
    config: TypingConfig,
    messages: Vec<String>,
    state: StepperState,
    rng: Box<dyn RandomSource>,
}

impl Stepper {
    /// Creates a stepper with an OS-seeded random source.
    pub fn new(messages: Vec<String>, config: TypingConfig) -> Self {
        Self::with_random(messages, config, RngSource::from_os_rng())
    }

    /// Creates a stepper with an explicit random source.
    pub fn with_random(
        messages: Vec<String>,
        config: TypingConfig,
        rng: impl RandomSource + 'static,
    ) -> Self {
        Self {
            config: config.sanitized(),
            messages,
            state: StepperState::default(),
            rng: Box::new(rng),
        }
    }

    /// Advances the machine to clock reading `now`.
    ///
    /// Returns what happened. When the result is [`StepEvent::Held`] neither
    /// the state nor the visible text changed.
    pub fn step(&mut self, now: Duration) -> StepEvent {
        if self.messages.is_empty() {
            return StepEvent::Held;
        }

        let elapsed = now.saturating_sub(self.state.last_update);
        let event = match self.state.phase {
            Phase::Typing => self.step_typing(now, elapsed),
            Phase::Backspacing => self.step_backspacing(now, elapsed),
        };

        self.debug_check_invariants();
        event
    }

    fn step_typing(&mut self, now: Duration, elapsed: Duration) -> StepEvent {
        debug_assert!(!self.state.message_completed);

        let target_len = self.current_len();
        if self.state.sub_index < target_len {
            let threshold = self.type_threshold();
            if elapsed <= threshold {
                return StepEvent::Held;
            }
            self.state.last_update = now;

            let chance = self.config.effective_error_chance();
            if self.state.error_progress == 0 && chance > 0.0 && self.rng.unit() < chance {
                let typo = self.rng.letter();
                self.state.visible.push(typo);
                self.state.error_progress = 1;
                trace!(%typo, sub_index = self.state.sub_index, "typo injected");
                return StepEvent::Typo(typo);
            }

            let Some(ch) = self.char_at(self.state.sub_index) else {
                return StepEvent::Held;
            };
            self.state.visible.push(ch);
            self.state.sub_index += 1;
            trace!(%ch, sub_index = self.state.sub_index, "typed");

            match self.state.error_progress {
                1..CORRECTION_THRESHOLD => self.state.error_progress += 1,
                CORRECTION_THRESHOLD => {
                    // The typo itself occupies a position
                    self.state.error_progress = CORRECTION_DUE;
                    self.state.sub_index += 1;
                    self.state.phase = Phase::Backspacing;
                    debug!(index = self.state.index, "correcting typo");
                }
                _ => {}
            }
            return StepEvent::Typed(ch);
        }

        if self.state.has_error_in_flight() {
            // Ran out of message before noticing the typo: fix it before pausing
            self.state.sub_index += 1;
            self.state.phase = Phase::Backspacing;
            debug!(
                index = self.state.index,
                pending = self.state.error_progress,
                "correcting typo at end of message"
            );
            return StepEvent::CorrectionStarted;
        }

        match self.state.pause_anchor {
            None => {
                self.state.pause_anchor = Some(now);
                debug!(index = self.state.index, "message typed, pausing");
                StepEvent::PauseStarted
            }
            Some(anchor) if now.saturating_sub(anchor) > self.config.pause_delay() => {
                self.state.message_completed = true;
                self.state.phase = Phase::Backspacing;
                self.state.pause_anchor = None;
                debug!(index = self.state.index, "pause elapsed, deleting");
                StepEvent::DeletionStarted
            }
            Some(_) => StepEvent::Held,
        }
    }

    fn step_backspacing(&mut self, now: Duration, elapsed: Duration) -> StepEvent {
        if elapsed <= self.config.backspace_speed() {
            return StepEvent::Held;
        }
        self.state.last_update = now;

        let erasing = self.state.has_error_in_flight() || self.state.message_completed;
        if erasing && let Some(ch) = self.state.visible.pop() {
            if !self.state.message_completed {
                debug_assert!(self.state.sub_index > 0, "reveal length underflow");
                self.state.sub_index = self.state.sub_index.saturating_sub(1);
            }
            if self.state.has_error_in_flight() {
                self.state.error_progress -= 1;
            }
            trace!(%ch, sub_index = self.state.sub_index, "erased");
            return StepEvent::Erased(ch);
        }

        self.state.phase = Phase::Typing;
        if self.state.message_completed && self.state.visible.is_empty() {
            self.state.message_completed = false;
            self.state.index = (self.state.index + 1) % self.messages.len();
            self.state.sub_index = 0;
            debug!(index = self.state.index, "advanced to next message");
            return StepEvent::Advanced {
                index: self.state.index,
            };
        }

        debug!(index = self.state.index, "typo fixed, resuming");
        StepEvent::Resumed
    }

    /// Per-character typing delay for this step.
    ///
    /// The human variant scales the base speed by a factor drawn from
    /// `[0.9, 1.1)`. The draw happens on every eligible step, whether or not
    /// the threshold is then met.
    fn type_threshold(&mut self) -> Duration {
        let base = self.config.type_speed();
        if !self.config.variant.is_human() {
            return base;
        }
        let factor = JITTER_MIN + self.rng.unit() * JITTER_SPAN;
        let nanos = (base.as_nanos() as f64 * factor).round();
        Duration::from_nanos(nanos as u64)
    }

    fn current_message(&self) -> Option<&str> {
        self.messages.get(self.state.index).map(String::as_str)
    }

    fn current_len(&self) -> usize {
        self.current_message().map_or(0, |m| m.chars().count())
    }

    fn char_at(&self, position: usize) -> Option<char> {
        self.current_message()?.chars().nth(position)
    }

    fn debug_check_invariants(&self) {
        if cfg!(debug_assertions) {
            let target_len = self.current_len();
            let visible_len = self.state.visible.chars().count();
            debug_assert!(self.state.index < self.messages.len());
            debug_assert!(
                visible_len <= target_len + 1,
                "visible text ran {visible_len} chars over a {target_len} char message"
            );
            if self.state.error_progress == 0 && !self.state.message_completed {
                debug_assert_eq!(visible_len, self.state.sub_index);
            }
        }
    }

    // --------------------------------------------------------
    // Accessors
    // --------------------------------------------------------

    /// Text currently visible.
    #[inline]
    pub fn visible_text(&self) -> &str {
        &self.state.visible
    }

    /// Read-only view of the animation state.
    #[inline]
    pub fn state(&self) -> &StepperState {
        &self.state
    }

    /// Sanitized configuration in use.
    #[inline]
    pub fn config(&self) -> &TypingConfig {
        &self.config
    }

    /// Messages being cycled.
    #[inline]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The message currently being typed, or `None` for an empty list.
    pub fn target(&self) -> Option<&str> {
        self.current_message()
    }

    /// Returns to the initial state, keeping messages, config, and random source.
    pub fn reset(&mut self) {
        self.state = StepperState::default();
    }
}

impl std::fmt::Debug for Stepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stepper")
            .field("config", &self.config)
            .field("messages", &self.messages.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
