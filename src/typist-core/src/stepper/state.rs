//! Stepper state record and step outcomes.
//!
//! [`StepperState`] holds everything the typing machine remembers between
//! ticks. It is owned by exactly one [`Stepper`](super::Stepper) and only
//! mutated through its step function.

use std::time::Duration;

/// Coarse mode of the typing machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Appending characters (or holding at the end of a message).
    #[default]
    Typing,
    /// Removing characters, either to fix a typo or to clear a finished message.
    Backspacing,
}

/// What a single call to [`Stepper::step`](super::Stepper::step) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Nothing changed: below the pacing threshold, still pausing, or no messages.
    Held,

    /// Appended the next correct character.
    Typed(char),

    /// Appended a wrong character, starting a typo sequence.
    Typo(char),

    /// Reached the end of the message with a typo still visible; switched to
    /// backspacing to fix it.
    CorrectionStarted,

    /// Message fully typed; pause anchor recorded.
    PauseStarted,

    /// Pause elapsed; switched to deleting the whole message.
    DeletionStarted,

    /// Removed the last visible character.
    Erased(char),

    /// Typo corrected; back to typing the same message.
    Resumed,

    /// Finished message deleted; moved on to the message at `index`.
    Advanced {
        /// Index of the message now being typed.
        index: usize,
    },
}

impl StepEvent {
    /// Returns `true` if the visible text changed during this step.
    ///
    /// Hosts only need to re-render when this is true.
    #[inline]
    pub fn changes_text(&self) -> bool {
        matches!(self, Self::Typed(_) | Self::Typo(_) | Self::Erased(_))
    }

    /// Returns `true` if the step changed nothing.
    #[inline]
    pub fn is_held(&self) -> bool {
        matches!(self, Self::Held)
    }
}

/// Animation state owned by one stepper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepperState {
    /// Index of the message currently being typed.
    pub(crate) index: usize,

    /// Reveal length: characters of the target considered typed.
    ///
    /// Runs one ahead of the target while a typo is being corrected, since
    /// the wrong character occupies a position too.
    pub(crate) sub_index: usize,

    pub(crate) phase: Phase,

    /// Set while deleting a finished message, as opposed to fixing a typo.
    pub(crate) message_completed: bool,

    /// 0 = no typo in flight. 1..=3 while typing past a typo, 4 when the
    /// correction is due, counting down as characters are erased.
    pub(crate) error_progress: u8,

    /// When the end-of-message pause began, if it has.
    pub(crate) pause_anchor: Option<Duration>,

    /// Clock reading of the last committed mutation.
    pub(crate) last_update: Duration,

    /// Text currently on screen.
    pub(crate) visible: String,
}

impl StepperState {
    /// Index of the message being typed.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current reveal length.
    #[inline]
    pub fn sub_index(&self) -> usize {
        self.sub_index
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` while the finished message is being deleted.
    #[inline]
    pub fn is_message_completed(&self) -> bool {
        self.message_completed
    }

    /// Current error-progress counter.
    #[inline]
    pub fn error_progress(&self) -> u8 {
        self.error_progress
    }

    /// Returns `true` if a typo is on screen or being corrected.
    #[inline]
    pub fn has_error_in_flight(&self) -> bool {
        self.error_progress > 0
    }

    /// Returns `true` while holding at the end of a message.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.pause_anchor.is_some()
    }

    /// Clock reading of the last committed mutation.
    #[inline]
    pub fn last_update(&self) -> Duration {
        self.last_update
    }

    /// Text currently on screen.
    #[inline]
    pub fn visible(&self) -> &str {
        &self.visible
    }
}
