//! Typing stepper: the per-frame animation state machine.
//!
//! # Overview
//!
//! Each tick the stepper decides whether to type a character, inject or
//! erase a typo, hold during the end-of-message pause, delete the finished
//! message, or move on to the next one:
//!
//! ```text
//! typing ──► (typo ──► 1-2 more chars ──► backspace fix) ──► pause
//!    ▲                                                         │
//!    └──────────── advance ◄── backspacing the message ◄───────┘
//! ```
//!
//! The plain variant is the same machine with typos and speed jitter
//! switched off.
//!
//! # Example
//!
//! ```rust,ignore
//! use typist_core::{ScriptedRandom, Stepper, TypingConfig};
//!
//! let config = TypingConfig::default().with_error_chance(0.0);
//! let mut stepper = Stepper::with_random(
//!     vec!["Hello World!".to_string()],
//!     config,
//!     ScriptedRandom::default(),
//! );
//!
//! let now = std::time::Duration::from_millis(200);
//! if stepper.step(now).changes_text() {
//!     println!("{}", stepper.visible_text());
//! }
//! ```

mod machine;
mod state;


pub use machine::Stepper;
pub use state::{Phase, StepEvent, StepperState};
