//! Frame-driven typing animation.
//!
//! Reveals a list of messages one character at a time, pauses, deletes them,
//! and moves on, forever. The "human" variant jitters its typing speed and
//! occasionally hits a wrong key, keeps typing for a moment, then backs up and
//! fixes it.
//!
//! # Features
//!
//! - **Stepper**: pure state machine advanced once per tick from a clock reading
//! - **Driver**: tokio tick loop with a stop handle and pluggable render sinks
//! - **Config**: serde/TOML typing parameters with defaults and clamping
//! - **Injectable randomness and time** for deterministic tests
//!
//! # Example
//!
//! ```rust,no_run
//! use typist_core::{Driver, Stepper, TokioClock, TypingConfig};
//!
//! # async fn demo() {
//! let stepper = Stepper::new(
//!     vec!["Hello World!".to_string(), "This is a typing demo.".to_string()],
//!     TypingConfig::default(),
//! );
//! let (tx, mut rx) = tokio::sync::watch::channel(String::new());
//! let handle = Driver::new(stepper, TokioClock::new(), tx).start();
//!
//! while rx.changed().await.is_ok() {
//!     println!("{}", *rx.borrow());
//! }
//! handle.stop();
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod random;
pub mod stepper;

pub use clock::{Clock, ManualClock, TokioClock};
pub use config::{TypingConfig, Variant};
pub use driver::{DEFAULT_FPS, Driver, DriverHandle, RenderSink};
pub use error::{ConfigError, ConfigResult};
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use stepper::{Phase, StepEvent, Stepper, StepperState};
