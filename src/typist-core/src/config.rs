//! Typing animation configuration.
//!
//! Every field has a default and may be omitted from a TOML table, so a
//! config file only needs the values it wants to change:
//!
//! ```toml
//! base_type_speed_ms = 80
//! error_chance = 0.1
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ConfigResult};

// ============================================================================
// Constants
// ============================================================================

/// Default nominal delay between typed characters, in milliseconds.
pub const DEFAULT_TYPE_SPEED_MS: u64 = 120;

/// Default nominal delay between deleted characters, in milliseconds.
pub const DEFAULT_BACKSPACE_SPEED_MS: u64 = 100;

/// Default hold time once a message is fully typed, in milliseconds.
pub const DEFAULT_PAUSE_DELAY_MS: u64 = 1000;

/// Default probability of injecting a typo before a typed character.
pub const DEFAULT_ERROR_CHANCE: f64 = 0.05;

/// Lower bound of the per-character speed jitter in the human variant.
pub const JITTER_MIN: f64 = 0.9;

/// Width of the jitter range; the factor is drawn from `[0.9, 1.1)`.
pub const JITTER_SPAN: f64 = 0.2;

// ============================================================================
// Variant
// ============================================================================

/// Which flavour of the typing machine to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Jittered speed and occasional typos that get corrected.
    #[default]
    Human,
    /// Fixed speed, no typos, no random draws at all.
    Plain,
}

impl Variant {
    /// Returns `true` if this variant draws from the random source.
    #[inline]
    pub fn is_human(&self) -> bool {
        matches!(self, Variant::Human)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Timing and behaviour knobs for the typing stepper.
///
/// Durations are unsigned milliseconds, so a negative value in a config file
/// is rejected by the parser. A value of zero is allowed and means the
/// corresponding action fires on every tick in which time advanced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingConfig {
    /// Nominal per-character typing delay.
    #[serde(default = "default_type_speed")]
    pub base_type_speed_ms: u64,

    /// Nominal per-character deletion delay.
    #[serde(default = "default_backspace_speed")]
    pub base_backspace_speed_ms: u64,

    /// Hold time after a message is fully typed, before deletion begins.
    #[serde(default = "default_pause_delay")]
    pub pause_delay_ms: u64,

    /// Probability in `[0, 1]` that a typo is injected (human variant only).
    #[serde(default = "default_error_chance")]
    pub error_chance: f64,

    /// Human (typos and jitter) or plain.
    #[serde(default)]
    pub variant: Variant,
}

fn default_type_speed() -> u64 {
    DEFAULT_TYPE_SPEED_MS
}

fn default_backspace_speed() -> u64 {
    DEFAULT_BACKSPACE_SPEED_MS
}

fn default_pause_delay() -> u64 {
    DEFAULT_PAUSE_DELAY_MS
}

fn default_error_chance() -> f64 {
    DEFAULT_ERROR_CHANCE
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            base_type_speed_ms: DEFAULT_TYPE_SPEED_MS,
            base_backspace_speed_ms: DEFAULT_BACKSPACE_SPEED_MS,
            pause_delay_ms: DEFAULT_PAUSE_DELAY_MS,
            error_chance: DEFAULT_ERROR_CHANCE,
            variant: Variant::Human,
        }
    }
}

impl TypingConfig {
    /// Creates the plain variant with default timings.
    pub fn plain() -> Self {
        Self {
            variant: Variant::Plain,
            ..Self::default()
        }
    }

    /// Parses a TOML document and sanitizes the result.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        Ok(config.sanitized())
    }

    /// Loads and sanitizes a TOML config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Clamps out-of-range values into range.
    ///
    /// `error_chance` is clamped to `[0, 1]`; NaN becomes 0.
    pub fn sanitized(mut self) -> Self {
        if self.error_chance.is_nan() {
            warn!("error_chance is NaN, using 0");
            self.error_chance = 0.0;
        } else if !(0.0..=1.0).contains(&self.error_chance) {
            let clamped = self.error_chance.clamp(0.0, 1.0);
            warn!(
                requested = self.error_chance,
                clamped, "error_chance out of range, clamping"
            );
            self.error_chance = clamped;
        }
        self
    }

    /// Sets the nominal typing delay.
    pub fn with_type_speed(mut self, ms: u64) -> Self {
        self.base_type_speed_ms = ms;
        self
    }

    /// Sets the nominal deletion delay.
    pub fn with_backspace_speed(mut self, ms: u64) -> Self {
        self.base_backspace_speed_ms = ms;
        self
    }

    /// Sets the hold time after a completed message.
    pub fn with_pause_delay(mut self, ms: u64) -> Self {
        self.pause_delay_ms = ms;
        self
    }

    /// Sets the typo probability, clamping it into `[0, 1]`.
    pub fn with_error_chance(mut self, chance: f64) -> Self {
        self.error_chance = chance;
        self.sanitized()
    }

    /// Selects the variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Typing delay as a [`Duration`].
    #[inline]
    pub fn type_speed(&self) -> Duration {
        Duration::from_millis(self.base_type_speed_ms)
    }

    /// Deletion delay as a [`Duration`].
    #[inline]
    pub fn backspace_speed(&self) -> Duration {
        Duration::from_millis(self.base_backspace_speed_ms)
    }

    /// Pause hold time as a [`Duration`].
    #[inline]
    pub fn pause_delay(&self) -> Duration {
        Duration::from_millis(self.pause_delay_ms)
    }

    /// Typo probability actually used by the stepper.
    ///
    /// Always 0 for the plain variant.
    #[inline]
    pub fn effective_error_chance(&self) -> f64 {
        match self.variant {
            Variant::Human => self.error_chance,
            Variant::Plain => 0.0,
        }
    }
}
