//! Layered run settings.
//!
//! Built-in defaults, then the TOML config file, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use typist_core::{ConfigError, ConfigResult, DEFAULT_FPS, TypingConfig, Variant};

use super::args::Cli;

/// Messages shown when neither the command line nor the config file gives any.
pub const DEFAULT_MESSAGES: &[&str] = &["Hello World!", "This is a typing demo."];

/// Config file name inside the typist config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of a typist config file.
///
/// ```toml
/// messages = ["Hello World!", "This is a typing demo."]
/// fps = 30
/// base_type_speed_ms = 80
/// error_chance = 0.1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(flatten)]
    pub typing: TypingConfig,

    pub messages: Option<Vec<String>>,

    pub fps: Option<u32>,
}

impl FileConfig {
    /// Parses a config document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

/// Default config path: `<config dir>/typist/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("typist").join(CONFIG_FILE_NAME))
}

/// Everything needed to run the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub typing: TypingConfig,
    pub messages: Vec<String>,
    pub fps: u32,
    pub seed: Option<u64>,
    pub duration: Option<Duration>,
    pub headless: bool,
}

impl Settings {
    /// Resolves settings for `cli`, reading the config file if there is one.
    ///
    /// An explicit `--config` path must exist. The default path is only
    /// used when present.
    pub fn resolve(cli: &Cli) -> ConfigResult<Self> {
        let file = match &cli.config {
            Some(path) => Some(FileConfig::load(path)?),
            None => match default_config_path() {
                Some(path) if path.is_file() => Some(FileConfig::load(&path)?),
                _ => None,
            },
        };
        Self::from_layers(file, cli)
    }

    /// Merges an optional file layer and the command-line layer over defaults.
    pub fn from_layers(file: Option<FileConfig>, cli: &Cli) -> ConfigResult<Self> {
        let file = file.unwrap_or_default();
        if file.fps.is_some() || file.messages.is_some() {
            debug!("applying config file layer");
        }

        let mut typing = file.typing;
        if let Some(ms) = cli.type_speed {
            typing = typing.with_type_speed(ms);
        }
        if let Some(ms) = cli.backspace_speed {
            typing = typing.with_backspace_speed(ms);
        }
        if let Some(ms) = cli.pause {
            typing = typing.with_pause_delay(ms);
        }
        if let Some(chance) = cli.error_chance {
            typing = typing.with_error_chance(chance);
        }
        if cli.plain {
            typing = typing.with_variant(Variant::Plain);
        }

        let messages = if !cli.messages.is_empty() {
            cli.messages.clone()
        } else if let Some(messages) = file.messages {
            messages
        } else {
            DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect()
        };

        let fps = cli.fps.or(file.fps).unwrap_or(DEFAULT_FPS);
        if fps == 0 {
            return Err(ConfigError::Invalid("fps must be at least 1".to_string()));
        }

        let duration = cli.duration.map(parse_duration).transpose()?;

        Ok(Self {
            typing: typing.sanitized(),
            messages,
            fps,
            seed: cli.seed,
            duration,
            headless: cli.headless,
        })
    }
}

fn parse_duration(secs: f64) -> ConfigResult<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "duration must be a positive number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["typist"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::from_layers(None, &cli(&[])).unwrap();
        assert_eq!(settings.typing, TypingConfig::default());
        assert_eq!(settings.messages, vec!["Hello World!", "This is a typing demo."]);
        assert_eq!(settings.fps, DEFAULT_FPS);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.duration, None);
        assert!(!settings.headless);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = FileConfig::from_toml_str(
            r#"
            messages = ["from file"]
            fps = 30
            base_type_speed_ms = 80
            variant = "plain"
            "#,
        )
        .unwrap();

        let settings = Settings::from_layers(Some(file), &cli(&[])).unwrap();
        assert_eq!(settings.messages, vec!["from file"]);
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.typing.base_type_speed_ms, 80);
        assert_eq!(settings.typing.base_backspace_speed_ms, 100);
        assert_eq!(settings.typing.variant, Variant::Plain);
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig::from_toml_str(
            r#"
            messages = ["from file"]
            fps = 30
            base_type_speed_ms = 80
            error_chance = 0.5
            "#,
        )
        .unwrap();

        let settings = Settings::from_layers(
            Some(file),
            &cli(&["--type-speed", "40", "--fps", "90", "--plain", "from flags"]),
        )
        .unwrap();
        assert_eq!(settings.messages, vec!["from flags"]);
        assert_eq!(settings.fps, 90);
        assert_eq!(settings.typing.base_type_speed_ms, 40);
        assert_eq!(settings.typing.error_chance, 0.5);
        assert_eq!(settings.typing.variant, Variant::Plain);
    }

    #[test]
    fn test_empty_message_list_in_file_is_kept() {
        let file = FileConfig::from_toml_str("messages = []").unwrap();
        let settings = Settings::from_layers(Some(file), &cli(&[])).unwrap();
        assert!(settings.messages.is_empty());
    }

    #[test]
    fn test_error_chance_flag_is_clamped() {
        let settings = Settings::from_layers(None, &cli(&["--error-chance", "3.5"])).unwrap();
        assert_eq!(settings.typing.error_chance, 1.0);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let err = Settings::from_layers(None, &cli(&["--fps", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let file = FileConfig::from_toml_str("fps = 0").unwrap();
        assert!(Settings::from_layers(Some(file), &cli(&[])).is_err());
    }

    #[test]
    fn test_duration() {
        let settings = Settings::from_layers(None, &cli(&["--duration", "1.5"])).unwrap();
        assert_eq!(settings.duration, Some(Duration::from_millis(1500)));

        let err = Settings::from_layers(None, &cli(&["--duration", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_duration_in_file_rejected() {
        let err = FileConfig::from_toml_str("pause_delay_ms = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_resolve_reads_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "messages = [\"one\", \"two\"]").unwrap();
        writeln!(file, "pause_delay_ms = 250").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let settings = Settings::resolve(&cli(&["--config", &path])).unwrap();
        assert_eq!(settings.messages, vec!["one", "two"]);
        assert_eq!(settings.typing.pause_delay_ms, 250);
    }

    #[test]
    fn test_resolve_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let path = path.to_str().unwrap().to_string();

        let err = Settings::resolve(&cli(&["--config", &path])).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
