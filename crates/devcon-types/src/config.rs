//! Console configuration (`devcon.toml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConsoleError, Result};

/// Tunables for the console interpreter and its host.
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Where aliases, event hooks and the font size are persisted.
    pub state_file: PathBuf,
    /// Text shown in front of the composing line.
    pub prompt: String,
    /// Font size used on first run and by `fontsize reset`.
    pub default_font_size: i32,
    pub min_font_size: i32,
    pub max_font_size: i32,
    /// Ceiling applied to each individual delay request, in seconds.
    pub max_delay_secs: f64,
    /// How many alias expansions may nest before the chain is aborted.
    pub max_alias_depth: usize,
    /// Host tick interval.
    pub tick_millis: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("devconsole.json"),
            prompt: "> ".to_string(),
            default_font_size: 8,
            min_font_size: 1,
            max_font_size: 50,
            max_delay_secs: 59.0,
            max_alias_depth: 16,
            tick_millis: 16,
        }
    }
}

impl ConsoleConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: ConsoleConfig = toml::from_str(toml_str)
            .map_err(|e| ConsoleError::Config(format!("devcon.toml: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Reject values the interpreter cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.min_font_size > self.max_font_size {
            return Err(ConsoleError::Config(format!(
                "font size range {}..={} is empty",
                self.min_font_size, self.max_font_size
            )));
        }
        if self.max_alias_depth == 0 {
            return Err(ConsoleError::Config(
                "max_alias_depth must be at least 1".to_string(),
            ));
        }
        if self.max_delay_secs <= 0.0 || !self.max_delay_secs.is_finite() {
            return Err(ConsoleError::Config(format!(
                "max_delay_secs must be positive, got {}",
                self.max_delay_secs
            )));
        }
        if self.tick_millis == 0 {
            return Err(ConsoleError::Config("tick_millis must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Clamp a requested font size into the configured range.
    pub fn clamp_font_size(&self, size: i32) -> i32 {
        size.clamp(self.min_font_size, self.max_font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = ConsoleConfig::from_toml(
            r#"
prompt = "$ "
max_alias_depth = 4
"#,
        )
        .unwrap();
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.max_alias_depth, 4);
        assert_eq!(config.max_delay_secs, 59.0);
        assert_eq!(config.default_font_size, 8);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = ConsoleConfig::from_toml("prompt = ").unwrap_err();
        assert!(matches!(&err, ConsoleError::Config(msg) if msg.starts_with("devcon.toml: ")));
    }

    #[test]
    fn inverted_font_range_rejected() {
        let err = ConsoleConfig::from_toml("min_font_size = 10\nmax_font_size = 2").unwrap_err();
        assert!(format!("{err}").contains("font size range"));
    }

    #[test]
    fn zero_depth_rejected() {
        assert!(ConsoleConfig::from_toml("max_alias_depth = 0").is_err());
    }

    #[test]
    fn non_positive_delay_ceiling_rejected() {
        assert!(ConsoleConfig::from_toml("max_delay_secs = 0.0").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devcon.toml");
        std::fs::write(&path, "tick_millis = 33\nstate_file = \"save.json\"").unwrap();
        let config = ConsoleConfig::load(&path).unwrap();
        assert_eq!(config.tick_millis, 33);
        assert_eq!(config.state_file, PathBuf::from("save.json"));
    }

    #[test]
    fn clamp_font_size_bounds() {
        let config = ConsoleConfig::default();
        assert_eq!(config.clamp_font_size(0), 1);
        assert_eq!(config.clamp_font_size(12), 12);
        assert_eq!(config.clamp_font_size(500), 50);
    }
}
