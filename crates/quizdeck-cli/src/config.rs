//! TOML-based CLI configuration.
//!
//! Stores player preferences at `~/.config/quizdeck/config.toml`:
//! - Whether grading feedback is shown after each answer during play
//! - Whether reports default to JSON output

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Play-mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Reveal correct/incorrect immediately after each answer.
    #[serde(default = "default_true")]
    pub show_feedback: bool,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            show_feedback: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default reports to JSON instead of plain text.
    #[serde(default)]
    pub json: bool,
}

/// CLI configuration.
///
/// Serialized to/from TOML at `~/.config/quizdeck/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub play: PlayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizdeck")
            .join("config.toml")
    }

    /// Load the config, falling back to defaults on a missing or
    /// unparseable file.
    pub fn load() -> Self {
        match fs::read_to_string(Self::path()) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Dotted-key lookup, e.g. `play.show_feedback`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "play.show_feedback" => Some(self.play.show_feedback.to_string()),
            "output.json" => Some(self.output.json.to_string()),
            _ => None,
        }
    }

    /// Dotted-key update; persists on success.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        match key {
            "play.show_feedback" => self.play.show_feedback = value.parse()?,
            "output.json" => self.output.json = value.parse()?,
            _ => return Err(format!("unknown config key: {key}").into()),
        }
        self.save()
    }
}
