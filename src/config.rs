use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::keyboard::layout::Row;
use crate::keyboard::model::KeyboardDefinition;
use crate::session::secondary::SecondaryPolicy;
use crate::session::text::Casing;
use crate::typer::TyperOptions;

/// `show_secondary_chars` as written in the config file: a flag or a delay in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecondaryChars {
    Enabled(bool),
    DelaySeconds(f64),
}

impl SecondaryChars {
    pub fn policy(self) -> crate::error::Result<SecondaryPolicy> {
        match self {
            SecondaryChars::Enabled(false) => Ok(SecondaryPolicy::Disabled),
            SecondaryChars::Enabled(true) => Ok(SecondaryPolicy::Immediate),
            SecondaryChars::DelaySeconds(secs) => TyperOptions::secondary_delay(secs),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default)]
    pub casing: Casing,
    #[serde(default = "default_show_secondary_chars")]
    pub show_secondary_chars: SecondaryChars,
    #[serde(default)]
    pub hidden_rows: Vec<Row>,
    #[serde(default)]
    pub keyboard_file: Option<String>,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_max_length() -> usize {
    0
}
fn default_show_secondary_chars() -> SecondaryChars {
    SecondaryChars::DelaySeconds(1.5)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            max_length: default_max_length(),
            casing: Casing::default(),
            show_secondary_chars: default_show_secondary_chars(),
            hidden_rows: Vec::new(),
            keyboard_file: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typer")
            .join("config.toml")
    }

    /// Build validated core options, loading the keyboard file when one is set.
    pub fn typer_options(&self) -> crate::error::Result<TyperOptions> {
        let keyboard = match &self.keyboard_file {
            Some(path) => KeyboardDefinition::load(Path::new(path))?,
            None => KeyboardDefinition::latin(),
        };
        Ok(TyperOptions {
            max_length: self.max_length,
            casing: self.casing,
            keyboard,
            secondary: self.show_secondary_chars.policy()?,
            hidden_rows: self.hidden_rows.clone(),
        })
    }
}
