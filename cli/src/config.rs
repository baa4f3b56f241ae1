//! CLI Configuration

use anyhow::{anyhow, bail, Context};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use agency_forms::Locale;

use crate::output::OutputFormat;

/// Keys accepted by `config set|get`
pub const KEYS: [&str; 3] = ["api_url", "locale", "default_format"];

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub locale: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn save(&self, profile: Option<&str>) -> anyhow::Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))
    }

    pub fn config_path(profile: Option<&str>) -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot find home directory"))?;
        Ok(profile_path(&home, profile))
    }

    /// Set a key after checking the value parses
    pub fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        match key {
            "api_url" => self.api_url = Some(value.trim_end_matches('/').to_string()),
            "locale" => {
                value.parse::<Locale>()?;
                self.locale = Some(value);
            }
            "default_format" => {
                OutputFormat::from_str(&value, true).map_err(|e| anyhow!(e))?;
                self.default_format = Some(value);
            }
            _ => bail!("Unknown config key: {} (expected one of {})", key, KEYS.join(", ")),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<&str>> {
        Ok(match key {
            "api_url" => self.api_url.as_deref(),
            "locale" => self.locale.as_deref(),
            "default_format" => self.default_format.as_deref(),
            _ => bail!("Unknown config key: {} (expected one of {})", key, KEYS.join(", ")),
        })
    }

    pub fn default_format(&self) -> anyhow::Result<OutputFormat> {
        match &self.default_format {
            Some(raw) => OutputFormat::from_str(raw, true).map_err(|e| anyhow!(e)),
            None => Ok(OutputFormat::Table),
        }
    }
}

fn profile_path(home: &Path, profile: Option<&str>) -> PathBuf {
    let filename = match profile {
        Some(p) => format!("config.{}.toml", p),
        None => "config.toml".to_string(),
    };
    home.join(".agency").join(filename)
}
