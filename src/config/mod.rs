//! Configuration management

pub mod commands;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::translit::FallbackPolicy;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_NAME: &str = "lisan";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    #[serde(default)]
    pub transliteration: TransliterationConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// CSV table of `source,target` rows
    #[serde(default = "default_dictionary_path")]
    pub path: PathBuf,
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from("transliteration_dataset.csv")
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_dictionary_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransliterationConfig {
    /// Policy for words missing from the dictionary (echo, bracket)
    #[serde(default)]
    pub fallback: FallbackPolicy,

    /// Word that switches on numeric-token stripping; empty disables it
    #[serde(default = "default_numeric_filter_trigger")]
    pub numeric_filter_trigger: String,
}

fn default_numeric_filter_trigger() -> String {
    "mubaraka".to_string()
}

impl Default for TransliterationConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::default(),
            numeric_filter_trigger: default_numeric_filter_trigger(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Font file embedded into HTML output
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// CSS family name used for the embedded font
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

fn default_font_family() -> String {
    "LisanArabic".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_family: default_font_family(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join(CONFIG_FILE_NAME))
    }

    /// Load config from default location
    pub fn load() -> Result<Self> {
        let path = Self::config_path().context("Could not determine config path")?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to default location
    pub fn save(&self) -> Result<PathBuf> {
        let dir = Self::config_dir().context("Could not determine config directory")?;
        fs::create_dir_all(&dir).context("Failed to create config directory")?;

        let path = dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content).context("Failed to write config file")?;

        Ok(path)
    }

    /// Dictionary path (CLI arg > config)
    pub fn dictionary_path(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .unwrap_or_else(|| self.dictionary.path.clone())
    }

    /// Fallback policy (CLI arg > config)
    pub fn fallback(&self, cli: Option<FallbackPolicy>) -> FallbackPolicy {
        cli.unwrap_or(self.transliteration.fallback)
    }

    /// Font file (CLI arg > config)
    pub fn font_path(&self, cli: Option<&Path>) -> Option<PathBuf> {
        cli.map(Path::to_path_buf)
            .or_else(|| self.render.font_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[transliteration]\nfallback = \"bracket\"\n").unwrap();
        assert_eq!(config.transliteration.fallback, FallbackPolicy::Bracket);
        assert_eq!(config.transliteration.numeric_filter_trigger, "mubaraka");
        assert_eq!(
            config.dictionary.path,
            PathBuf::from("transliteration_dataset.csv")
        );
        assert_eq!(config.render.font_family, "LisanArabic");
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        config.transliteration.fallback = FallbackPolicy::Bracket;
        config.dictionary.path = PathBuf::from("from_config.csv");

        assert_eq!(config.fallback(Some(FallbackPolicy::Echo)), FallbackPolicy::Echo);
        assert_eq!(config.fallback(None), FallbackPolicy::Bracket);
        assert_eq!(
            config.dictionary_path(Some(Path::new("cli.csv"))),
            PathBuf::from("cli.csv")
        );
        assert_eq!(config.dictionary_path(None), PathBuf::from("from_config.csv"));
        assert_eq!(config.font_path(None), None);
    }

    #[test]
    fn test_round_trip_toml() {
        let mut config = Config::default();
        config.render.font_path = Some(PathBuf::from("fonts/Amiri.ttf"));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.render.font_path, Some(PathBuf::from("fonts/Amiri.ttf")));
    }
}
