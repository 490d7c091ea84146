//! Config command handlers

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use super::Config;
use crate::cli::{ConfigAction, ConfigArgs};
use crate::translit::FallbackPolicy;

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(),
        ConfigAction::Init { force } => init_config(force),
        ConfigAction::Set { key, value } => set_config(&key, &value),
        ConfigAction::Get { key } => get_config(&key),
        ConfigAction::Path => show_path(),
        ConfigAction::Edit => edit_config(),
    }
}

fn show_config() -> Result<()> {
    let config = Config::load()?;
    let content = toml::to_string_pretty(&config)?;

    println!("{}", "[Config]".green());
    println!("{}", content);

    Ok(())
}

fn init_config(force: bool) -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() && !force {
        println!(
            "{}",
            format!("Config file already exists: {}", path.display()).yellow()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config::default();
    let saved_path = config.save()?;

    println!("{}", "[Config] Initialized".green());
    println!("  Created: {}", saved_path.display());
    println!();
    println!("Point it at your dictionary table:");
    println!("  lisan config set dictionary.path /path/to/transliteration_dataset.csv");

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    apply_setting(&mut config, key, value)?;

    config.save()?;
    println!("{}", format!("[Config] Set {} = {}", key, value).green());

    Ok(())
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    // Parse key path (e.g., "transliteration.fallback")
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["dictionary", "path"] => {
            config.dictionary.path = PathBuf::from(value);
        }
        ["transliteration", "fallback"] => {
            config.transliteration.fallback =
                FallbackPolicy::parse(value).with_context(|| {
                    format!("Unknown fallback policy: {} (use echo or bracket)", value)
                })?;
        }
        ["transliteration", "numeric_filter_trigger"] => {
            config.transliteration.numeric_filter_trigger = value.trim().to_string();
        }
        ["render", "font_path"] => {
            config.render.font_path = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        ["render", "font_family"] => {
            config.render.font_family = value.to_string();
        }
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    }

    Ok(())
}

fn get_config(key: &str) -> Result<()> {
    let config = Config::load()?;
    let parts: Vec<&str> = key.split('.').collect();

    let value: Option<String> = match parts.as_slice() {
        ["dictionary", "path"] => Some(config.dictionary.path.display().to_string()),
        ["transliteration", "fallback"] => Some(config.transliteration.fallback.to_string()),
        ["transliteration", "numeric_filter_trigger"] => {
            Some(config.transliteration.numeric_filter_trigger)
        }
        ["render", "font_path"] => config.render.font_path.map(|p| p.display().to_string()),
        ["render", "font_family"] => Some(config.render.font_family),
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    };

    match value {
        Some(v) => println!("{} = {}", key, v),
        None => println!("{} = (not set)", key),
    }

    Ok(())
}

fn show_path() -> Result<()> {
    match Config::config_path() {
        Some(path) => {
            println!("{}", path.display());
            if path.exists() {
                println!("{}", "(exists)".green());
            } else {
                println!("{}", "(not created)".yellow());
            }
        }
        None => {
            println!("{}", "Could not determine config path".red());
        }
    }
    Ok(())
}

fn edit_config() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Create default config if it doesn't exist
    if !path.exists() {
        let config = Config::default();
        config.save()?;
        println!("{}", "[Config] Created default config".green());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening config with: {}", editor);
    println!("Path: {}", path.display());

    std::process::Command::new(&editor)
        .arg(&path)
        .status()
        .context(format!("Failed to open editor: {}", editor))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_fallback_setting() {
        let mut config = Config::default();
        apply_setting(&mut config, "transliteration.fallback", "Bracket").unwrap();
        assert_eq!(config.transliteration.fallback, FallbackPolicy::Bracket);

        assert!(apply_setting(&mut config, "transliteration.fallback", "shout").is_err());
        assert_eq!(config.transliteration.fallback, FallbackPolicy::Bracket);
    }

    #[test]
    fn test_apply_clears_font_path() {
        let mut config = Config::default();
        apply_setting(&mut config, "render.font_path", "Amiri.ttf").unwrap();
        assert_eq!(config.render.font_path, Some(PathBuf::from("Amiri.ttf")));
        apply_setting(&mut config, "render.font_path", "").unwrap();
        assert_eq!(config.render.font_path, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "api.openai_api_key", "x").is_err());
    }
}
