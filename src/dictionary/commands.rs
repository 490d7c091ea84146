//! Dictionary command handlers

use anyhow::{Context, Result};
use colored::Colorize;

use super::DictionaryStore;
use crate::cli::{AddArgs, LookupArgs};
use crate::config::Config;

pub fn run_add(args: AddArgs) -> Result<()> {
    let cfg = Config::load().unwrap_or_default();
    let path = cfg.dictionary_path(args.dict.as_deref());

    let token = args.token.trim();
    let value = args.value.trim();
    if token.is_empty() || value.is_empty() {
        anyhow::bail!("Both a word and a value are required");
    }

    let mut store = DictionaryStore::new(&path);
    store
        .append(token, value)
        .context("Failed to add dictionary entry")?;

    println!(
        "{}",
        format!("[OK] Added {} → {} ({})", token, value, path.display()).green()
    );

    Ok(())
}

pub fn run_lookup(args: LookupArgs) -> Result<()> {
    let cfg = Config::load().unwrap_or_default();
    let mut store = DictionaryStore::new(cfg.dictionary_path(args.dict.as_deref()));
    let dictionary = store.get()?;

    match dictionary.lookup(&args.token) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => anyhow::bail!("'{}' is not in the dictionary", args.token.trim()),
    }
}
