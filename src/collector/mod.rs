//! Growing the dictionary from words the operator supplies during a chat

use anyhow::Result;
use colored::Colorize;
use regex::Regex;
use std::collections::HashSet;
use std::io;

use crate::cli::PendingArgs;
use crate::config::Config;
use crate::dictionary::{Dictionary, DictionaryError, DictionaryStore};
use crate::session::Session;

const FINGERPRINT_LEN: usize = 8;

/// An alphabetic word from the input that the dictionary does not know yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToken {
    pub token: String,
    pub fingerprint: String,
}

#[derive(Debug)]
pub enum CollectOutcome {
    Saved { token: String, value: String },
    Skipped { token: String },
    Failed { token: String, error: DictionaryError },
}

/// Source of values for pending words, usually the operator at a terminal.
pub trait ValuePrompt {
    /// `None` or an empty string leaves the word pending.
    fn ask(&mut self, pending: &PendingToken) -> io::Result<Option<String>>;
}

/// Short md5 prefix of the word followed by the full input text.
pub fn fingerprint(token: &str, text: &str) -> String {
    let digest = md5::compute(format!("{}{}", token, text));
    let mut hex = format!("{:x}", digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Unique lowercase alphabetic words of `text` that are neither in the
/// dictionary nor already resolved in this session, in first-seen order.
pub fn pending_tokens(
    text: &str,
    dictionary: &Dictionary,
    session: &Session,
) -> Vec<PendingToken> {
    let alpha_re = Regex::new(r"^[A-Za-z]+$").expect("alphabetic token pattern");
    let mut seen = HashSet::new();

    text.split_whitespace()
        .filter(|word| alpha_re.is_match(word))
        .map(str::to_lowercase)
        .filter(|token| seen.insert(token.clone()))
        .filter(|token| !dictionary.contains(token))
        .filter_map(|token| {
            let fingerprint = fingerprint(&token, text);
            if session.is_resolved(&token, &fingerprint) {
                None
            } else {
                Some(PendingToken { token, fingerprint })
            }
        })
        .collect()
}

/// Asks for a value for every pending word and appends the supplied ones.
/// A failed write is reported for that word only; earlier saves stay.
pub fn collect<P: ValuePrompt>(
    text: &str,
    store: &mut DictionaryStore,
    session: &mut Session,
    prompt: &mut P,
) -> Result<Vec<CollectOutcome>> {
    let pending = pending_tokens(text, store.get()?, session);
    let mut outcomes = Vec::with_capacity(pending.len());

    for item in pending {
        let value = prompt
            .ask(&item)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let Some(value) = value else {
            tracing::debug!("No value supplied for '{}'", item.token);
            outcomes.push(CollectOutcome::Skipped { token: item.token });
            continue;
        };

        match store.append(&item.token, &value) {
            Ok(()) => {
                session.mark_resolved(&item.token, &item.fingerprint);
                session.record_saved(&item.token);
                outcomes.push(CollectOutcome::Saved {
                    token: item.token,
                    value,
                });
            }
            Err(error) => {
                tracing::warn!("Could not save '{}': {}", item.token, error);
                outcomes.push(CollectOutcome::Failed {
                    token: item.token,
                    error,
                });
            }
        }
    }

    Ok(outcomes)
}

pub fn run_pending(args: PendingArgs) -> Result<()> {
    let cfg = Config::load().unwrap_or_default();
    let mut store = DictionaryStore::new(cfg.dictionary_path(args.dict.as_deref()));
    let pending = pending_tokens(&args.text, store.get()?, &Session::new());

    if pending.is_empty() {
        println!("{}", "[OK] Every word is in the dictionary".green());
        return Ok(());
    }

    println!(
        "{}",
        format!("[Pending] {} unknown word(s)", pending.len()).yellow()
    );
    for item in pending {
        println!("  {}  {}", item.fingerprint.dimmed(), item.token);
    }

    Ok(())
}
