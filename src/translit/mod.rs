pub mod filter;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, IsTerminal};

use crate::cli::TranslateArgs;
use crate::config::Config;
use crate::dictionary::{Dictionary, DictionaryStore};
use crate::render::HtmlRenderer;
use filter::NumericFilter;

/// What happens to a word the dictionary does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Keep the word unchanged
    #[default]
    Echo,
    /// Wrap the word as `[word]`
    Bracket,
}

impl FallbackPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "echo" => Some(Self::Echo),
            "bracket" => Some(Self::Bracket),
            _ => None,
        }
    }

    pub fn apply(&self, token: &str) -> String {
        match self {
            Self::Echo => token.to_string(),
            Self::Bracket => format!("[{}]", token),
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Echo => write!(f, "echo"),
            Self::Bracket => write!(f, "bracket"),
        }
    }
}

/// One word of a transliteration pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordResult {
    pub line: usize,
    pub source: String,
    pub output: String,
    pub found: bool,
}

/// Word-by-word transliteration. Blank input yields an empty string; other
/// input keeps its line count while whitespace runs collapse to one space.
pub fn transliterate(text: &str, dictionary: &Dictionary, policy: FallbackPolicy) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    trimmed
        .lines()
        .map(|line| {
            line.split_whitespace()
                .map(|token| transliterate_word(token, dictionary, policy).0)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Same pass as [`transliterate`], reported per word.
pub fn transliterate_words(
    text: &str,
    dictionary: &Dictionary,
    policy: FallbackPolicy,
) -> Vec<WordResult> {
    text.trim()
        .lines()
        .enumerate()
        .flat_map(|(idx, line)| {
            line.split_whitespace().map(move |token| {
                let (output, found) = transliterate_word(token, dictionary, policy);
                WordResult {
                    line: idx + 1,
                    source: token.to_string(),
                    output,
                    found,
                }
            })
        })
        .collect()
}

fn transliterate_word(
    token: &str,
    dictionary: &Dictionary,
    policy: FallbackPolicy,
) -> (String, bool) {
    match dictionary.lookup(token) {
        Some(value) => (value.to_string(), true),
        None => (policy.apply(token), false),
    }
}

pub fn run(args: TranslateArgs) -> Result<()> {
    let cfg = Config::load().unwrap_or_default();
    let policy = cfg.fallback(args.fallback);

    let text = match args.text {
        Some(text) => text,
        None => read_stdin()?,
    };

    let mut store = DictionaryStore::new(cfg.dictionary_path(args.dict.as_deref()));
    let dictionary = store.get()?;
    let filter = NumericFilter::new(&cfg.transliteration.numeric_filter_trigger);
    let text = filter.apply(&text);

    if args.json {
        let words = transliterate_words(&text, dictionary, policy);
        println!("{}", serde_json::to_string_pretty(&words)?);
    } else if args.html {
        let renderer = HtmlRenderer::from_config(&cfg, args.font.as_deref())?;
        println!("{}", renderer.render(&transliterate(&text, dictionary, policy)));
    } else {
        println!("{}", transliterate(&text, dictionary, policy));
    }

    Ok(())
}

pub fn read_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No text given. Pass it as an argument or pipe it on stdin.");
    }
    io::read_to_string(stdin).context("Failed to read text from stdin")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dictionary() -> Dictionary {
        [
            ("khabar", "خبر"),
            ("karwa", "کروا"),
            ("ma", "ما"),
            ("che", "چھے"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sentence() {
        let dict = sample_dictionary();
        let out = transliterate("khabar karwa ma che", &dict, FallbackPolicy::Echo);
        assert_eq!(out, "خبر کروا ما چھے");
    }

    #[test]
    fn test_case_insensitive_hit() {
        let dict = sample_dictionary();
        for input in ["khabar", "Khabar", "KHABAR"] {
            assert_eq!(transliterate(input, &dict, FallbackPolicy::Bracket), "خبر");
        }
    }

    #[test]
    fn test_fallback_policies() {
        let empty = Dictionary::new();
        assert_eq!(
            transliterate("hello world", &empty, FallbackPolicy::Bracket),
            "[hello] [world]"
        );
        assert_eq!(
            transliterate("Hello World", &empty, FallbackPolicy::Echo),
            "Hello World"
        );
    }

    #[test]
    fn test_target_script_is_stable() {
        let dict = sample_dictionary();
        let once = transliterate("khabar karwa ma che", &dict, FallbackPolicy::Echo);
        assert_eq!(transliterate(&once, &dict, FallbackPolicy::Echo), once);
    }

    #[test]
    fn test_lines_kept_and_spaces_collapsed() {
        let dict = sample_dictionary();
        let input = "  khabar   karwa\n\tma  che  \nfoo";
        let out = transliterate(input, &dict, FallbackPolicy::Echo);
        assert_eq!(out, "خبر کروا\nما چھے\nfoo");
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_blank_input() {
        let dict = sample_dictionary();
        assert_eq!(transliterate("", &dict, FallbackPolicy::Bracket), "");
        assert_eq!(transliterate(" \n\t\n ", &dict, FallbackPolicy::Bracket), "");
        assert!(transliterate_words("   ", &dict, FallbackPolicy::Echo).is_empty());
    }

    #[test]
    fn test_word_report() {
        let dict = sample_dictionary();
        let words = transliterate_words("khabar\nNew ma", &dict, FallbackPolicy::Bracket);
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].output, "خبر");
        assert!(words[0].found);
        assert_eq!(words[1].line, 2);
        assert_eq!(words[1].output, "[New]");
        assert!(!words[1].found);
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!(FallbackPolicy::parse(" BRACKET "), Some(FallbackPolicy::Bracket));
        assert_eq!(FallbackPolicy::parse("loud"), None);
        assert_eq!(FallbackPolicy::Echo.to_string(), "echo");
        assert_eq!(FallbackPolicy::default(), FallbackPolicy::Echo);
    }
}
