use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::translit::FallbackPolicy;

#[derive(Parser)]
#[command(name = "lisan")]
#[command(author, version, long_about = None)]
#[command(about = "English-to-Arabic transliteration chat tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive transliteration chat that learns unknown words
    Chat(ChatArgs),

    /// Transliterate text once and print the result
    Translate(TranslateArgs),

    /// List words that are missing from the dictionary
    Pending(PendingArgs),

    /// Append a word to the dictionary
    Add(AddArgs),

    /// Look up a single word
    Lookup(LookupArgs),

    /// Write transliterated text as a right-to-left HTML document
    Render(RenderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Initialize configuration file with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., transliteration.fallback)
        key: String,
        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show config file path
    Path,

    /// Edit config file with default editor
    Edit,
}

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Dictionary CSV file
    #[arg(short, long)]
    pub dict: Option<PathBuf>,

    /// What to do with unknown words
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackPolicy>,

    /// Font file to embed in HTML output
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Never ask for values of unknown words
    #[arg(long, default_value_t = false)]
    pub no_learn: bool,
}

#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Text to transliterate (reads stdin when omitted)
    pub text: Option<String>,

    /// Dictionary CSV file
    #[arg(short, long)]
    pub dict: Option<PathBuf>,

    /// What to do with unknown words
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackPolicy>,

    /// Print an HTML fragment instead of plain text
    #[arg(long, default_value_t = false)]
    pub html: bool,

    /// Font file to embed in HTML output
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Print a per-word JSON report
    #[arg(long, default_value_t = false, conflicts_with = "html")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct PendingArgs {
    /// Text to scan
    #[arg(required = true)]
    pub text: String,

    /// Dictionary CSV file
    #[arg(short, long)]
    pub dict: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Source word
    #[arg(required = true)]
    pub token: String,

    /// Arabic-script value
    #[arg(required = true)]
    pub value: String,

    /// Dictionary CSV file
    #[arg(short, long)]
    pub dict: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// Word to look up
    #[arg(required = true)]
    pub token: String,

    /// Dictionary CSV file
    #[arg(short, long)]
    pub dict: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Text to transliterate (reads stdin when omitted)
    pub text: Option<String>,

    /// Output HTML file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dictionary CSV file
    #[arg(short, long)]
    pub dict: Option<PathBuf>,

    /// What to do with unknown words
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackPolicy>,

    /// Font file to embed
    #[arg(long)]
    pub font: Option<PathBuf>,
}
