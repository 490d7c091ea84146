mod chat;
mod cli;
mod collector;
mod config;
mod dictionary;
mod render;
mod session;
mod translit;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat(args) => chat::run(args)?,
        Commands::Translate(args) => translit::run(args)?,
        Commands::Pending(args) => collector::run_pending(args)?,
        Commands::Add(args) => dictionary::commands::run_add(args)?,
        Commands::Lookup(args) => dictionary::commands::run_lookup(args)?,
        Commands::Render(args) => render::run(args)?,
        Commands::Config(args) => config::commands::run(args)?,
    }

    Ok(())
}
