//! Terminal chat: read a sentence, learn unknown words, reply with the transliteration

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::cli::ChatArgs;
use crate::collector::{self, CollectOutcome, PendingToken, ValuePrompt};
use crate::config::Config;
use crate::dictionary::DictionaryStore;
use crate::render::HtmlRenderer;
use crate::session::{Role, Session};
use crate::translit::filter::NumericFilter;
use crate::translit::{FallbackPolicy, transliterate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads values for pending words from the same input the chat reads from.
struct LinePrompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> ValuePrompt for LinePrompt<'_, R, W> {
    fn ask(&mut self, pending: &PendingToken) -> io::Result<Option<String>> {
        write!(
            self.output,
            "  value for '{}' (enter to skip): ",
            pending.token.cyan()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let value = line.trim();
        if value.starts_with('/') {
            writeln!(
                self.output,
                "{}",
                format!("[WARN] Commands are not values, skipping '{}'", pending.token).yellow()
            )?;
            return Ok(None);
        }
        Ok(Some(value.to_string()))
    }
}

pub struct Chat {
    store: DictionaryStore,
    session: Session,
    policy: FallbackPolicy,
    filter: NumericFilter,
    renderer: HtmlRenderer,
    learn: bool,
}

impl Chat {
    pub fn new(
        store: DictionaryStore,
        policy: FallbackPolicy,
        filter: NumericFilter,
        renderer: HtmlRenderer,
        learn: bool,
    ) -> Self {
        Self {
            store,
            session: Session::new(),
            policy,
            filter,
            renderer,
            learn,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handles one line of operator input.
    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        output: &mut W,
    ) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        if let Some(command) = line.strip_prefix('/') {
            return self.command(command, output);
        }

        self.submit(line, input, output)?;
        Ok(Flow::Continue)
    }

    fn submit<R: BufRead, W: Write>(
        &mut self,
        text: &str,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        if let Err(error) = self.store.get() {
            writeln!(output, "{}", format!("[ERROR] {}", error).red())?;
            return Ok(());
        }

        self.session.push(Role::User, text);

        if self.learn {
            let mut prompt = LinePrompt {
                input: &mut *input,
                output: &mut *output,
            };
            let outcomes =
                collector::collect(text, &mut self.store, &mut self.session, &mut prompt)?;
            report_outcomes(&outcomes, output)?;
        }

        let filtered = self.filter.apply(text);
        let reply = transliterate(&filtered, self.store.get()?, self.policy);
        writeln!(output, "{} {}", "assistant>".blue().bold(), reply)?;
        self.session.push(Role::Assistant, reply);

        Ok(())
    }

    fn command<W: Write>(&mut self, command: &str, output: &mut W) -> Result<Flow> {
        let mut parts = command.split_whitespace();
        match (parts.next().unwrap_or_default(), parts.next()) {
            ("quit" | "exit", _) => return Ok(Flow::Quit),
            ("reset", _) => {
                self.session.reset();
                writeln!(output, "{}", "[Chat] Session cleared".green())?;
            }
            ("reload", _) => match self.store.reload() {
                Ok(dictionary) => {
                    let count = dictionary.len();
                    self.session.reset();
                    writeln!(
                        output,
                        "{}",
                        format!("[Chat] Reloaded {} entries, session cleared", count).green()
                    )?;
                }
                Err(error) => {
                    writeln!(output, "{}", format!("[ERROR] Reload failed: {}", error).red())?;
                }
            },
            ("history", Some("json")) => {
                writeln!(output, "{}", self.session.transcript_json()?)?;
            }
            ("history", _) => {
                for message in self.session.messages() {
                    writeln!(output, "{:>9}> {}", message.role, message.content)?;
                }
            }
            ("html", _) => match self.session.last_reply() {
                Some(reply) => writeln!(output, "{}", self.renderer.render(reply))?,
                None => writeln!(output, "{}", "[WARN] Nothing to render yet".yellow())?,
            },
            ("help", _) => print_help(output)?,
            (other, _) => {
                writeln!(
                    output,
                    "{}",
                    format!("[WARN] Unknown command /{} (try /help)", other).yellow()
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Runs until `/quit` or end of input.
    pub fn run_loop<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        loop {
            write!(output, "{} ", "you>".green().bold())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            if self.handle(&line, input, output)? == Flow::Quit {
                break;
            }
        }

        if !self.session.saved().is_empty() {
            writeln!(
                output,
                "{}",
                format!(
                    "[Chat] Learned {} new word(s) this session",
                    self.session.saved().len()
                )
                .green()
            )?;
        }
        Ok(())
    }
}

fn report_outcomes<W: Write>(outcomes: &[CollectOutcome], output: &mut W) -> io::Result<()> {
    for outcome in outcomes {
        match outcome {
            CollectOutcome::Saved { token, value } => {
                writeln!(output, "{}", format!("[OK] Saved {} → {}", token, value).green())?
            }
            CollectOutcome::Skipped { .. } => {}
            CollectOutcome::Failed { token, error } => writeln!(
                output,
                "{}",
                format!("[ERROR] Could not save {}: {}", token, error).red()
            )?,
        }
    }
    Ok(())
}

fn print_help<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "Type a sentence to transliterate it. Commands:")?;
    writeln!(output, "  /history [json]  show this session's messages")?;
    writeln!(output, "  /html            show the last reply as RTL HTML")?;
    writeln!(output, "  /reset           clear the session")?;
    writeln!(output, "  /reload          reread the dictionary and clear the session")?;
    writeln!(output, "  /quit            leave")
}

pub fn run(args: ChatArgs) -> Result<()> {
    let cfg = Config::load().unwrap_or_default();
    let policy = cfg.fallback(args.fallback);
    let renderer = HtmlRenderer::from_config(&cfg, args.font.as_deref())?;
    let filter = NumericFilter::new(&cfg.transliteration.numeric_filter_trigger);

    let mut store = DictionaryStore::new(cfg.dictionary_path(args.dict.as_deref()));
    let dictionary = store
        .get()
        .context("Cannot start chat without a dictionary")?;
    let count = dictionary.len();
    if dictionary.is_empty() {
        println!(
            "{}",
            "[WARN] Dictionary is empty, every word will fall back".yellow()
        );
    }

    println!("{}", "[Chat] English-Arabic transliteration".green());
    println!(
        "  {} entries from {}, fallback: {}",
        count,
        store.path().display(),
        policy
    );
    println!("  Type /help for commands");

    let mut chat = Chat::new(store, policy, filter, renderer, !args.no_learn);
    let stdin = io::stdin();
    let stdout = io::stdout();
    chat.run_loop(&mut stdin.lock(), &mut stdout.lock())
}
