//! # Quill - Undoable Text Editing Session
//!
//! A line-driven editing session: append text, trim it, and walk the
//! change history backwards and forwards.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive session
//! cargo run
//!
//! # Start from a file's content
//! cargo run -- notes.txt
//!
//! # Replay a script of commands
//! cargo run -- --script edits.txt
//! ```

mod input;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use input::{Input, parse_line};
use quill_buffer::Document;
use quill_core::{Config, Session};

/// Quill - text editing with linear undo/redo
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File whose content seeds the document
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum number of undo steps (0 = unlimited)
    #[arg(long, value_name = "N")]
    undo_limit: Option<usize>,

    /// Initial document text
    #[arg(short, long, value_name = "TEXT")]
    text: Option<String>,

    /// Read commands from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// One row of `history json`.
#[derive(Debug, Serialize)]
struct HistoryEntry {
    index: usize,
    label: String,
    applied: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Quill v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    let mut session = match &args.file {
        Some(path) => {
            let document = Document::from_file(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Session::with_document(document, &config)
        }
        None => Session::with_config(&config),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            run_session(&mut session, BufReader::new(file), &mut out, &config, false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            run_session(&mut session, stdin.lock(), &mut out, &config, interactive)
        }
    }
}

/// Resolves the config file and applies command-line overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };

    if let Some(limit) = args.undo_limit {
        config.history.undo_limit = limit;
    }
    if let Some(text) = &args.text {
        config.session.initial_text = text.clone();
    }
    Ok(config)
}

/// Reads commands until exit or end of input.
fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
    config: &Config,
    interactive: bool,
) -> anyhow::Result<()> {
    loop {
        if interactive {
            write!(out, "{} ", config.session.prompt)?;
            out.flush()?;
        }

        let Some(line) = read_line(&mut input)? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        let result = match command {
            Input::Exit => break,
            Input::Empty => continue,
            Input::Insert(Some(text)) => session.insert(&text),
            Input::Insert(None) => {
                if interactive {
                    write!(out, "Enter text to insert: ")?;
                    out.flush()?;
                }
                let text = read_line(&mut input)?.unwrap_or_default();
                session.insert(&text)
            }
            Input::Delete(count) => session.delete(count),
            Input::Replace(count, text) => session.replace(count, &text),
            Input::Undo => session.undo().map(|_| ()),
            Input::Redo => session.redo().map(|_| ()),
            Input::History { json } => {
                print_history(session, out, json)?;
                continue;
            }
        };

        if let Err(err) = result {
            tracing::error!("Command failed: {}", err);
            writeln!(out, "error: {err}")?;
        }

        if config.session.echo {
            writeln!(out, "{}", session.text()?)?;
        }
    }

    Ok(())
}

/// Reads one line without its terminator, `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);
    Ok(Some(line))
}

fn print_history<W: Write>(session: &Session, out: &mut W, json: bool) -> anyhow::Result<()> {
    let history = session.history();

    if json {
        let entries: Vec<HistoryEntry> = history
            .labels()
            .map(|(index, label, applied)| HistoryEntry {
                index,
                label,
                applied,
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string(&entries)?)?;
        return Ok(());
    }

    if history.is_empty() {
        writeln!(out, "(no history)")?;
    }
    for (index, label, applied) in history.labels() {
        let marker = if Some(index) == history.head() { ">" } else { " " };
        let state = if applied { "" } else { " (undone)" };
        writeln!(out, "{marker} {index:>3}  {label}{state}")?;
    }
    Ok(())
}
