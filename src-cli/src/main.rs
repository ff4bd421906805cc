//! chat-pdf - Export chat transcripts to PDF
//!
//! Reads JSON transcripts and export options and writes paginated PDF files
//! through the `store` export API.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use layout_engine::{Conversation, ExportOptions, ExportOutcome, Message};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chat-pdf")]
#[command(version, about = "Export chat transcripts to paginated PDF documents", long_about = None)]
#[command(after_help = "EXAMPLES:
    chat-pdf export chat.json --output chat.pdf
    chat-pdf exchange --query \"What is X?\" --response \"X is Y.\"
    chat-pdf batch conversations.json --options opts.json

Set RUST_LOG=debug for page break and logo diagnostics.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export a transcript of role-tagged messages
    Export {
        /// JSON array of messages, or an object with a `messages` array
        #[arg(value_name = "TRANSCRIPT")]
        transcript: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Export a single query and response
    Exchange {
        #[arg(long)]
        query: String,

        #[arg(long)]
        response: String,

        /// Shown on both role lines; defaults to the current time
        #[arg(long)]
        timestamp: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Export several query/response pairs into one document
    Batch {
        /// JSON array of `{ "query", "response", "timestamp" }` objects
        #[arg(value_name = "CONVERSATIONS")]
        conversations: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// JSON export options (camelCase keys, all optional)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Output file, overrides `fileName` from the options
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

impl OutputArgs {
    fn export_options(&self) -> Result<ExportOptions> {
        let options = match &self.options {
            Some(path) => read_json::<ExportOptions>(path)?,
            None => ExportOptions::default(),
        };
        Ok(match &self.output {
            Some(file_name) => options.with_file_name(file_name.clone()),
            None => options,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Messages(Vec<Message>),
    Wrapped { messages: Vec<Message> },
}

impl TranscriptFile {
    fn into_messages(self) -> Vec<Message> {
        match self {
            TranscriptFile::Messages(messages) => messages,
            TranscriptFile::Wrapped { messages } => messages,
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn run(command: Command) -> Result<ExportOutcome> {
    let outcome = match command {
        Command::Export { transcript, output } => {
            let messages = read_json::<TranscriptFile>(&transcript)?.into_messages();
            store::export_conversation(&messages, &output.export_options()?)?
        }
        Command::Exchange {
            query,
            response,
            timestamp,
            output,
        } => store::export_exchange(
            &query,
            &response,
            timestamp.as_deref(),
            &output.export_options()?,
        )?,
        Command::Batch {
            conversations,
            output,
        } => {
            let conversations = read_json::<Vec<Conversation>>(&conversations)?;
            store::export_conversations(&conversations, &output.export_options()?)?
        }
    };
    Ok(outcome)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(ExportOutcome::Saved(summary)) => {
            println!(
                "Saved {} ({} pages, {} lines)",
                summary.file_name, summary.pages, summary.lines
            );
            ExitCode::SUCCESS
        }
        Ok(ExportOutcome::Skipped) => {
            println!("Nothing to export");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
