//! h - query GPT models from the safety of your terminal.
//!
//! Sends a prompt to the OpenAI chat API and prints the reply to stdout.
//! Without `--prompt`, the prompt is written in `$EDITOR`. The last
//! conversation is cached in `~/.h-data/latest.json` so `--continue` can
//! pick up where it left off.

mod app;
mod client;
mod config;
mod conversation;
mod error;
mod llm;
mod models;
mod store;

use anyhow::{Context, Result};
use clap::builder::styling::{Style, Styles};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "h")]
#[command(version, styles = help_styles())]
#[command(
    about = "Query GPT models from the safety of your terminal.\nUnix-friendly for use within bash pipelines."
)]
struct Cli {
    /// Which GPT model to use
    #[arg(short = 'm', long, value_name = "MODEL", default_value = models::DEFAULT_MODEL)]
    model: String,

    /// The prompt to send GPT
    #[arg(short = 'p', long, value_name = "PROMPT")]
    prompt: Option<String>,

    /// Continue from the last conversation
    #[arg(short = 'c', long = "continue")]
    continue_conversation: bool,
}

/// Bold section titles, nothing else styled.
fn help_styles() -> Styles {
    let bold = Style::new().bold();
    Styles::plain().header(bold).usage(bold)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = handle_query(cli).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout only ever carries the model's reply.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("h=warn,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve configuration, run the query and print the reply.
async fn handle_query(cli: Cli) -> Result<()> {
    models::validate_model(&cli.model)?;

    let config = config::Config::load().context("Failed to load configuration")?;

    let store = store::FileStore::new(&config.data_dir, config.latest_path());
    let editor = client::Editor::new(&config.editor, &config.data_dir);
    let dispatcher = llm::OpenAIDispatcher::from_config(&config);
    debug!("Using cache file {}", store.latest_path().display());

    let query = app::Query {
        model: cli.model,
        prompt: cli.prompt,
        continue_conversation: cli.continue_conversation,
    };

    let reply = app::run(query, &store, &editor, &dispatcher).await?;
    println!("{}", reply);
    Ok(())
}
