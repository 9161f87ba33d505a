//! CLI command definitions, routing, and tracing setup.

use std::io::Write as _;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use askdocs_core::Engine;
use askdocs_generation::GeminiGenerator;
use askdocs_retrieval::DocSearcher;
use askdocs_shared::{config_file_path, init_config, load_config, resolve_api_key};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// askdocs — ask questions, get answers grounded in your documentation.
#[derive(Parser)]
#[command(
    name = "askdocs",
    version,
    about = "Answer questions from a documentation corpus using retrieval-augmented generation.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Ask a single question and print the answer.
    Ask {
        /// The question to answer from the documentation.
        question: String,

        /// Override the number of passages retrieved per question.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Start an interactive question/answer session.
    Chat {
        /// Override the number of passages retrieved per question.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // One directive per workspace crate; upstream crates stay quiet.
    let filter = [
        "askdocs_cli",
        "askdocs_core",
        "askdocs_shared",
        "askdocs_retrieval",
        "askdocs_generation",
    ]
    .map(|krate| format!("{krate}={level}"))
    .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Ask { question, limit } => cmd_ask(&question, limit).await,
        Command::Chat { limit } => cmd_chat(limit).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Engine construction
// ---------------------------------------------------------------------------

/// Build the pipeline engine from config.
///
/// Fails fast on a missing API key or an unreachable/missing index —
/// a degraded engine is never constructed.
async fn build_engine(limit: Option<usize>) -> Result<Engine<DocSearcher, GeminiGenerator>> {
    let config = load_config()?;
    let api_key = resolve_api_key(&config)?;

    let searcher = DocSearcher::connect(&config, &api_key).await?;
    let generator = GeminiGenerator::new(&config, api_key)?;

    let passage_limit = limit.unwrap_or(config.defaults.passage_limit);
    let engine = Engine::new(searcher, generator, passage_limit)?;

    info!(
        collection = %config.chroma.collection,
        model = %config.gemini.generation_model,
        passage_limit,
        "engine ready"
    );

    Ok(engine)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_ask(question: &str, limit: Option<usize>) -> Result<()> {
    if question.trim().is_empty() {
        return Err(eyre!("question is empty"));
    }

    let engine = build_engine(limit).await?;
    let answer = answer_with_spinner(&engine, question).await?;

    println!("{answer}");
    Ok(())
}

async fn cmd_chat(limit: Option<usize>) -> Result<()> {
    let engine = build_engine(limit).await?;

    println!("askdocs is ready. Type 'exit' to quit.");
    println!();

    let stdin = std::io::stdin();
    loop {
        print!("? ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        // EOF (e.g. piped input exhausted) ends the session like 'exit'.
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        // A failed question ends that turn, not the session.
        match answer_with_spinner(&engine, question).await {
            Ok(answer) => {
                println!();
                println!("{answer}");
                println!();
            }
            Err(e) => {
                eprintln!("error: {e}");
                println!();
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("  Config written to {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let path = config_file_path()?;
    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------------------

/// Answer one question with an indicatif spinner while the pipeline runs.
async fn answer_with_spinner(
    engine: &Engine<DocSearcher, GeminiGenerator>,
    question: &str,
) -> askdocs_shared::Result<String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message("Thinking...");

    let result = engine.answer(question).await;
    spinner.finish_and_clear();
    result
}
