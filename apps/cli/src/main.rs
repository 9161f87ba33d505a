//! askdocs CLI — documentation question answering over a pre-built index.
//!
//! Retrieves semantically relevant passages from a Chroma vector index and
//! asks Gemini to answer strictly from that retrieved context.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Credentials may live in a local .env during development.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
