//! InfluencerFlow API server entry point.

use std::process::ExitCode;

use clap::Parser;

use influencerflow::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => cli::handle_error(&err),
    }
}
