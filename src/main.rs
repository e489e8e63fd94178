use std::process::ExitCode;

use clap::Parser;
use lody_waitlist::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await.map(|()| ExitCode::SUCCESS),
        Command::Join(args) => cli::join::run(args).await,
    }
}
