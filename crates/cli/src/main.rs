// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tasklens - run scheduled tasks and report on them

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod completions;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{run, show, validate};
use completions::{generate_completions, CompletionsArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tasklens",
    version,
    about = "tasklens - scheduled tasks with last-execution reporting"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run configured tasks, then print the report
    Run(run::RunArgs),
    /// Print the report for configured tasks without running them
    Show(show::ShowArgs),
    /// Check a task configuration file
    Validate(validate::ValidateArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run::handle(args).await,
        Commands::Show(args) => show::handle(args),
        Commands::Validate(args) => validate::handle(args),
        Commands::Completions(args) => {
            generate_completions::<Cli>(args.shell);
            Ok(())
        }
    }
}
