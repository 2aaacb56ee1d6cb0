// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flowml - no-code ML pipeline CLI

mod commands;
mod completions;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    auth, preprocess, preview, reset, results, run, split, status, target, train, upload,
};

#[derive(Parser)]
#[command(
    name = "flowml",
    version,
    about = "FlowML - train ML models on tabular data without writing code"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a dataset file (csv, xlsx, xls)
    Upload(upload::UploadArgs),
    /// Preview rows of the uploaded dataset
    Preview(preview::PreviewArgs),
    /// Apply feature scaling to the uploaded dataset
    Preprocess(preprocess::PreprocessArgs),
    /// Choose the target column (or list recommendations)
    Target(target::TargetArgs),
    /// Split the dataset into train and test sets
    Split(split::SplitArgs),
    /// Train a model on the prepared dataset
    Train(train::TrainArgs),
    /// Show metrics for the trained model
    Results(results::ResultsArgs),
    /// Show pipeline progress and per-stage state
    Status(status::StatusArgs),
    /// Discard the pipeline and start over
    Reset,
    /// Run the whole pipeline in one go
    Run(run::RunArgs),
    /// Manage the local user account
    Auth(auth::AuthArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Upload(args) => upload::handle(args).await,
        Commands::Preview(args) => preview::handle(args).await,
        Commands::Preprocess(args) => preprocess::handle(args).await,
        Commands::Target(args) => target::handle(args).await,
        Commands::Split(args) => split::handle(args).await,
        Commands::Train(args) => train::handle(args).await,
        Commands::Results(args) => results::handle(args).await,
        Commands::Status(args) => status::handle(args),
        Commands::Reset => reset::handle(),
        Commands::Run(args) => run::handle(args).await,
        Commands::Auth(args) => auth::handle(args),
        Commands::Completions(args) => {
            completions::generate_completions::<Cli>(args.shell);
            Ok(())
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("FLOWML_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
