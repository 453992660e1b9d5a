//! stockbook - Weighted-average-cost inventory ledger.
//!
//! Single binary with subcommands for recording, editing, and inspecting
//! a JSON ledger snapshot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stockbook::cmd;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

/// Weighted-average-cost inventory ledger.
#[derive(Parser, Debug)]
#[command(author, version, about = "Weighted-average-cost inventory ledger")]
struct Cli {
    /// Path to the ledger snapshot.
    #[arg(long, global = true, default_value = "ledger.json", value_name = "PATH")]
    file: PathBuf,

    /// Show verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty ledger snapshot.
    Init,
    /// Record a purchase.
    Purchase(cmd::purchase::Args),
    /// Record a sale.
    Sale(cmd::sale::Args),
    /// Edit an existing transaction.
    Edit(cmd::edit::Args),
    /// Delete a transaction.
    Delete(cmd::delete::Args),
    /// Print the ledger.
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_span_events(FmtSpan::CLOSE)
            .init();
    }

    let result = match &cli.command {
        Command::Init => cmd::init::run(&cli.file),
        Command::Purchase(args) => cmd::purchase::run(&cli.file, args),
        Command::Sale(args) => cmd::sale::run(&cli.file, args),
        Command::Edit(args) => cmd::edit::run(&cli.file, args),
        Command::Delete(args) => cmd::delete::run(&cli.file, args),
        Command::Show => cmd::show::run(&cli.file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
