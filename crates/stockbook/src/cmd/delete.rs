//! Delete a transaction.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use stockbook_core::TxId;
use stockbook_engine::{recalculate, Operation};
use tracing::debug;

use crate::report;

/// Arguments for `stockbook delete`.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Id of the transaction to delete
    #[arg(value_name = "ID")]
    pub id: TxId,
}

/// Remove the transaction and replay everything it supported.
pub fn run(file: &Path, args: &Args) -> Result<()> {
    let ledger = stockbook_store::load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    let tx = ledger
        .find(args.id)
        .ok_or_else(|| anyhow!("no transaction with id {}", args.id))?;

    debug!(id = %args.id, "deleting transaction");
    let updated = recalculate(&ledger, tx.clone(), Operation::Delete)?;

    stockbook_store::save(file, &updated)
        .with_context(|| format!("failed to save {}", file.display()))?;

    println!("Deleted {tx}");
    report::print_totals(&updated);
    Ok(())
}
