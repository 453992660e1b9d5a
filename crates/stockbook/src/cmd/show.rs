//! Print the ledger.

use anyhow::{Context, Result};
use std::path::Path;

use crate::report;

/// Load the snapshot and print both tables plus the aggregate line.
pub fn run(file: &Path) -> Result<()> {
    let ledger = stockbook_store::load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    report::print_ledger(&ledger);
    Ok(())
}
