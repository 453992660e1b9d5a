//! Create an empty ledger snapshot.

use anyhow::{bail, Context, Result};
use std::path::Path;
use stockbook_core::Ledger;

/// Write a fresh empty snapshot, refusing to clobber an existing one.
pub fn run(file: &Path) -> Result<()> {
    if file.exists() {
        bail!("snapshot {} already exists", file.display());
    }

    stockbook_store::save(file, &Ledger::empty())
        .with_context(|| format!("failed to create {}", file.display()))?;

    println!("Created empty ledger at {}", file.display());
    Ok(())
}
