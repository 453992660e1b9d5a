//! Record a sale.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use stockbook_core::Sale;
use stockbook_engine::{recalculate, Operation};
use tracing::debug;

use crate::report;

/// Arguments for `stockbook sale`.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Calendar date of the sale (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: NaiveDate,

    /// Units sold
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: u32,

    /// Revenue received for the whole batch
    #[arg(long, value_name = "AMOUNT")]
    pub total_amount: Decimal,
}

/// Add a sale to the ledger and persist the result.
///
/// The sale's cost basis is computed by the engine from the weighted
/// average cost prevailing on the sale's date; a sale the stock cannot
/// cover is rejected without touching the snapshot.
pub fn run(file: &Path, args: &Args) -> Result<()> {
    if args.total_amount <= Decimal::ZERO {
        bail!("--total-amount must be positive");
    }

    let ledger = stockbook_store::load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    if !ledger.is_date_available(args.date) {
        bail!("a transaction already exists on {}", args.date);
    }

    let sale = Sale::new(args.date, args.quantity, args.total_amount);
    let id = sale.id;
    debug!(%id, date = %args.date, "recording sale");

    let updated = recalculate(&ledger, sale.into(), Operation::Add)?;

    stockbook_store::save(file, &updated)
        .with_context(|| format!("failed to save {}", file.display()))?;

    println!("Recorded sale {id}");
    report::print_totals(&updated);
    Ok(())
}
