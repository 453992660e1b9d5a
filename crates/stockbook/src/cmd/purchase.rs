//! Record a purchase.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use stockbook_core::Purchase;
use stockbook_engine::{recalculate, Operation};
use tracing::debug;

use crate::report;

/// Arguments for `stockbook purchase`.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Calendar date of the purchase (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: NaiveDate,

    /// Units bought
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: u32,

    /// Amount paid for the whole batch
    #[arg(long, value_name = "AMOUNT")]
    pub total_cost: Decimal,
}

/// Add a purchase to the ledger and persist the result.
pub fn run(file: &Path, args: &Args) -> Result<()> {
    if args.total_cost <= Decimal::ZERO {
        bail!("--total-cost must be positive");
    }

    let ledger = stockbook_store::load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    if !ledger.is_date_available(args.date) {
        bail!("a transaction already exists on {}", args.date);
    }

    let purchase = Purchase::new(args.date, args.quantity, args.total_cost);
    let id = purchase.id;
    debug!(%id, date = %args.date, "recording purchase");

    let updated = recalculate(&ledger, purchase.into(), Operation::Add)?;

    stockbook_store::save(file, &updated)
        .with_context(|| format!("failed to save {}", file.display()))?;

    println!("Recorded purchase {id}");
    report::print_totals(&updated);
    Ok(())
}
