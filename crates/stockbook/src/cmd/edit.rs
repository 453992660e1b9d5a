//! Edit an existing transaction.

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use stockbook_core::{Transaction, TxId};
use stockbook_engine::{recalculate, Operation};
use tracing::debug;

use crate::report;

/// Arguments for `stockbook edit`.
///
/// Only the supplied fields change; everything else keeps its stored
/// value. Which amount flag applies depends on the transaction kind.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Id of the transaction to edit
    #[arg(value_name = "ID")]
    pub id: TxId,

    /// New calendar date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// New quantity
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: Option<u32>,

    /// New total cost (purchases only)
    #[arg(long, value_name = "AMOUNT")]
    pub total_cost: Option<Decimal>,

    /// New total amount (sales only)
    #[arg(long, value_name = "AMOUNT")]
    pub total_amount: Option<Decimal>,
}

/// Overlay the supplied fields onto the stored transaction and replay.
pub fn run(file: &Path, args: &Args) -> Result<()> {
    if args.total_cost.is_some_and(|v| v <= Decimal::ZERO) {
        bail!("--total-cost must be positive");
    }
    if args.total_amount.is_some_and(|v| v <= Decimal::ZERO) {
        bail!("--total-amount must be positive");
    }

    let ledger = stockbook_store::load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;

    let mut tx = ledger
        .find(args.id)
        .ok_or_else(|| anyhow!("no transaction with id {}", args.id))?;

    match &mut tx {
        Transaction::Purchase(p) => {
            if args.total_amount.is_some() {
                bail!("--total-amount applies to sales; {} is a purchase", args.id);
            }
            if let Some(date) = args.date {
                p.date = date;
            }
            if let Some(quantity) = args.quantity {
                p.quantity = quantity;
            }
            if let Some(total_cost) = args.total_cost {
                p.total_cost = total_cost;
            }
        }
        Transaction::Sale(s) => {
            if args.total_cost.is_some() {
                bail!("--total-cost applies to purchases; {} is a sale", args.id);
            }
            if let Some(date) = args.date {
                s.date = date;
            }
            if let Some(quantity) = args.quantity {
                s.quantity = quantity;
            }
            if let Some(total_amount) = args.total_amount {
                s.total_amount = total_amount;
            }
        }
    }

    debug!(id = %args.id, "editing transaction");
    let updated = recalculate(&ledger, tx, Operation::Edit)?;

    stockbook_store::save(file, &updated)
        .with_context(|| format!("failed to save {}", file.display()))?;

    println!("Updated {}", args.id);
    report::print_totals(&updated);
    Ok(())
}
