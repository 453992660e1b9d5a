//! Boundary-based ledger recalculation.
//!
//! A mutation (add, edit, delete) invalidates the running totals of every
//! transaction dated on or after its pivot date. Everything before that
//! boundary keeps its previously computed annotations; everything from the
//! boundary on is replayed in date order against fresh running totals.

use rust_decimal::Decimal;
use stockbook_core::{
    sort_transactions, Ledger, NaiveDate, RunningTotal, Transaction, TxId,
};
use thiserror::Error;

use crate::operation::Operation;

/// Errors that can occur during recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecalculateError {
    /// A sale would reduce stock below zero at its point in the history.
    ///
    /// Can fire for a sale far later than the mutated transaction: removing
    /// or shrinking an early purchase retroactively starves every sale that
    /// depended on it.
    #[error("insufficient stock for sale on {date}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Date of the offending sale.
        date: NaiveDate,
        /// Units the sale asks for.
        requested: u32,
        /// Units on hand just before the sale.
        available: u64,
    },

    /// An edit or delete addressed an id not present in the ledger.
    #[error("no transaction with id {id}")]
    UnknownTransaction {
        /// The id that failed to resolve.
        id: TxId,
    },

    /// Two transactions would share a calendar date.
    #[error("a transaction already exists on {date}")]
    DateCollision {
        /// The contested date.
        date: NaiveDate,
    },
}

/// Apply one mutation to a ledger and return the recomputed ledger.
///
/// The input ledger is never touched: on success the caller gets a fully
/// consistent new value, on error it keeps what it had. Annotations of
/// transactions dated strictly before the mutation's pivot date are carried
/// over verbatim; the rest are recomputed by replay.
///
/// For [`Operation::Add`] the caller is expected to have checked
/// [`Ledger::is_date_available`] first; date uniqueness for edits is
/// enforced here, where no caller-side gate exists.
///
/// # Errors
///
/// [`RecalculateError::InsufficientStock`] if any replayed sale oversells,
/// [`RecalculateError::UnknownTransaction`] if an edit or delete addresses
/// an unknown id, [`RecalculateError::DateCollision`] if an edit moves a
/// transaction onto an occupied date.
pub fn recalculate(
    ledger: &Ledger,
    transaction: Transaction,
    operation: Operation,
) -> Result<Ledger, RecalculateError> {
    let mut working = ledger.transactions();

    let pivot = match operation {
        Operation::Add => {
            let pivot = transaction.date();
            working.push(transaction);
            pivot
        }
        Operation::Edit => {
            let id = transaction.id();
            let index = position_of(&working, id)?;
            let new_date = transaction.date();
            if working.iter().any(|t| t.id() != id && t.date() == new_date) {
                return Err(RecalculateError::DateCollision { date: new_date });
            }
            // An edit that moves the record later in time still invalidates
            // the totals at its old position.
            let old_date = working[index].date();
            working[index] = transaction;
            old_date.min(new_date)
        }
        Operation::Delete => {
            let index = position_of(&working, transaction.id())?;
            working.remove(index).date()
        }
    };

    if working.is_empty() {
        return Ok(Ledger::empty());
    }

    sort_transactions(&mut working);

    // First index whose running totals the mutation invalidates. Dates are
    // unique and sorted, so everything before it is untouched history.
    let boundary = working.partition_point(|t| t.date() < pivot);
    let affected = working.split_off(boundary);

    let seed = working
        .last()
        .and_then(Transaction::accumulate)
        .unwrap_or(RunningTotal::ZERO);

    let mut replay = Replay::seeded(seed);
    let mut replayed = Vec::with_capacity(affected.len());
    for tx in affected {
        replayed.push(replay.apply(tx)?);
    }

    Ok(assemble(working.into_iter().chain(replayed), &replay))
}

/// Rebuild a ledger from scratch out of a bag of transactions.
///
/// Sorts, rejects duplicate dates, and replays the whole history against
/// zero running totals. Used to revalidate snapshots whose stored
/// annotations cannot be trusted.
///
/// # Errors
///
/// [`RecalculateError::DateCollision`] if two transactions share a date,
/// [`RecalculateError::InsufficientStock`] if any sale oversells.
pub fn rebuild(mut transactions: Vec<Transaction>) -> Result<Ledger, RecalculateError> {
    sort_transactions(&mut transactions);
    for pair in transactions.windows(2) {
        if pair[0].date() == pair[1].date() {
            return Err(RecalculateError::DateCollision { date: pair[1].date() });
        }
    }

    let mut replay = Replay::seeded(RunningTotal::ZERO);
    let mut replayed = Vec::with_capacity(transactions.len());
    for tx in transactions {
        replayed.push(replay.apply(tx)?);
    }

    Ok(assemble(replayed, &replay))
}

fn position_of(working: &[Transaction], id: TxId) -> Result<usize, RecalculateError> {
    working
        .iter()
        .position(|t| t.id() == id)
        .ok_or(RecalculateError::UnknownTransaction { id })
}

fn assemble(transactions: impl IntoIterator<Item = Transaction>, totals: &Replay) -> Ledger {
    let mut ledger = Ledger::empty();
    for tx in transactions {
        match tx {
            Transaction::Purchase(p) => ledger.purchases.push(p),
            Transaction::Sale(s) => ledger.sales.push(s),
        }
    }
    ledger.stock = totals.stock;
    ledger.wac = totals.current_wac();
    ledger.accumulate_value = totals.value;
    ledger
}

/// Running totals carried through a replay.
struct Replay {
    stock: u64,
    value: Decimal,
    wac: Decimal,
}

impl Replay {
    fn seeded(totals: RunningTotal) -> Self {
        Self {
            stock: totals.stock,
            value: totals.value,
            wac: totals.unit_cost(),
        }
    }

    /// Fold one transaction into the totals and stamp its annotation.
    fn apply(&mut self, tx: Transaction) -> Result<Transaction, RecalculateError> {
        match tx {
            Transaction::Purchase(mut p) => {
                self.stock += u64::from(p.quantity);
                self.value += p.total_cost;
                let totals = RunningTotal::new(self.stock, self.value);
                self.wac = totals.unit_cost();
                p.accumulate = Some(totals);
                Ok(Transaction::Purchase(p))
            }
            Transaction::Sale(mut s) => {
                let quantity = u64::from(s.quantity);
                if self.stock < quantity {
                    return Err(RecalculateError::InsufficientStock {
                        date: s.date,
                        requested: s.quantity,
                        available: self.stock,
                    });
                }
                // A sale that empties the stock takes the entire remaining
                // value; pricing it per unit could leave a division residue.
                let total_cost = if self.stock == quantity {
                    self.value
                } else {
                    Decimal::from(s.quantity) * self.wac
                };
                self.stock -= quantity;
                self.value -= total_cost;
                s.total_cost = Some(total_cost);
                s.accumulate = Some(RunningTotal::new(self.stock, self.value));
                // Selling does not change the per-unit cost; only purchases do.
                Ok(Transaction::Sale(s))
            }
        }
    }

    const fn current_wac(&self) -> Decimal {
        if self.stock == 0 {
            Decimal::ZERO
        } else {
            self.wac
        }
    }
}
