//! The ledger aggregate: all transactions plus the derived totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::TxId;
use crate::transaction::{Purchase, Sale, Transaction};

/// A weighted-average-cost inventory ledger.
///
/// Holds the full transaction history split by variant, plus the current
/// aggregate figures. The aggregates and every per-transaction
/// `accumulate` annotation are derived state: the recalculation engine
/// maintains them, and they always agree with a chronological replay of
/// the history.
///
/// The element order of `purchases` and `sales` is decided by the engine
/// and is not guaranteed to be chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// All purchases
    pub purchases: Vec<Purchase>,
    /// All sales
    pub sales: Vec<Sale>,
    /// Units currently on hand
    pub stock: u64,
    /// Current weighted average cost per unit, zero when out of stock
    pub wac: Decimal,
    /// Current inventory value (cost basis of units on hand)
    pub accumulate_value: Decimal,
}

impl Ledger {
    /// The canonical empty ledger: no transactions, all figures zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            purchases: Vec::new(),
            sales: Vec::new(),
            stock: 0,
            wac: Decimal::ZERO,
            accumulate_value: Decimal::ZERO,
        }
    }

    /// Whether no transaction occupies `date`.
    ///
    /// The gate a caller must pass before adding a transaction: the
    /// ledger allows at most one transaction per calendar date.
    #[must_use]
    pub fn is_date_available(&self, date: NaiveDate) -> bool {
        !self.purchases.iter().any(|p| p.date == date) && !self.sales.iter().any(|s| s.date == date)
    }

    /// All transactions merged into one owned working set.
    #[must_use]
    pub fn transactions(&self) -> Vec<Transaction> {
        self.purchases
            .iter()
            .cloned()
            .map(Transaction::Purchase)
            .chain(self.sales.iter().cloned().map(Transaction::Sale))
            .collect()
    }

    /// Look up a transaction by id.
    #[must_use]
    pub fn find(&self, id: TxId) -> Option<Transaction> {
        self.purchases
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .map(Transaction::Purchase)
            .or_else(|| {
                self.sales
                    .iter()
                    .find(|s| s.id == id)
                    .cloned()
                    .map(Transaction::Sale)
            })
    }

    /// Total number of transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.purchases.len() + self.sales.len()
    }

    /// Whether the ledger holds no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty() && self.sales.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::empty()
    }
}
