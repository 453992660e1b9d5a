//! Transaction records and their running-total annotations.
//!
//! A [`Transaction`] is either a [`Purchase`] (stock in, at a cost) or a
//! [`Sale`] (stock out, for revenue). Each record carries an optional
//! [`RunningTotal`] annotation holding the cumulative stock and inventory
//! value as of that transaction in chronological order; the recalculation
//! engine stamps it, callers never supply it as ground truth.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::TxId;

/// Cumulative stock and inventory value as of one transaction.
///
/// `value / stock` is the weighted average cost prevailing at that
/// point in the ledger's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningTotal {
    /// Units on hand after this transaction
    pub stock: u64,
    /// Inventory value (cost basis) after this transaction
    pub value: Decimal,
}

impl RunningTotal {
    /// The state of an empty ledger: no units, no value.
    pub const ZERO: Self = Self {
        stock: 0,
        value: Decimal::ZERO,
    };

    /// Create a running total.
    #[must_use]
    pub const fn new(stock: u64, value: Decimal) -> Self {
        Self { stock, value }
    }

    /// The weighted average cost at this point: `value / stock`,
    /// or zero when no stock is on hand.
    #[must_use]
    pub fn unit_cost(&self) -> Decimal {
        if self.stock == 0 {
            Decimal::ZERO
        } else {
            self.value / Decimal::from(self.stock)
        }
    }
}

impl Default for RunningTotal {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Stock acquired at a cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Unique identifier
    pub id: TxId,
    /// Calendar date; unique across the whole ledger
    pub date: NaiveDate,
    /// Units bought
    pub quantity: u32,
    /// Amount paid for the whole batch
    pub total_cost: Decimal,
    /// Running totals as of this purchase, stamped by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accumulate: Option<RunningTotal>,
}

impl Purchase {
    /// Create a purchase with a fresh id and no annotation.
    #[must_use]
    pub fn new(date: NaiveDate, quantity: u32, total_cost: Decimal) -> Self {
        Self {
            id: TxId::new(),
            date,
            quantity,
            total_cost,
            accumulate: None,
        }
    }

    /// Set the id.
    #[must_use]
    pub const fn with_id(mut self, id: TxId) -> Self {
        self.id = id;
        self
    }

    /// Set the running-total annotation.
    #[must_use]
    pub const fn with_accumulate(mut self, accumulate: RunningTotal) -> Self {
        self.accumulate = Some(accumulate);
        self
    }

    /// Cost per unit: `total_cost / quantity`, or zero for an empty batch.
    #[must_use]
    pub fn unit_cost(&self) -> Decimal {
        if self.quantity == 0 {
            Decimal::ZERO
        } else {
            self.total_cost / Decimal::from(self.quantity)
        }
    }
}

impl fmt::Display for Purchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} purchase {} units for {}",
            self.date, self.quantity, self.total_cost
        )
    }
}

/// Stock sold for revenue.
///
/// `total_cost` is the cost basis of the units sold, valued at the
/// weighted average cost prevailing when the sale is replayed. It is
/// derived state like `accumulate`: the engine computes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier
    pub id: TxId,
    /// Calendar date; unique across the whole ledger
    pub date: NaiveDate,
    /// Units sold
    pub quantity: u32,
    /// Revenue received for the whole batch
    pub total_amount: Decimal,
    /// Cost basis of the units sold, stamped by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Decimal>,
    /// Running totals as of this sale, stamped by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accumulate: Option<RunningTotal>,
}

impl Sale {
    /// Create a sale with a fresh id and no derived fields.
    #[must_use]
    pub fn new(date: NaiveDate, quantity: u32, total_amount: Decimal) -> Self {
        Self {
            id: TxId::new(),
            date,
            quantity,
            total_amount,
            total_cost: None,
            accumulate: None,
        }
    }

    /// Set the id.
    #[must_use]
    pub const fn with_id(mut self, id: TxId) -> Self {
        self.id = id;
        self
    }

    /// Set the running-total annotation.
    #[must_use]
    pub const fn with_accumulate(mut self, accumulate: RunningTotal) -> Self {
        self.accumulate = Some(accumulate);
        self
    }

    /// Sale price per unit: `total_amount / quantity`, or zero for an
    /// empty batch.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        if self.quantity == 0 {
            Decimal::ZERO
        } else {
            self.total_amount / Decimal::from(self.quantity)
        }
    }
}

impl fmt::Display for Sale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sale {} units for {}",
            self.date, self.quantity, self.total_amount
        )
    }
}

/// A ledger transaction: either a purchase or a sale.
///
/// Serializes with a `type` tag (`"purchase"` or `"sale"`) alongside the
/// variant's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transaction {
    /// Stock acquired at a cost
    Purchase(Purchase),
    /// Stock sold for revenue
    Sale(Sale),
}

impl Transaction {
    /// The transaction's id.
    #[must_use]
    pub const fn id(&self) -> TxId {
        match self {
            Self::Purchase(p) => p.id,
            Self::Sale(s) => s.id,
        }
    }

    /// The transaction's date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Purchase(p) => p.date,
            Self::Sale(s) => s.date,
        }
    }

    /// Units moved by this transaction.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        match self {
            Self::Purchase(p) => p.quantity,
            Self::Sale(s) => s.quantity,
        }
    }

    /// The running-total annotation, if the engine has stamped one.
    #[must_use]
    pub const fn accumulate(&self) -> Option<RunningTotal> {
        match self {
            Self::Purchase(p) => p.accumulate,
            Self::Sale(s) => s.accumulate,
        }
    }

    /// Whether this is a purchase.
    #[must_use]
    pub const fn is_purchase(&self) -> bool {
        matches!(self, Self::Purchase(_))
    }

    /// Whether this is a sale.
    #[must_use]
    pub const fn is_sale(&self) -> bool {
        matches!(self, Self::Sale(_))
    }
}

impl From<Purchase> for Transaction {
    fn from(purchase: Purchase) -> Self {
        Self::Purchase(purchase)
    }
}

impl From<Sale> for Transaction {
    fn from(sale: Sale) -> Self {
        Self::Sale(sale)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Purchase(p) => write!(f, "{p}"),
            Self::Sale(s) => write!(f, "{s}"),
        }
    }
}

/// Sort transactions chronologically by date, ascending.
///
/// Ledger dates are unique, so the resulting order is total and needs
/// no tie-breaking.
pub fn sort_transactions(transactions: &mut [Transaction]) {
    transactions.sort_by_key(Transaction::date);
}
