//! Core types for stockbook
//!
//! This crate provides the fundamental types used throughout the stockbook
//! project:
//!
//! - [`TxId`] - Opaque unique transaction identifier
//! - [`Purchase`] / [`Sale`] - The two transaction kinds
//! - [`Transaction`] - Tagged union over both kinds
//! - [`RunningTotal`] - Per-transaction cumulative stock and value
//! - [`Ledger`] - The aggregate: full history plus derived totals
//!
//! # Example
//!
//! ```
//! use stockbook_core::{Ledger, NaiveDate, Purchase};
//! use rust_decimal_macros::dec;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let ledger = Ledger::empty();
//!
//! // One transaction per calendar date: check before adding
//! assert!(ledger.is_date_available(day));
//!
//! let purchase = Purchase::new(day, 10, dec!(50.00));
//! assert_eq!(purchase.unit_cost(), dec!(5));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod id;
pub mod ledger;
pub mod transaction;

pub use id::TxId;
pub use ledger::Ledger;
pub use transaction::{sort_transactions, Purchase, RunningTotal, Sale, Transaction};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
