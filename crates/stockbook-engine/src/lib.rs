//! Recalculation engine for the stockbook ledger.
//!
//! This crate provides:
//! - [`recalculate`] - Apply one add/edit/delete mutation and recompute
//!   everything the mutation invalidates
//! - [`rebuild`] - Recompute a whole ledger from its raw transactions
//! - [`Operation`] - The closed set of mutation kinds
//!
//! The engine is pure: it borrows a ledger snapshot and returns a new one,
//! or a [`RecalculateError`] with the input left untouched.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use stockbook_core::{Ledger, NaiveDate, Purchase};
//! use stockbook_engine::{recalculate, Operation};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let purchase = Purchase::new(day, 10, dec!(50.00));
//!
//! let ledger = recalculate(&Ledger::empty(), purchase.into(), Operation::Add).unwrap();
//! assert_eq!(ledger.stock, 10);
//! assert_eq!(ledger.wac, dec!(5));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod operation;
mod recalculate;

pub use operation::{Operation, UnknownOperation};
pub use recalculate::{rebuild, recalculate, RecalculateError};
