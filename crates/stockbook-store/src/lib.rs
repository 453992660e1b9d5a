//! Snapshot persistence for the stockbook ledger.
//!
//! A snapshot is the [`Ledger`] serialized as pretty-printed JSON,
//! running-total annotations included. Annotations are derived state, so
//! [`load`] treats them with suspicion: a snapshot whose stored figures do
//! not line up with its own history is rebuilt from the raw transactions
//! before it is handed to the caller. Only a history that cannot form a
//! valid ledger at all is an error.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//!
//! let ledger = stockbook_store::load(Path::new("ledger.json"))?;
//! println!("{} units on hand", ledger.stock);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use stockbook_core::{sort_transactions, Ledger, RunningTotal, Transaction};
use stockbook_engine::{rebuild, RecalculateError};

/// Errors that can occur reading or writing snapshots.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error on the snapshot file.
    #[error("io error on snapshot {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON for a ledger.
    #[error("malformed snapshot {path}: {source}")]
    Parse {
        /// The malformed file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The ledger could not be serialized for writing.
    #[error("cannot serialize snapshot {path}: {source}")]
    Serialize {
        /// The intended destination.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot's transactions cannot form a valid ledger.
    #[error("snapshot {path} holds an invalid history: {source}")]
    Corrupt {
        /// The corrupt file.
        path: PathBuf,
        /// Why the history failed to replay.
        #[source]
        source: RecalculateError,
    },
}

/// Write a ledger snapshot to `path`, replacing any existing file.
///
/// # Errors
///
/// [`StoreError::Io`] if the file cannot be written,
/// [`StoreError::Serialize`] if the ledger cannot be serialized.
pub fn save(path: &Path, ledger: &Ledger) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(ledger).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a ledger snapshot from `path`, revalidating its derived state.
///
/// Stored annotations and aggregates are checked against the snapshot's
/// own transaction history. When they disagree (a hand-edited or stale
/// file), the ledger is rebuilt from the raw transactions and the healed
/// value is returned.
///
/// # Errors
///
/// [`StoreError::Io`] if the file cannot be read, [`StoreError::Parse`]
/// if it is not a JSON ledger, [`StoreError::Corrupt`] if its raw
/// transactions cannot replay into a valid ledger (duplicate dates or an
/// oversold history).
pub fn load(path: &Path) -> Result<Ledger, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ledger: Ledger = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if snapshot_is_consistent(&ledger) {
        return Ok(ledger);
    }

    rebuild(ledger.transactions()).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Cheap structural verification of a snapshot's derived state.
///
/// Checks date uniqueness, that every transaction is annotated, that each
/// annotation follows from the previous one by the transaction's own
/// quantity and cost, and that the ledger aggregates equal the final
/// annotation. Division-derived figures are only checked to tolerance.
fn snapshot_is_consistent(ledger: &Ledger) -> bool {
    let mut transactions = ledger.transactions();
    sort_transactions(&mut transactions);

    for pair in transactions.windows(2) {
        if pair[0].date() == pair[1].date() {
            return false;
        }
    }

    let mut totals = RunningTotal::ZERO;
    for tx in &transactions {
        let Some(stamped) = tx.accumulate() else {
            return false;
        };
        // checked arithmetic: stored stocks come straight from disk
        let expected = match tx {
            Transaction::Purchase(p) => totals
                .stock
                .checked_add(u64::from(p.quantity))
                .map(|stock| RunningTotal::new(stock, totals.value + p.total_cost)),
            Transaction::Sale(s) => s.total_cost.and_then(|cost| {
                totals
                    .stock
                    .checked_sub(u64::from(s.quantity))
                    .map(|stock| RunningTotal::new(stock, totals.value - cost))
            }),
        };
        match expected {
            Some(e) if e == stamped => totals = stamped,
            _ => return false,
        }
    }

    if totals.stock != ledger.stock || totals.value != ledger.accumulate_value {
        return false;
    }
    if ledger.stock == 0 {
        ledger.wac == Decimal::ZERO && ledger.accumulate_value == Decimal::ZERO
    } else {
        let tolerance = Decimal::new(1, 6);
        (ledger.wac - totals.unit_cost()).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockbook_core::{NaiveDate, Purchase, Sale};
    use stockbook_engine::{recalculate, Operation};
    use tempfile::{tempdir, NamedTempFile};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let ledger = recalculate(
            &Ledger::empty(),
            Purchase::new(date(2024, 1, 5), 10, dec!(50.00)).into(),
            Operation::Add,
        )
        .unwrap();
        recalculate(
            &ledger,
            Sale::new(date(2024, 1, 8), 4, dec!(40.00)).into(),
            Operation::Add,
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip_preserves_ledger() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        let ledger = sample_ledger();

        save(file.path(), &ledger).unwrap();
        let loaded = load(file.path()).unwrap();

        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_empty_ledger_roundtrip() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        save(file.path(), &Ledger::empty()).unwrap();
        assert_eq!(load(file.path()).unwrap(), Ledger::empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_load_garbage() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        fs::write(file.path(), "not a ledger").unwrap();
        let result = load(file.path());
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_tampered_annotation_is_healed() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        let mut ledger = sample_ledger();
        let truth = ledger.clone();

        ledger.purchases[0].accumulate = Some(RunningTotal::new(10, dec!(999)));
        save(file.path(), &ledger).unwrap();

        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded, truth);
    }

    #[test]
    fn test_tampered_aggregate_is_healed() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        let mut ledger = sample_ledger();
        let truth = ledger.clone();

        ledger.stock += 1;
        save(file.path(), &ledger).unwrap();

        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded, truth);
    }

    #[test]
    fn test_missing_annotations_are_healed() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        let mut ledger = sample_ledger();
        let truth = ledger.clone();

        ledger.sales[0].accumulate = None;
        ledger.sales[0].total_cost = None;
        save(file.path(), &ledger).unwrap();

        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded, truth);
    }

    #[test]
    fn test_oversold_history_is_corrupt() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        let ledger = Ledger {
            purchases: vec![Purchase::new(date(2024, 1, 5), 2, dec!(10))],
            sales: vec![Sale::new(date(2024, 1, 8), 5, dec!(50))],
            stock: 0,
            wac: Decimal::ZERO,
            accumulate_value: Decimal::ZERO,
        };
        save(file.path(), &ledger).unwrap();

        let result = load(file.path());
        assert!(matches!(
            result,
            Err(StoreError::Corrupt {
                source: RecalculateError::InsufficientStock { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_dates_are_corrupt() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        let ledger = Ledger {
            purchases: vec![
                Purchase::new(date(2024, 1, 5), 2, dec!(10)),
                Purchase::new(date(2024, 1, 5), 3, dec!(15)),
            ],
            sales: Vec::new(),
            stock: 5,
            wac: dec!(5),
            accumulate_value: dec!(25),
        };
        save(file.path(), &ledger).unwrap();

        let result = load(file.path());
        assert!(matches!(
            result,
            Err(StoreError::Corrupt {
                source: RecalculateError::DateCollision { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_serialize_error_names_the_write_direction() {
        let source = serde_json::from_str::<Ledger>("{").unwrap_err();
        let err = StoreError::Serialize {
            path: PathBuf::from("ledger.json"),
            source,
        };

        let message = err.to_string();
        assert!(message.starts_with("cannot serialize snapshot"), "{message}");
        assert!(!message.contains("malformed"), "{message}");
    }
}
