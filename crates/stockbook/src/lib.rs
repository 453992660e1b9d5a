//! stockbook CLI.
//!
//! One binary, one ledger snapshot on disk. Every mutating subcommand runs
//! the same loop: load the snapshot, hand the mutation to the
//! recalculation engine, save the result. A failed mutation leaves the
//! snapshot exactly as it was.
//!
//! # Example Usage
//!
//! ```bash
//! stockbook init
//! stockbook purchase --date 2024-01-05 --quantity 10 --total-cost 50.00
//! stockbook sale --date 2024-01-08 --quantity 4 --total-amount 40.00
//! stockbook show
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod report;
