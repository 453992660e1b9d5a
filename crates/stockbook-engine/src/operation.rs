//! The mutation kinds the engine accepts.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which mutation to apply to the ledger before recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Insert a new transaction.
    Add,
    /// Replace an existing transaction's fields, matched by id.
    Edit,
    /// Remove a transaction, matched by id.
    Delete,
}

/// An operation name that is none of `add`, `edit` or `delete`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation: {name}")]
pub struct UnknownOperation {
    /// The string that failed to parse.
    pub name: String,
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            _ => Err(UnknownOperation { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Edit => write!(f, "edit"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("add".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!("edit".parse::<Operation>().unwrap(), Operation::Edit);
        assert_eq!("delete".parse::<Operation>().unwrap(), Operation::Delete);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ADD".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!("Delete".parse::<Operation>().unwrap(), Operation::Delete);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "merge".parse::<Operation>().unwrap_err();
        assert_eq!(err.name, "merge");
        assert_eq!(err.to_string(), "unknown operation: merge");
    }

    #[test]
    fn test_display_roundtrip() {
        for op in [Operation::Add, Operation::Edit, Operation::Delete] {
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }
    }
}
