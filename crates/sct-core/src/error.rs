//! Unified error type for the sector coupling toolkit.
//!
//! Every library crate in the workspace reports failures through [`SctError`].
//! Missing inputs (cost entries, production sectors, buses) carry the key that
//! was looked up so the caller can report exactly what is absent.
//!
//! # Example
//!
//! ```
//! use sct_core::{CostTable, SctError};
//!
//! let costs = CostTable::new();
//! let err = costs.get("electric arc furnace", "fixed").unwrap_err();
//! assert!(matches!(err, SctError::MissingCost { .. }));
//! ```

use crate::ComponentKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SctError {
    /// A `(technology, parameter)` pair is absent from the cost table
    #[error("cost table has no entry for ({technology}, {parameter})")]
    MissingCost {
        technology: String,
        parameter: String,
    },

    /// The industrial production table has no column for a sector
    #[error("industrial production has no sector '{0}'")]
    MissingSector(String),

    /// A production series has no value for a spatial node
    #[error("production series has no value for node '{node}'")]
    MissingProduction { node: String },

    /// A component refers to a bus that has not been registered
    #[error("{kind} '{component}' refers to unknown bus '{bus}'")]
    UnknownBus {
        kind: ComponentKind,
        component: String,
        bus: String,
    },

    /// A component name is already taken within its component kind
    #[error("{kind} '{name}' already exists in the network")]
    DuplicateComponent { kind: ComponentKind, name: String },

    /// I/O errors while reading inputs or writing outputs
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input files
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type SctResult<T> = Result<T, SctError>;

impl SctError {
    pub fn missing_cost(technology: impl Into<String>, parameter: impl Into<String>) -> Self {
        SctError::MissingCost {
            technology: technology.into(),
            parameter: parameter.into(),
        }
    }

    /// True for errors caused by an absent input key rather than bad data.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            SctError::MissingCost { .. }
                | SctError::MissingSector(_)
                | SctError::MissingProduction { .. }
                | SctError::UnknownBus { .. }
        )
    }
}

impl From<anyhow::Error> for SctError {
    fn from(err: anyhow::Error) -> Self {
        SctError::Other(err.to_string())
    }
}

impl From<serde_json::Error> for SctError {
    fn from(err: serde_json::Error) -> Self {
        SctError::Parse(err.to_string())
    }
}
