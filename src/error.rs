//! Error handling for the Sentry PDU evaluation engine.

use std::num::ParseIntError;

/// A specialized `Result` type for engine operations.
pub type Result<T> = std::result::Result<T, PduError>;

/// The main error type for normalization and evaluation.
///
/// Unknown items and faulted sensors are not errors: the former yields an
/// empty result sequence, the latter a CRIT result.
#[derive(Debug, thiserror::Error)]
pub enum PduError {
    /// A numeric field did not parse
    #[error("{section}: malformed {field} value {value:?}: {source}")]
    MalformedField {
        section: &'static str,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A status, state or type code outside the registry
    #[error("unmapped {table} code {code}")]
    UnmappedCode { table: &'static str, code: i64 },

    /// A raw row with the wrong number of columns
    #[error("{section}: expected {expected} columns per row, found {found}")]
    RowArity {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON input could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PduError {
    /// Create a new malformed field error
    pub fn malformed_field(
        section: &'static str,
        field: &'static str,
        value: impl Into<String>,
        source: ParseIntError,
    ) -> Self {
        Self::MalformedField {
            section,
            field,
            value: value.into(),
            source,
        }
    }

    /// Create a new unmapped code error
    pub fn unmapped_code(table: &'static str, code: i64) -> Self {
        Self::UnmappedCode { table, code }
    }

    /// Create a new row arity error
    pub fn row_arity(section: &'static str, expected: usize, found: usize) -> Self {
        Self::RowArity {
            section,
            expected,
            found,
        }
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Parse an integer field the way the device reports it, ignoring
/// surrounding whitespace.
pub(crate) fn parse_int(section: &'static str, field: &'static str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| PduError::malformed_field(section, field, raw, e))
}
