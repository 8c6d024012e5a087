//! Errors for quantity parsing.

use thiserror::Error;

/// Errors produced when parsing a byte quantity from its string form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// The input string was empty.
    #[error("empty quantity")]
    Empty,

    /// The numeric part did not parse as a non-negative integer.
    #[error("invalid number in quantity: {0:?}")]
    InvalidNumber(String),

    /// The suffix was not one of Ki, Mi, Gi, Ti.
    #[error("unknown quantity suffix: {0:?}")]
    UnknownSuffix(String),

    /// Quantities are byte counts and cannot be negative.
    #[error("negative quantity: {0}")]
    Negative(i64),

    /// The value overflowed i64 bytes.
    #[error("quantity overflows i64: {0:?}")]
    Overflow(String),
}
