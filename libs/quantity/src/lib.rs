//! # stratus-quantity
//!
//! Exact binary byte quantities for the stratus platform.
//!
//! Capacity entries travel the orchestrator API as strings (`"20Mi"`,
//! `"2Gi"`, `"0"`), so the canonical rendering is part of the wire
//! contract, not a display convenience.
//!
//! ## Rendering rules
//!
//! - Zero renders as `"0"`.
//! - Otherwise the largest power-of-1024 suffix (`Ki`, `Mi`, `Gi`, `Ti`)
//!   that divides the value exactly is used: `20971520` → `"20Mi"`.
//! - Values not divisible by 1024 render as a bare byte count.
//!
//! Parsing is the strict inverse: no whitespace, no decimal points, no
//! negative values. Round-tripping (parse → format → parse) is lossless.

mod error;

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub use error::QuantityError;

/// One kibibyte.
pub const KIB: i64 = 1 << 10;
/// One mebibyte.
pub const MIB: i64 = 1 << 20;
/// One gibibyte.
pub const GIB: i64 = 1 << 30;
/// One tebibyte.
pub const TIB: i64 = 1 << 40;

const SUFFIXES: [(&str, i64); 4] = [("Ti", TIB), ("Gi", GIB), ("Mi", MIB), ("Ki", KIB)];

/// A non-negative byte count with canonical binary-suffix rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteQuantity(i64);

impl ByteQuantity {
    /// The zero quantity, rendered as `"0"`.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Construct from a raw byte count.
    ///
    /// Negative counts are rejected; quantities are physical amounts.
    pub fn from_bytes(bytes: i64) -> Result<Self, QuantityError> {
        if bytes < 0 {
            return Err(QuantityError::Negative(bytes));
        }
        Ok(Self(bytes))
    }

    /// The raw byte count.
    pub const fn as_bytes(&self) -> i64 {
        self.0
    }

    /// Multiply by a count, exactly. Returns `None` on overflow or a
    /// negative factor.
    pub fn checked_mul(&self, count: i64) -> Option<ByteQuantity> {
        if count < 0 {
            return None;
        }
        self.0.checked_mul(count).map(ByteQuantity)
    }

    /// True if the quantity is zero bytes.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ByteQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "0");
        }
        for (suffix, unit) in SUFFIXES {
            if self.0 % unit == 0 {
                return write!(f, "{}{}", self.0 / unit, suffix);
            }
        }
        write!(f, "{}", self.0)
    }
}

impl FromStr for ByteQuantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(QuantityError::Empty);
        }

        let split = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit() && *c != '-')
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (digits, suffix) = s.split_at(split);

        let value: i64 = digits
            .parse()
            .map_err(|_| QuantityError::InvalidNumber(digits.to_string()))?;
        if value < 0 {
            return Err(QuantityError::Negative(value));
        }

        let unit = match suffix {
            "" => 1,
            _ => {
                SUFFIXES
                    .iter()
                    .find(|(name, _)| *name == suffix)
                    .ok_or_else(|| QuantityError::UnknownSuffix(suffix.to_string()))?
                    .1
            }
        };

        value
            .checked_mul(unit)
            .map(ByteQuantity)
            .ok_or_else(|| QuantityError::Overflow(s.to_string()))
    }
}

impl Serialize for ByteQuantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ByteQuantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// The capacity key a node advertises for huge pages of the given size,
/// e.g. `hugepages-2Mi`.
pub fn hugepages_resource_name(size: ByteQuantity) -> String {
    format!("hugepages-{size}")
}
