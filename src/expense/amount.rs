//! An exact decimal amount of money.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The smallest number of fractional digits an amount is displayed with.
const MIN_SCALE: u32 = 2;

/// A signed amount of money in the implicit single currency.
///
/// Amounts are exact decimals and always carry at least two fractional digits,
/// so `42.5` is stored and displayed as `42.50`.
///
/// In JSON an amount is written as a string to avoid losing precision, but it
/// can be read from either a number or a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount from `value`, padding it to two fractional digits if needed.
    pub fn new(value: Decimal) -> Self {
        let mut value = value;

        if value.scale() < MIN_SCALE {
            value.rescale(MIN_SCALE);
        }

        Self(value)
    }

    /// The underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self::new)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Amounts are stored as text since SQLite has no exact decimal type.
impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
