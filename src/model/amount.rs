//! Amount type for handling won values with optional currency signs and thousands separators.
//!
//! Won have no minor unit, so an `Amount` always displays as a whole number. The underlying
//! `Decimal` keeps whatever precision it was given; rounding only happens on display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

const WON_SIGN: char = '₩';

/// Represents how won amounts were (or should be) formatted.
///
/// # Examples
///  - `AmountFormat{ won: true, commas: true }` -> `-₩60,000`
///  - `AmountFormat{ won: false, commas: true }` -> `-60,000`
///  - `AmountFormat{ won: false, commas: false }` -> `-60000`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountFormat {
    /// Whether a won sign is present in the formatting.
    won: bool,
    /// Whether commas are present as thousands separators in the formatting.
    commas: bool,
}

impl AmountFormat {
    pub const fn new(won: bool, commas: bool) -> Self {
        Self { won, commas }
    }
}

impl Default for AmountFormat {
    fn default() -> Self {
        DEFAULT_FORMAT
    }
}

/// Reports show plain grouped numbers, e.g. `549,957`.
const DEFAULT_FORMAT: AmountFormat = AmountFormat {
    won: false,
    commas: true,
};

/// Represents an amount of won.
///
/// Formatting is considered significant for the purposes of equality, so for numeric comparisons,
/// you should access the `Decimal` value and use that.
///
/// # Examples
///
/// ```
/// # use famibank::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("549957").unwrap();
/// assert_eq!(amount.to_string(), "549957");
///
/// let amount = Amount::from_str("₩1,250,000").unwrap();
/// assert_eq!(amount.to_string(), "₩1,250,000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
    format: AmountFormat,
}

impl Amount {
    /// Creates a new Amount from a Decimal value with default `String` formatting.
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            format: DEFAULT_FORMAT,
        }
    }

    pub const fn new_with_format(value: Decimal, format: AmountFormat) -> Self {
        Self { value, format }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the value rounded half-up to whole won.
    pub fn whole(&self) -> Decimal {
        self.value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (won, digits) = match unsigned.strip_prefix(WON_SIGN) {
            Some(rest) => (true, rest),
            None => (false, unsigned),
        };

        let without_commas = digits.replace(',', "");
        let commas = without_commas.len() < digits.len();

        let mut value = Decimal::from_str(&without_commas).map_err(AmountError)?;
        if negative {
            value = -value;
        }
        Ok(Amount {
            value,
            format: AmountFormat { won, commas },
        })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let whole = self.whole();
        let sign = if whole.is_sign_negative() && !whole.is_zero() {
            "-"
        } else {
            ""
        };
        let num = whole.abs();
        let won = if self.format.won {
            WON_SIGN.to_string()
        } else {
            String::new()
        };

        if self.format.commas {
            write!(f, "{sign}{won}{}", group_thousands(&num.to_string()))
        } else {
            write!(f, "{sign}{won}{num}")
        }
    }
}

/// Inserts a comma every three digits from the right. `digits` must be an unsigned integer.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (ix, c) in digits.chars().enumerate() {
        if ix > 0 && (digits.len() - ix) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
