//! A calendar month, the unit every report is computed over.

use crate::error::Res;
use anyhow::{bail, Context};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Years that fit the four-digit `YYYY-MM` text form.
pub const YEARS: RangeInclusive<i32> = 1..=9999;

/// A year (1-9999) and a month (1-12).
///
/// ```
/// # use famibank::model::YearMonth;
/// let jan = YearMonth::new(2024, 1).unwrap();
/// assert_eq!(jan.previous().to_string(), "2023-12");
/// assert!(YearMonth::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Res<Self> {
        if !(1..=12).contains(&month) {
            bail!("Month must be between 1 and 12, got {month}");
        }
        if !YEARS.contains(&year) {
            bail!(
                "Year must be between {} and {}, got {year}",
                YEARS.start(),
                YEARS.end()
            );
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> Self {
        self.months_back(1)
    }

    /// Steps back `n` months, crossing year boundaries as needed.
    pub fn months_back(&self, n: u32) -> Self {
        let index = self.index() - i64::from(n);
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        Self {
            year: year as i32,
            month: month as u32,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Months since year zero, so that consecutive months differ by one.
    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .rsplit_once('-')
            .with_context(|| format!("Expected a month like 2024-05, got '{s}'"))?;
        let year = year
            .parse::<i32>()
            .with_context(|| format!("Invalid year in '{s}'"))?;
        let month = month
            .parse::<u32>()
            .with_context(|| format!("Invalid month in '{s}'"))?;
        YearMonth::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        YearMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
        assert!(YearMonth::new(2024, 1).is_ok());
        assert!(YearMonth::new(2024, 12).is_ok());
    }

    #[test]
    fn test_year_bounds() {
        assert!(YearMonth::new(-1, 5).is_err());
        assert!(YearMonth::new(0, 5).is_err());
        assert!(YearMonth::new(10000, 1).is_err());
        assert_eq!(ym(1, 1).to_string(), "0001-01");
        assert_eq!(ym(9999, 12).to_string(), "9999-12");
    }

    #[test]
    fn test_text_form_round_trips_at_year_bounds() {
        for period in [ym(1, 1), ym(9999, 12)] {
            let json = serde_json::to_string(&period).unwrap();
            let back: YearMonth = serde_json::from_str(&json).unwrap();
            assert_eq!(back, period);
        }
        assert!(YearMonth::from_str("-001-05").is_err());
        assert!(YearMonth::from_str("10000-01").is_err());
    }

    #[test]
    fn test_previous() {
        assert_eq!(ym(2024, 5).previous(), ym(2024, 4));
        assert_eq!(ym(2024, 1).previous(), ym(2023, 12));
    }

    #[test]
    fn test_months_back() {
        assert_eq!(ym(2024, 5).months_back(0), ym(2024, 5));
        assert_eq!(ym(2024, 5).months_back(5), ym(2023, 12));
        assert_eq!(ym(2024, 5).months_back(29), ym(2021, 12));
    }

    #[test]
    fn test_contains() {
        let may = ym(2024, 5);
        assert!(may.contains(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert!(!may.contains(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(!may.contains(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()));
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(ym(2024, 5).to_string(), "2024-05");
        assert_eq!(YearMonth::from_str("2024-05").unwrap(), ym(2024, 5));
        assert!(YearMonth::from_str("2024/05").is_err());
        assert!(YearMonth::from_str("2024-13").is_err());
        let json = serde_json::to_string(&ym(2023, 12)).unwrap();
        assert_eq!(json, "\"2023-12\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym(2023, 12));
    }

    #[test]
    fn test_ordering() {
        assert!(ym(2023, 12) < ym(2024, 1));
        assert!(ym(2024, 2) > ym(2024, 1));
    }
}
