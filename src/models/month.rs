//! Calendar month numbers
//!
//! `Month` can only hold 1 through 12, so budget slots and summary filters
//! never see an out-of-range key.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ExpenseError;

/// A month of the year, 1 (January) through 12 (December)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    /// Every month in calendar order
    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }

    /// Create a month from its number
    pub fn new(number: u8) -> Result<Self, ExpenseError> {
        if (1..=12).contains(&number) {
            Ok(Self(number))
        } else {
            Err(ExpenseError::invalid_month())
        }
    }

    /// The month containing `at`, in local time
    pub fn of(at: DateTime<Utc>) -> Self {
        // chrono months are always 1..=12
        Self(at.with_timezone(&Local).month() as u8)
    }

    /// The current local month
    pub fn current() -> Self {
        Self::of(Utc::now())
    }

    /// Month number, 1-12
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based index, for fixed-size month tables
    pub fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }

    /// English month name
    pub fn name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        NAMES[self.index()]
    }

    /// First and last calendar day of this month in `year`
    pub fn date_range(&self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let month = u32::from(self.0);
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some((start, next.pred_opt()?))
    }
}

impl TryFrom<u8> for Month {
    type Error = ExpenseError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl FromStr for Month {
    type Err = ExpenseError;

    /// Parse a month number written as an integer, e.g. `"5"`, `"05"` or `"+5"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('+').unwrap_or(s);
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ExpenseError::invalid_month());
        }
        let number: u8 = s.parse().map_err(|_| ExpenseError::invalid_month())?;
        Self::new(number)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_valid_range() {
        assert!(Month::new(0).is_err());
        assert!(Month::new(13).is_err());
        assert_eq!(Month::new(1).unwrap().name(), "January");
        assert_eq!(Month::new(12).unwrap().name(), "December");
        assert_eq!(Month::all().count(), 12);
    }

    #[test]
    fn test_parse() {
        assert_eq!("5".parse::<Month>().unwrap().number(), 5);
        assert_eq!("05".parse::<Month>().unwrap().number(), 5);
        assert_eq!("+5".parse::<Month>().unwrap().number(), 5);
        assert_eq!(" +12 ".parse::<Month>().unwrap().number(), 12);
        for bad in ["", "+", "++5", "+-5", "0", "+0", "13", "-1", "5.0", "may", "300"] {
            let err = bad.parse::<Month>().unwrap_err();
            assert!(err.is_validation(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_date_range() {
        let feb = Month::new(2).unwrap();
        let (start, end) = feb.date_range(2024).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let dec = Month::new(12).unwrap();
        let (_, end) = dec.date_range(2025).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_month_of_local_boundaries() {
        let may = Month::new(5).unwrap();
        let first = Local
            .with_ymd_and_hms(2025, 5, 1, 0, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc);
        let last = Local
            .with_ymd_and_hms(2025, 5, 31, 23, 59, 59)
            .single()
            .unwrap()
            .with_timezone(&Utc);
        let june = Local
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(Month::of(first), may);
        assert_eq!(Month::of(last), may);
        assert_eq!(Month::of(june).number(), 6);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert_eq!(serde_json::to_string(&Month::new(3).unwrap()).unwrap(), "3");
        assert!(serde_json::from_str::<Month>("13").is_err());
    }
}
