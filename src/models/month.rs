//! Calendar month used to bucket report activity
//!
//! A month is stored as its first day, so ordering months is ordering dates
//! and every key is year-qualified.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month (e.g. "2024-03")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ReportMonth {
    start: NaiveDate,
}

impl ReportMonth {
    /// Create a month from a year and a 1-based month number
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|start| Self { start })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: date - chrono::Days::new(u64::from(date.day0())),
        }
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Month number (1-12)
    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.start
    }

    /// Canonical bucket key, zero-padded `YYYY-MM`
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }

    /// Short display label, e.g. "Mar 2024"
    pub fn label(&self) -> String {
        self.start.format("%b %Y").to_string()
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Error parsing a `YYYY-MM` month key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError(pub String);

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid month '{}', expected YYYY-MM", self.0)
    }
}

impl std::error::Error for MonthParseError {}

impl FromStr for ReportMonth {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }
}

impl From<ReportMonth> for String {
    fn from(month: ReportMonth) -> Self {
        month.key()
    }
}

impl TryFrom<String> for ReportMonth {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_containing_ignores_day() {
        let month = ReportMonth::containing(date(2024, 3, 31));
        assert_eq!(month.first_day(), date(2024, 3, 1));
        assert_eq!(month, ReportMonth::containing(date(2024, 3, 1)));
    }

    #[test]
    fn test_key_is_zero_padded_and_year_qualified() {
        assert_eq!(ReportMonth::containing(date(2024, 1, 15)).key(), "2024-01");
        assert_ne!(
            ReportMonth::containing(date(2023, 1, 15)),
            ReportMonth::containing(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_label() {
        assert_eq!(ReportMonth::new(2024, 3).unwrap().label(), "Mar 2024");
        assert_eq!(ReportMonth::new(2023, 12).unwrap().label(), "Dec 2023");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut months = vec![
            ReportMonth::new(2024, 2).unwrap(),
            ReportMonth::new(2023, 11).unwrap(),
            ReportMonth::new(2024, 10).unwrap(),
        ];
        months.sort();
        let keys: Vec<_> = months.iter().map(|m| m.key()).collect();
        assert_eq!(keys, vec!["2023-11", "2024-02", "2024-10"]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("2024-03".parse::<ReportMonth>().unwrap().month(), 3);
        assert!("2024-13".parse::<ReportMonth>().is_err());
        assert!("March".parse::<ReportMonth>().is_err());
    }
}
