use std::str::FromStr;

use anyhow::{bail, Context as _};
use chrono::{Datelike, NaiveDate};

// Month names a single calendar month, e.g. 2024-03.
// Entries are grouped by month for browsing, and both the remote repository
// and the fixture source decide membership with `contains`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    // Returns None if `month` is not in 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Month> {
        (1..=12).contains(&month).then_some(Month { year, month })
    }

    // The month containing `date`.
    pub fn of(date: NaiveDate) -> Month {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    // True if `date` falls within this month.
    // This is the same test as matching the "YYYY-MM" prefix of an ISO date.
    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// A month is parsed from "YYYY-MM", e.g. "2024-03" or "2024-3".
impl FromStr for Month {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((year, month)) = s.split_once('-') else {
            bail!("Invalid month '{s}', expected YYYY-MM");
        };
        let year = year.parse().with_context(|| format!("Parsing year '{year}'"))?;
        let month = month
            .parse()
            .with_context(|| format!("Parsing month '{month}'"))?;
        Month::new(year, month).with_context(|| format!("Month out of range: {s}"))
    }
}

#[test]
fn test_parse_month() {
    let parse = |s: &str| s.parse::<Month>();
    assert_eq!(parse("2024-03").unwrap(), Month { year: 2024, month: 3 });
    assert_eq!(parse(" 2024-3 ").unwrap(), Month { year: 2024, month: 3 });
    assert_eq!(parse("1999-12").unwrap(), Month { year: 1999, month: 12 });
    assert!(parse("2024-13").is_err());
    assert!(parse("2024-00").is_err());
    assert!(parse("2024").is_err());
    assert!(parse("march").is_err());
}

#[test]
fn test_month_display_is_iso_prefix() {
    let month = Month::new(2024, 3).unwrap();
    assert_eq!(month.to_string(), "2024-03");

    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert!(date.to_string().starts_with(&month.to_string()));
    assert_eq!(Month::of(date), month);
}

#[test]
fn test_month_contains() {
    let march = Month::new(2024, 3).unwrap();
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    assert!(march.contains(&date(2024, 3, 1)));
    assert!(march.contains(&date(2024, 3, 31)));
    assert!(!march.contains(&date(2024, 2, 29)));
    assert!(!march.contains(&date(2024, 4, 1)));
    assert!(!march.contains(&date(2023, 3, 15)));
}
