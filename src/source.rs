use chrono::NaiveDate;

use crate::{DiaryEntry, Month, Result};

// DiarySource is anything entries can be browsed from.
// The remote repository, the offline fixtures and the cache all implement it,
// so callers can switch between them without changing behavior:
// - months are matched by their "YYYY-MM" prefix (see `Month::contains`)
// - a lookup that matches nothing is Ok(None), not an error
pub trait DiarySource {
    // Return the entries in `month`, or every entry if `month` is None.
    // Ordering is up to the source; callers that need an order must sort.
    fn list_by_month(&self, month: Option<Month>) -> Result<Vec<DiaryEntry>>;

    // Return the entry written on `date`, if any.
    fn get_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>>;

    // Return the latest entry in `month`, if any.
    fn most_recent_in_month(&self, month: Month) -> Result<Option<DiaryEntry>> {
        Ok(latest(self.list_by_month(Some(month))?))
    }
}

// The entry with the greatest date. On a tie, the last one wins.
pub(crate) fn latest(entries: impl IntoIterator<Item = DiaryEntry>) -> Option<DiaryEntry> {
    entries.into_iter().max_by_key(|e| e.date)
}

impl<S: DiarySource + ?Sized> DiarySource for Box<S> {
    fn list_by_month(&self, month: Option<Month>) -> Result<Vec<DiaryEntry>> {
        (**self).list_by_month(month)
    }

    fn get_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        (**self).get_by_date(date)
    }

    fn most_recent_in_month(&self, month: Month) -> Result<Option<DiaryEntry>> {
        (**self).most_recent_in_month(month)
    }
}

#[test]
fn test_latest_breaks_ties_by_position() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let first = DiaryEntry::new(date, "first", 1);
    let second = DiaryEntry::new(date, "second", 2);
    let earlier = DiaryEntry::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "earlier", 3);
    assert_eq!(
        latest([first, earlier, second.clone()]),
        Some(second)
    );
    assert_eq!(latest(Vec::new()), None);
}
