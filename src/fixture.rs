use anyhow::Context as _;
use chrono::NaiveDate;

use crate::{source, DiaryEntry, DiarySource, Month, Result};

// FixtureSource serves a fixed set of entries from memory.
// It stands in for the remote repository when there is no network,
// and answers the same queries the same way.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    entries: Vec<DiaryEntry>,
}

impl FixtureSource {
    const BUILTIN: &'static str = include_str!("../data/fixtures.json");

    pub fn new(entries: Vec<DiaryEntry>) -> Self {
        Self { entries }
    }

    // The sample diary shipped with the crate.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_reader(Self::BUILTIN.as_bytes()).context("Parsing builtin fixtures")
    }

    // Load fixtures from a JSON array of entries.
    pub fn from_reader(r: impl std::io::Read) -> anyhow::Result<Self> {
        let entries: Vec<DiaryEntry> = serde_json::from_reader(r)?;
        log::debug!("Loaded {} fixture entries", entries.len());
        Ok(Self::new(entries))
    }

    // Every entry, in the order given.
    pub fn all(&self) -> &[DiaryEntry] {
        &self.entries
    }

    // The entries in `month`, oldest first.
    pub fn by_month(&self, month: Month) -> Vec<DiaryEntry> {
        let mut res: Vec<_> = self
            .entries
            .iter()
            .filter(|e| month.contains(&e.date))
            .cloned()
            .collect();
        res.sort_by_key(|e| e.date);
        res
    }

    pub fn by_date(&self, date: NaiveDate) -> Option<DiaryEntry> {
        self.entries.iter().find(|e| e.date == date).cloned()
    }

    // The latest entry in `month`.
    pub fn most_recent_in_month(&self, month: Month) -> Option<DiaryEntry> {
        source::latest(
            self.entries
                .iter()
                .filter(|e| month.contains(&e.date))
                .cloned(),
        )
    }
}

impl DiarySource for FixtureSource {
    fn list_by_month(&self, month: Option<Month>) -> Result<Vec<DiaryEntry>> {
        Ok(match month {
            Some(month) => self.by_month(month),
            None => self.entries.clone(),
        })
    }

    fn get_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        Ok(self.by_date(date))
    }

    fn most_recent_in_month(&self, month: Month) -> Result<Option<DiaryEntry>> {
        Ok(FixtureSource::most_recent_in_month(self, month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> Month {
        Month::new(2024, 3).unwrap()
    }

    fn setup() -> FixtureSource {
        FixtureSource::new(vec![
            DiaryEntry::new(date(2024, 3, 15), "mid march", 4),
            DiaryEntry::new(date(2024, 2, 20), "february", 2),
            DiaryEntry::new(date(2024, 3, 1), "early march", 3),
        ])
    }

    #[test]
    fn test_all_keeps_input_order() {
        let fixtures = setup();
        let dates: Vec<_> = fixtures.all().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 3, 15), date(2024, 2, 20), date(2024, 3, 1)]);
    }

    #[test]
    fn test_by_month_ascending() {
        let actual = setup().by_month(march());
        assert_eq!(
            actual,
            vec![
                DiaryEntry::new(date(2024, 3, 1), "early march", 3),
                DiaryEntry::new(date(2024, 3, 15), "mid march", 4),
            ]
        );
        assert!(setup().by_month(Month::new(2024, 4).unwrap()).is_empty());
    }

    #[test]
    fn test_most_recent_in_month() {
        let fixtures = setup();
        assert_eq!(
            fixtures.most_recent_in_month(march()),
            Some(DiaryEntry::new(date(2024, 3, 15), "mid march", 4))
        );
        assert_eq!(fixtures.most_recent_in_month(Month::new(2024, 4).unwrap()), None);
    }

    #[test]
    fn test_by_date() {
        let fixtures = setup();
        assert_eq!(
            fixtures.by_date(date(2024, 2, 20)),
            Some(DiaryEntry::new(date(2024, 2, 20), "february", 2))
        );
        assert_eq!(fixtures.by_date(date(2024, 4, 1)), None);
    }

    #[test]
    fn test_source_interface() {
        let fixtures: Box<dyn DiarySource> = Box::new(setup());
        assert_eq!(fixtures.list_by_month(None).unwrap().len(), 3);
        assert_eq!(fixtures.list_by_month(Some(march())).unwrap().len(), 2);
        assert_eq!(fixtures.get_by_date(date(2024, 4, 1)).unwrap(), None);
        assert_eq!(
            fixtures.most_recent_in_month(march()).unwrap().map(|e| e.date),
            Some(date(2024, 3, 15))
        );
    }

    #[test]
    fn test_builtin() {
        let fixtures = FixtureSource::builtin().unwrap();
        assert!(!fixtures.all().is_empty());
        let feb = fixtures.by_month(Month::new(2024, 2).unwrap());
        assert!(feb.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_from_reader() {
        let json = r#"[{"date": "2024-05-01", "content": "hi", "emotion": 3}]"#;
        let fixtures = FixtureSource::from_reader(json.as_bytes()).unwrap();
        assert_eq!(fixtures.all(), &[DiaryEntry::new(date(2024, 5, 1), "hi", 3)]);

        assert!(FixtureSource::from_reader(r#"[{"date": "May 1"}]"#.as_bytes()).is_err());
    }
}
