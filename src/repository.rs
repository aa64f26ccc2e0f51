use chrono::NaiveDate;

use crate::{
    DiaryEntry, DiaryError, DiarySource, Identity, Month, RemoteEntryRecord, Request, Result,
    Transport, TransportError,
};

// Repository reads and writes the signed-in user's entries on the diary backend.
//
// It keeps no state between calls: the identity is looked up on every call,
// and every read fetches the user's full entry set, since the backend offers
// no narrower query. Caching belongs in a wrapper such as `CachedSource`.
#[derive(Debug)]
pub struct Repository<T, I> {
    transport: T,
    identity: I,
}

impl<T: Transport, I: Identity> Repository<T, I> {
    const SCORES_PATH: &'static str = "/api/v1/scores";

    pub fn new(transport: T, identity: I) -> Self {
        Self {
            transport,
            identity,
        }
    }

    // Fails before any I/O if nobody is signed in.
    // A blank key counts as signed out.
    fn user_key(&self) -> Result<String> {
        self.identity
            .user_key()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(DiaryError::AuthenticationRequired)
    }

    fn fetch_all(&self, user_key: &str) -> std::result::Result<Vec<RemoteEntryRecord>, TransportError> {
        let req = Request::get(Self::SCORES_PATH).query("userId", user_key);
        let body = self.transport.execute(req)?;
        Ok(serde_json::from_value(body)?)
    }

    // List the user's entries, optionally only those in `month`.
    // Entries are returned in the order the backend sent them.
    pub fn list_by_month(&self, month: Option<Month>) -> Result<Vec<DiaryEntry>> {
        let key = self.user_key()?;
        let entries = self.fetch_all(&key)?.into_iter().map(DiaryEntry::from);
        Ok(match month {
            Some(month) => entries.filter(|e| month.contains(&e.date)).collect(),
            None => entries.collect(),
        })
    }

    // Find the entry for `date`.
    // Unlike `get_by_date`, a failed fetch is reported as an error.
    pub fn try_get_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        let key = self.user_key()?;
        Ok(self
            .fetch_all(&key)?
            .into_iter()
            .find(|r| r.date == date)
            .map(DiaryEntry::from))
    }

    // Find the entry for `date`.
    // A failed fetch is indistinguishable from a missing entry: both are None.
    // Use `try_get_by_date` to tell them apart.
    pub fn get_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        match self.try_get_by_date(date) {
            Err(DiaryError::Transport(_)) => Ok(None),
            res => res,
        }
    }

    // Create or replace the entry for `entry.date`.
    // The backend sends nothing back, so the saved entry is returned as given.
    pub fn save(&self, entry: DiaryEntry) -> Result<DiaryEntry> {
        let key = self.user_key()?;
        let user_id = key
            .parse()
            .map_err(|_| DiaryError::InvalidIdentity(key.clone()))?;
        let body = serde_json::to_value(entry.to_wire(user_id)).map_err(TransportError::from)?;
        self.transport
            .execute(Request::post(Self::SCORES_PATH, body))?;
        Ok(entry)
    }

    // The backend cannot delete entries yet, so this always fails.
    pub fn delete(&self, _date: NaiveDate) -> Result<()> {
        Err(DiaryError::Unsupported("Deleting entries"))
    }
}

impl<T: Transport, I: Identity> DiarySource for Repository<T, I> {
    fn list_by_month(&self, month: Option<Month>) -> Result<Vec<DiaryEntry>> {
        Repository::list_by_month(self, month)
    }

    fn get_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        Repository::get_by_date(self, date)
    }
}
