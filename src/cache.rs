use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::{DiaryEntry, DiarySource, Identity, Month, Result};

// How long answers stay fresh unless configured otherwise.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct Fresh<T> {
    at: Instant,
    value: T,
}

// CachedSource remembers answers from another source for a while.
//
// Results are keyed by the signed-in user, so switching accounts never serves
// another user's entries. Errors are not cached. Neither is a missing entry:
// the remote repository reports a failed fetch as a missing entry, and that
// should not stick around for the whole freshness window.
// Without a signed-in user every call goes straight to the inner source.
pub struct CachedSource<S, I> {
    inner: S,
    identity: I,
    ttl: Duration,
    lists: Mutex<HashMap<(String, Option<Month>), Fresh<Vec<DiaryEntry>>>>,
    dates: Mutex<HashMap<(String, NaiveDate), Fresh<DiaryEntry>>>,
}

impl<S: DiarySource, I: Identity> CachedSource<S, I> {
    pub fn new(inner: S, identity: I, ttl: Duration) -> Self {
        Self {
            inner,
            identity,
            ttl,
            lists: Mutex::default(),
            dates: Mutex::default(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    // Forget everything, e.g. after writing through the inner source.
    pub fn invalidate(&self) {
        log::trace!("Invalidating diary cache");
        self.lists
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.dates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn lookup<K: Eq + Hash + std::fmt::Debug, T: Clone>(
        &self,
        map: &Mutex<HashMap<K, Fresh<T>>>,
        key: &K,
    ) -> Option<T> {
        let map = map.lock().unwrap_or_else(PoisonError::into_inner);
        match map.get(key) {
            Some(hit) if hit.at.elapsed() < self.ttl => {
                log::trace!("Cache hit: {key:?}");
                Some(hit.value.clone())
            }
            _ => {
                log::trace!("Cache miss: {key:?}");
                None
            }
        }
    }

    fn store<K: Eq + Hash, T>(&self, map: &Mutex<HashMap<K, Fresh<T>>>, key: K, value: T) {
        map.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key,
                Fresh {
                    at: Instant::now(),
                    value,
                },
            );
    }
}

impl<S: DiarySource, I: Identity> DiarySource for CachedSource<S, I> {
    fn list_by_month(&self, month: Option<Month>) -> Result<Vec<DiaryEntry>> {
        let Some(user) = self.identity.user_key() else {
            return self.inner.list_by_month(month);
        };
        let key = (user, month);
        if let Some(hit) = self.lookup(&self.lists, &key) {
            return Ok(hit);
        }
        let entries = self.inner.list_by_month(month)?;
        self.store(&self.lists, key, entries.clone());
        Ok(entries)
    }

    fn get_by_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        let Some(user) = self.identity.user_key() else {
            return self.inner.get_by_date(date);
        };
        let key = (user, date);
        if let Some(hit) = self.lookup(&self.dates, &key) {
            return Ok(Some(hit));
        }
        let entry = self.inner.get_by_date(date)?;
        if let Some(entry) = &entry {
            self.store(&self.dates, key, entry.clone());
        }
        Ok(entry)
    }
}
