use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// DiaryEntry is a single day's diary record.
// There is at most one entry per user per date, so the date acts as its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, tabled::Tabled)]
pub struct DiaryEntry {
    pub date: NaiveDate,
    pub content: String,
    // How the user felt that day. The range is not checked here.
    pub emotion: i32,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate, content: impl Into<String>, emotion: i32) -> Self {
        Self {
            date,
            content: content.into(),
            emotion,
        }
    }

    // Build the body of a create request for this entry.
    pub fn to_wire(&self, user_id: u64) -> CreateRequest {
        CreateRequest {
            user_id,
            line: self.content.clone(),
            score: self.emotion,
            date: self.date,
        }
    }
}

// An entry as returned by GET /api/v1/scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEntryRecord {
    pub line: String,
    pub score: i32,
    pub date: NaiveDate,
}

impl From<RemoteEntryRecord> for DiaryEntry {
    fn from(value: RemoteEntryRecord) -> Self {
        DiaryEntry {
            date: value.date,
            content: value.line,
            emotion: value.score,
        }
    }
}

// The body of POST /api/v1/scores.
// The remote creates or replaces the entry for (userId, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub user_id: u64,
    pub line: String,
    pub score: i32,
    pub date: NaiveDate,
}

// The record the remote holds once a create request is accepted.
impl From<CreateRequest> for RemoteEntryRecord {
    fn from(value: CreateRequest) -> Self {
        RemoteEntryRecord {
            line: value.line,
            score: value.score,
            date: value.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_remote_record_to_entry() {
        let record: RemoteEntryRecord = serde_json::from_value(json!({
            "line": "Walked by the river",
            "score": 4,
            "date": "2024-03-15",
        }))
        .unwrap();
        assert_eq!(
            DiaryEntry::from(record),
            DiaryEntry {
                date: date(2024, 3, 15),
                content: "Walked by the river".into(),
                emotion: 4,
            }
        );
    }

    #[test]
    fn test_create_request_wire_names() {
        let entry = DiaryEntry::new(date(2024, 5, 1), "hi", 3);
        let body = serde_json::to_value(entry.to_wire(42)).unwrap();
        assert_eq!(
            body,
            json!({
                "userId": 42,
                "line": "hi",
                "score": 3,
                "date": "2024-05-01",
            })
        );
    }

    #[test]
    fn test_wire_round_trip() {
        let entries = [
            DiaryEntry::new(date(2024, 1, 1), "", 0),
            DiaryEntry::new(date(2024, 2, 29), "leap day", -2),
            DiaryEntry::new(date(1999, 12, 31), "멀리 왔다\nsecond line", 5),
        ];
        for entry in entries {
            let back = DiaryEntry::from(RemoteEntryRecord::from(entry.to_wire(7)));
            assert_eq!(back, entry);
        }
    }

    #[test]
    fn test_malformed_record_fails_to_decode() {
        let missing = serde_json::from_value::<RemoteEntryRecord>(json!({
            "line": "no score",
            "date": "2024-03-15",
        }));
        assert!(missing.is_err());

        let bad_date = serde_json::from_value::<RemoteEntryRecord>(json!({
            "line": "x",
            "score": 1,
            "date": "15/03/2024",
        }));
        assert!(bad_date.is_err());
    }
}
