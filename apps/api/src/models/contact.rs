use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// An occasion the daily scan wishes people for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Birthday,
    Anniversary,
}

impl EventKind {
    /// Label used both in the suggestion prompt and in the notification payload.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Birthday => "birthday",
            EventKind::Anniversary => "anniversary",
        }
    }
}

/// A person to be wished, as stored in the external `contacts` table.
///
/// Read-only here: every scan re-reads the whole table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Contact {
    #[serde(default)]
    pub id: String,
    /// Contact channel of whoever manages this person; the notification goes there.
    #[serde(rename = "manager")]
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default, deserialize_with = "deserialize_record_date")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_record_date")]
    pub anniversary: Option<NaiveDate>,
}

impl Contact {
    pub fn date_for(&self, event: EventKind) -> Option<NaiveDate> {
        match event {
            EventKind::Birthday => self.birthday,
            EventKind::Anniversary => self.anniversary,
        }
    }

    /// True iff the event's date falls on `today`, year ignored.
    pub fn occurs_on(&self, event: EventKind, today: NaiveDate) -> bool {
        self.date_for(event)
            .is_some_and(|date| date.month() == today.month() && date.day() == today.day())
    }

    pub fn interests_text(&self) -> &str {
        self.interests.as_deref().unwrap_or_default()
    }
}

/// Record stores hand dates back either as RFC 3339 datetimes or as bare
/// `YYYY-MM-DD`. Datetimes are reduced to their UTC calendar date.
fn deserialize_record_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    let raw = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(datetime.with_timezone(&Utc).date_naive()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{raw}': {e}")))
}
