use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::datetime::{month_name, parse_utc_timestamp};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised when constructing a birthday record
#[derive(Debug, PartialEq)]
pub enum ValidationError {
    MonthOutOfRange(i32),
    DayOutOfRange(i32),
    BadTimestamp(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MonthOutOfRange(month) => {
                write!(f, "Month must be between 1 and 12 inclusive, got {}", month)
            }
            ValidationError::DayOutOfRange(day) => {
                write!(f, "Day must be between 1 and 31 inclusive, got {}", day)
            }
            ValidationError::BadTimestamp(value) => {
                write!(f, "Could not parse timestamp {:?}", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Flat field mapping for a birthday record, as it arrives from a CSV row
/// or any other untrusted source. Goes through [`Birthday::create`] before
/// it touches the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBirthday {
    pub first_name: String,
    pub last_name: String,
    pub month: i32,
    pub day: i32,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A birthday record.
///
/// `id` and the timestamps are `None` until the store assigns them; the
/// store stamps missing timestamps with now-UTC at insert time.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Birthday {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub month: i32,
    pub day: i32,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Birthday {
    /// Validate a flat field mapping into a not-yet-persisted record.
    ///
    /// Names are normalized to lowercase. An out-of-range month or day is
    /// rejected outright, never clamped. There is deliberately no per-month
    /// maximum on `day`. Empty optional fields (a CSV artifact) count as
    /// absent.
    pub fn create(fields: NewBirthday) -> Result<Birthday, ValidationError> {
        if !(1..=12).contains(&fields.month) {
            return Err(ValidationError::MonthOutOfRange(fields.month));
        }

        if !(1..=31).contains(&fields.day) {
            return Err(ValidationError::DayOutOfRange(fields.day));
        }

        let updated_at = match fields.updated_at.filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                parse_utc_timestamp(&raw).ok_or(ValidationError::BadTimestamp(raw))?,
            ),
            None => None,
        };

        Ok(Birthday {
            id: None,
            first_name: fields.first_name.to_lowercase(),
            last_name: fields.last_name.to_lowercase(),
            month: fields.month,
            day: fields.day,
            note: fields.note.filter(|s| !s.is_empty()),
            created_at: None,
            updated_at,
        })
    }
}

/// Renders the record as a Telegram-HTML notification entry:
/// a bold name with the date in parentheses, plus an italic note line
/// when a note is present.
impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<b>{} {}</b> ({} {})",
            capitalize(&self.first_name),
            capitalize(&self.last_name),
            month_name(self.month),
            self.day
        )?;

        if let Some(note) = &self.note {
            write!(f, ":\n<i>{}</i>", capitalize(note))?;
        }

        Ok(())
    }
}

/// Uppercase the first character, lowercase the rest
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
