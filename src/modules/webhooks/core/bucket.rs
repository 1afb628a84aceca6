use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Calendar date a webhook is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketDate(NaiveDate);

impl BucketDate {
    /// Date of `paid_at` in its own UTC offset, or the UTC date of `received_at` when `paid_at`
    /// is empty or not RFC 3339.
    pub fn resolve(paid_at: &str, received_at: DateTime<Utc>) -> Self {
        match DateTime::parse_from_rfc3339(paid_at.trim()) {
            Ok(paid) => Self(paid.date_naive()),
            Err(_) => Self(received_at.date_naive()),
        }
    }

    /// `YYYY-MM-DD`
    pub fn label(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<NaiveDate> for BucketDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for BucketDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
