// ── Event countdown ──

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::CoreError;

/// Whole days, hours, minutes and seconds left until an instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    /// Time from `now` until `target`, saturating at zero once it passed.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = u64::try_from((target - now).num_seconds()).unwrap_or(0);
        Self {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Labelled fields in display order.
    pub fn parts(&self) -> [(u64, &'static str); 4] {
        [
            (self.days, "Días"),
            (self.hours, "Horas"),
            (self.minutes, "Minutos"),
            (self.seconds, "Segundos"),
        ]
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Parse the CMS event date: RFC 3339, or a bare `YYYY-MM-DD` taken as
/// midnight UTC.
pub fn parse_event_date(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::InvalidContent {
            message: format!("unrecognised event date {raw:?}"),
        })
}
