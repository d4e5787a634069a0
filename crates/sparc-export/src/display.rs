use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

/// How dates and timestamps are shown to a person, as opposed to the ISO
/// forms used in machine-oriented exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFormat {
    /// `strftime` pattern for calendar dates (e.g. "%-m/%-d/%Y").
    pub date_pattern: String,

    /// `strftime` pattern for timestamps shown in local time.
    pub datetime_pattern: String,

    /// IANA time zone name. `None` uses the system zone.
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            date_pattern: "%-m/%-d/%Y".to_string(),
            datetime_pattern: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
            time_zone: None,
        }
    }
}

impl DisplayFormat {
    /// Resolve the configured zone. Unknown names fall back to UTC.
    pub fn zone(&self) -> TimeZone {
        match &self.time_zone {
            None => TimeZone::system(),
            Some(name) => TimeZone::get(name).unwrap_or_else(|e| {
                tracing::warn!(time_zone = %name, error = %e, "unknown time zone, using UTC");
                TimeZone::UTC
            }),
        }
    }

    pub fn date(&self, date: Date) -> String {
        jiff::fmt::strtime::format(&self.date_pattern, date).unwrap_or_else(|e| {
            tracing::warn!(pattern = %self.date_pattern, error = %e, "bad date pattern");
            date.to_string()
        })
    }

    pub fn timestamp(&self, ts: Timestamp, zone: &TimeZone) -> String {
        let zoned = ts.to_zoned(zone.clone());
        jiff::fmt::strtime::format(&self.datetime_pattern, &zoned).unwrap_or_else(|e| {
            tracing::warn!(pattern = %self.datetime_pattern, error = %e, "bad datetime pattern");
            iso_millis(ts)
        })
    }
}

const ISO_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// ISO-8601 UTC instant with millisecond precision, e.g.
/// `2025-01-15T10:30:00.000Z`.
pub fn iso_millis(ts: Timestamp) -> String {
    jiff::fmt::strtime::format(ISO_MILLIS, ts).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "iso timestamp formatting failed");
        ts.to_string()
    })
}
