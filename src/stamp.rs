//! Run stamp shared by every section a writer emits.
use chrono::{DateTime, Local, TimeZone};
use std::fmt;

/// `asctime`-style layout, e.g. `Thu Oct 15 09:03:07 2026`.
const ASCTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Local date/time captured once and reused verbatim for a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp(String);

impl RunStamp {
    /// Capture the current local time.
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Format an explicit point in time.
    pub fn from_datetime<Tz>(at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self(at.format(ASCTIME_FORMAT).to_string())
    }

    /// Use a preformatted stamp (fixtures, replays).
    pub fn fixed(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Return the formatted stamp.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_like_asctime() {
        let at = Utc.with_ymd_and_hms(2017, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(RunStamp::from_datetime(&at).as_str(), "Sun Mar  5 14:07:09 2017");
    }

    #[test]
    fn two_digit_days_are_not_padded() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 3, 7).unwrap();
        assert_eq!(RunStamp::from_datetime(&at).to_string(), "Fri Oct 16 09:03:07 2026");
    }
}
