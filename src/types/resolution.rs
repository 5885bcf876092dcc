//! Defines the temporal resolutions offered by the JMA observation pages and
//! the date arithmetic each of them implies.

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The granularity of an observation page.
///
/// The string form (see [`Resolution::path_segment`]) is used both in the
/// remote URL and as the first directory below `raw_html/` in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// One row every 10 minutes, one page per day.
    TenMinute,
    /// One row per hour, one page per day.
    Hourly,
    /// One row per day. The remote page covers a whole month.
    Daily,
    /// The live "today" page of a station. Not date-parameterized.
    RealTime,
}

/// Returned when a resolution token is not one of `10min`, `hourly`, `daily`
/// or `real-time`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resolution '{0}'")]
pub struct UnknownResolution(pub String);

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::TenMinute,
        Resolution::Hourly,
        Resolution::Daily,
        Resolution::RealTime,
    ];

    pub fn path_segment(&self) -> &'static str {
        match self {
            Resolution::TenMinute => "10min",
            Resolution::Hourly => "hourly",
            Resolution::Daily => "daily",
            Resolution::RealTime => "real-time",
        }
    }

    /// Maps a requested date onto the date that identifies the remote page.
    ///
    /// Daily pages hold a full month, so every day of a month collapses onto
    /// the first of that month. All other resolutions keep the date as is.
    ///
    /// ```
    /// use amedas::Resolution;
    /// use chrono::NaiveDate;
    ///
    /// let d = NaiveDate::from_ymd_opt(2016, 5, 17).unwrap();
    /// assert_eq!(
    ///     Resolution::Daily.normalize_date(d),
    ///     NaiveDate::from_ymd_opt(2016, 5, 1).unwrap()
    /// );
    /// assert_eq!(Resolution::Hourly.normalize_date(d), d);
    /// ```
    pub fn normalize_date(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Resolution::Daily => date.with_day(1).unwrap_or(date),
            _ => date,
        }
    }

    /// The date following `date` in a download run, or `None` past the end of
    /// chrono's calendar.
    pub(crate) fn next_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Resolution::Daily => date.checked_add_months(Months::new(1)),
            Resolution::TenMinute | Resolution::Hourly | Resolution::RealTime => {
                date.checked_add_days(Days::new(1))
            }
        }
    }

    /// Every date a run visits between `start` and `end`, both inclusive.
    ///
    /// Each month step is taken from the previously visited date and clamps
    /// to the end of a shorter month, so a daily run starting on Jan 31 goes
    /// on with Feb 29 and Mar 29.
    pub fn dates(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        let resolution = *self;
        std::iter::successors(Some(start), move |d| resolution.next_date(*d))
            .take_while(move |d| *d <= end)
    }
}

impl FromStr for Resolution {
    type Err = UnknownResolution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.path_segment() == s)
            .ok_or_else(|| UnknownResolution(s.to_string()))
    }
}

/// ```
/// use amedas::Resolution;
///
/// assert_eq!(Resolution::TenMinute.to_string(), "10min");
/// assert_eq!(format!("{}", Resolution::RealTime), "real-time");
/// ```
impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}
