//! Builds the JMA page URLs for a station, resolution and date.

use crate::types::resolution::Resolution;
use crate::types::station::Station;
use chrono::{Datelike, NaiveDate};
use log::warn;

pub const DEFAULT_ETRN_BASE: &str = "http://www.data.jma.go.jp/obd/stats/etrn/view";
pub const DEFAULT_REALTIME_BASE: &str = "http://www.jma.go.jp/jp/amedas_h";

/// The two URL roots of the service. Overridable so a mirror or a local
/// test server can stand in for the JMA hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBases {
    pub etrn: String,
    pub realtime: String,
}

impl Default for UrlBases {
    fn default() -> Self {
        Self {
            etrn: DEFAULT_ETRN_BASE.to_string(),
            realtime: DEFAULT_REALTIME_BASE.to_string(),
        }
    }
}

impl UrlBases {
    /// URL of the page for `station` at `resolution` on `date`.
    ///
    /// `date` is used as given; callers normalize it first. Real-time pages
    /// ignore it and need the station's alternate id, so a station without
    /// one has no real-time URL.
    pub fn build(
        &self,
        station: &Station,
        resolution: Resolution,
        date: NaiveDate,
    ) -> Option<String> {
        match resolution {
            Resolution::TenMinute | Resolution::Hourly | Resolution::Daily => Some(format!(
                "{}/{}_{}1.php?prec_no={}&block_no={}&year={}&month={:02}&day={:02}&view=",
                self.etrn,
                resolution,
                station.url_category(),
                station.prec_no_or_absent(),
                station.block_no,
                date.year(),
                date.month(),
                date.day()
            )),
            Resolution::RealTime => match &station.id {
                Some(id) => Some(format!("{}/today-{}.html", self.realtime, id)),
                None => {
                    warn!(
                        "Station {} has no alternate id, no real-time page",
                        station.block_no
                    );
                    None
                }
            },
        }
    }

    /// Same as [`UrlBases::build`] for a resolution given as text. Unknown
    /// tokens are logged and produce no URL.
    pub fn build_for(
        &self,
        station: &Station,
        resolution: &str,
        date: NaiveDate,
    ) -> Option<String> {
        match resolution.parse::<Resolution>() {
            Ok(resolution) => self.build(station, resolution, date),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}

/// [`UrlBases::build`] against the JMA hosts.
pub fn build_url(station: &Station, resolution: Resolution, date: NaiveDate) -> Option<String> {
    UrlBases::default().build(station, resolution, date)
}

/// [`UrlBases::build_for`] against the JMA hosts.
pub fn build_url_for(station: &Station, resolution: &str, date: NaiveDate) -> Option<String> {
    UrlBases::default().build_for(station, resolution, date)
}
