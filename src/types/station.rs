//! Defines the AMeDAS station record loaded from the station reference table.

use std::fmt;

/// How an absent prefecture number or name is spelled in URLs and cache
/// paths, matching the reference table's own "no value" marker.
pub(crate) const ABSENT: &str = "None";

/// Block numbers below this value belong to automatic AMeDAS sites, the rest
/// to staffed surface observatories. The two groups live under different
/// page names on the JMA service.
pub const SURFACE_BLOCK_THRESHOLD: u32 = 10_000;

/// Which of the two page families on the JMA "etrn" service serves a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlCategory {
    /// Automatic AMeDAS site (`*_a1.php`).
    Amedas,
    /// Staffed surface observatory (`*_s1.php`).
    Surface,
}

impl UrlCategory {
    pub fn from_block_number(block: u32) -> Self {
        if block < SURFACE_BLOCK_THRESHOLD {
            UrlCategory::Amedas
        } else {
            UrlCategory::Surface
        }
    }

    /// The token placed after the resolution in the page name.
    pub fn token(&self) -> &'static str {
        match self {
            UrlCategory::Amedas => "a",
            UrlCategory::Surface => "s",
        }
    }
}

impl fmt::Display for UrlCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A single AMeDAS observation station.
///
/// Stations are built once by the [`crate::StationRegistry`] and never
/// mutated afterwards; the URL category is derived from the block number at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Prefecture number used by the "etrn" pages (e.g. "44" for Tokyo).
    pub prec_no: Option<String>,
    /// Block number, the key of the registry (e.g. "47662").
    pub block_no: String,
    /// Display name as written in the reference table.
    pub name: Option<String>,
    /// Alternate id used by the real-time pages, if any.
    pub id: Option<String>,
    /// Forecast area code, if listed.
    pub area_code: Option<String>,
    /// Observation group code, if listed.
    pub group_code: Option<String>,
    /// Elevation above sea level in meters.
    pub elevation: f64,
    url_category: UrlCategory,
}

impl Station {
    /// Builds a station, deriving its [`UrlCategory`] from `block_number`.
    ///
    /// `block_number` is the numeric value of `block_no`; the registry parses
    /// it so that a non-numeric block code is rejected before a station
    /// exists.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prec_no: Option<String>,
        block_no: String,
        block_number: u32,
        name: Option<String>,
        id: Option<String>,
        area_code: Option<String>,
        group_code: Option<String>,
        elevation: f64,
    ) -> Self {
        Self {
            prec_no,
            block_no,
            name,
            id,
            area_code,
            group_code,
            elevation,
            url_category: UrlCategory::from_block_number(block_number),
        }
    }

    pub fn url_category(&self) -> UrlCategory {
        self.url_category
    }

    /// Prefecture number as placed in "etrn" URLs.
    pub fn prec_no_or_absent(&self) -> &str {
        self.prec_no.as_deref().unwrap_or(ABSENT)
    }

    /// `{block_no}_{name}`, the per-station directory and file name prefix in
    /// the cache. A station without a name is filed as `{block_no}_None`.
    pub fn cache_label(&self) -> String {
        format!(
            "{}_{}",
            self.block_no,
            self.name.as_deref().unwrap_or(ABSENT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(block_no: &str) -> Station {
        let block_number = block_no.parse().unwrap();
        Station::new(
            Some("44".to_string()),
            block_no.to_string(),
            block_number,
            Some("Tokyo".to_string()),
            None,
            None,
            None,
            25.2,
        )
    }

    #[test]
    fn category_split_at_threshold() {
        assert_eq!(station("0").url_category(), UrlCategory::Amedas);
        assert_eq!(station("0363").url_category(), UrlCategory::Amedas);
        assert_eq!(station("9999").url_category(), UrlCategory::Amedas);
        assert_eq!(station("10000").url_category(), UrlCategory::Surface);
        assert_eq!(station("47401").url_category(), UrlCategory::Surface);
    }

    #[test]
    fn category_tokens() {
        assert_eq!(UrlCategory::Amedas.to_string(), "a");
        assert_eq!(UrlCategory::Surface.to_string(), "s");
    }

    #[test]
    fn cache_label_joins_block_and_name() {
        assert_eq!(station("47662").cache_label(), "47662_Tokyo");
    }

    #[test]
    fn absent_name_and_prefecture_render_as_none() {
        let mut s = station("47663");
        s.name = None;
        s.prec_no = None;
        assert_eq!(s.cache_label(), "47663_None");
        assert_eq!(s.prec_no_or_absent(), "None");
    }
}
