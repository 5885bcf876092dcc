//! This module provides the main entry point: a station registry paired with
//! a fetcher, and the loop that walks a [`RunConfig`] through them.

use crate::config::RunConfig;
use crate::error::AmedasError;
use crate::fetch::fetcher::{AmedasFetcher, FetchOutcome};
use crate::fetch::page_source::{HttpPageSource, PageSource};
use crate::stations::registry::StationRegistry;
use crate::types::resolution::Resolution;
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use std::path::Path;

/// Counters for one [`Amedas::download`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub cache_hits: usize,
    /// Requests that produced no file (no URL, failed or empty download).
    pub no_data: usize,
    /// Target lookups that missed the registry, counted per date.
    pub unknown_stations: usize,
    pub skipped_resolutions: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::CacheHit(_) => self.cache_hits += 1,
            FetchOutcome::Downloaded(_) => self.downloaded += 1,
            FetchOutcome::NoData { .. } => self.no_data += 1,
        }
    }
}

/// Downloads AMeDAS observation pages for stations of a reference table.
///
/// # Examples
///
/// ```rust,no_run
/// # use amedas::{Amedas, AmedasError, Resolution};
/// # use chrono::NaiveDate;
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), AmedasError> {
/// let amedas = Amedas::load(Path::new("AMeDAS_list.csv"), Path::new("."))?;
///
/// let outcome = amedas
///     .save()
///     .station("47662")
///     .resolution(Resolution::Hourly)
///     .date(NaiveDate::from_ymd_opt(2016, 4, 12).unwrap())
///     .call()
///     .await?;
/// println!("{:?}", outcome);
/// # Ok(())
/// # }
/// ```
pub struct Amedas<S = HttpPageSource> {
    registry: StationRegistry,
    fetcher: AmedasFetcher<S>,
}

impl Amedas<HttpPageSource> {
    /// Reads the station list at `station_list` and caches pages below
    /// `cache_root`.
    pub fn load(station_list: &Path, cache_root: &Path) -> Result<Self, AmedasError> {
        let registry = StationRegistry::load(station_list)?;
        Ok(Self::new(registry, AmedasFetcher::new(cache_root)))
    }
}

#[bon]
impl<S: PageSource> Amedas<S> {
    pub fn new(registry: StationRegistry, fetcher: AmedasFetcher<S>) -> Self {
        Self { registry, fetcher }
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn fetcher(&self) -> &AmedasFetcher<S> {
        &self.fetcher
    }

    /// Fetches one page for the station with block number `station`.
    ///
    /// # Arguments
    ///
    /// * `.station(&str)`: **Required.** Block number of the station.
    /// * `.resolution(Resolution)`: **Required.**
    /// * `.date(NaiveDate)`: **Required.** Ignored by real-time pages.
    /// * `.force(bool)`: Optional. Re-download even if cached. Defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AmedasError::UnknownStation`] if the block number is not in
    /// the registry. Download failures are not errors; they show up as
    /// [`FetchOutcome::NoData`].
    #[builder]
    pub async fn save(
        &self,
        station: &str,
        resolution: Resolution,
        date: NaiveDate,
        force: Option<bool>,
    ) -> Result<FetchOutcome, AmedasError> {
        let station = self
            .registry
            .get(station)
            .ok_or_else(|| AmedasError::UnknownStation(station.to_string()))?;
        Ok(self
            .fetcher
            .save(station, resolution, date, force.unwrap_or(false))
            .await)
    }

    /// Walks every (resolution, date, target) combination of `config`.
    ///
    /// Dates advance by a day, or by a month for daily pages. Unknown
    /// resolutions and block numbers are logged and skipped. After each
    /// request that reached the network the loop pauses for
    /// [`RunConfig::request_interval`]; cache hits go on immediately.
    pub async fn download(&self, config: &RunConfig, force: bool) -> RunSummary {
        let mut summary = RunSummary::default();
        let interval = config.request_interval();

        for token in &config.resolutions {
            let resolution = match token.parse::<Resolution>() {
                Ok(r) => r,
                Err(e) => {
                    warn!("{}, skipping", e);
                    summary.skipped_resolutions += 1;
                    continue;
                }
            };

            for date in resolution.dates(config.start_date, config.end_date) {
                for block_no in &config.targets {
                    let Some(station) = self.registry.get(block_no) else {
                        warn!("Unknown block number: {}", block_no);
                        summary.unknown_stations += 1;
                        continue;
                    };

                    let outcome = self.fetcher.save(station, resolution, date, force).await;
                    summary.record(&outcome);

                    if outcome.touched_network() && !interval.is_zero() {
                        tokio::time::sleep(interval).await;
                    }
                }
            }
        }

        info!(
            "Run finished: {} downloaded, {} cached, {} without data, {} unknown station lookups",
            summary.downloaded, summary.cache_hits, summary.no_data, summary.unknown_stations
        );
        summary
    }
}
