//! The fetch-and-cache protocol: one file per (resolution, station, page
//! date), downloaded once and only replaced when forced.

use crate::fetch::error::FetchError;
use crate::fetch::page_source::{HttpPageSource, PageSource};
use crate::fetch::url::UrlBases;
use crate::types::resolution::Resolution;
use crate::types::station::Station;
use crate::utils::write_with_bom;
use chrono::{Datelike, NaiveDate};
use log::{error, info, warn};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const RAW_HTML_DIR: &str = "raw_html";

/// What a single [`AmedasFetcher::save`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The cache file already existed; nothing was requested.
    CacheHit(PathBuf),
    /// A page was downloaded and written to the given path.
    Downloaded(PathBuf),
    /// Nothing was written. `requested` tells whether a request went out.
    NoData { requested: bool },
}

impl FetchOutcome {
    pub fn is_download(&self) -> bool {
        matches!(self, FetchOutcome::Downloaded(_))
    }

    /// Whether the remote service was contacted.
    pub fn touched_network(&self) -> bool {
        match self {
            FetchOutcome::CacheHit(_) => false,
            FetchOutcome::Downloaded(_) => true,
            FetchOutcome::NoData { requested } => *requested,
        }
    }
}

/// Downloads observation pages into a `raw_html/` tree below `cache_root`.
pub struct AmedasFetcher<S = HttpPageSource> {
    cache_root: PathBuf,
    source: S,
    bases: UrlBases,
}

impl AmedasFetcher<HttpPageSource> {
    pub fn new(cache_root: &Path) -> Self {
        Self::with_source(cache_root, HttpPageSource::new())
    }
}

impl<S: PageSource> AmedasFetcher<S> {
    pub fn with_source(cache_root: &Path, source: S) -> Self {
        Self {
            cache_root: cache_root.to_path_buf(),
            source,
            bases: UrlBases::default(),
        }
    }

    pub fn with_url_bases(mut self, bases: UrlBases) -> Self {
        self.bases = bases;
        self
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Location of the cache file for a request. The date is normalized for
    /// the resolution first, so all days of a month share one daily file.
    ///
    /// Layout: `raw_html/{resolution}/{block}_{name}/{year}/{block}_{name}_{Y}_{m}_{d}.html`
    pub fn cache_path(
        &self,
        station: &Station,
        resolution: Resolution,
        date: NaiveDate,
    ) -> PathBuf {
        let date = resolution.normalize_date(date);
        let label = station.cache_label();
        self.cache_root
            .join(RAW_HTML_DIR)
            .join(resolution.path_segment())
            .join(&label)
            .join(date.year().to_string())
            .join(format!("{}_{}.html", label, date.format("%Y_%m_%d")))
    }

    /// Fetches the page for a request unless its cache file already exists.
    ///
    /// With `force` the cache is ignored and the file rewritten. Every
    /// failure is logged and reported as [`FetchOutcome::NoData`]; this
    /// never returns an error.
    pub async fn save(
        &self,
        station: &Station,
        resolution: Resolution,
        date: NaiveDate,
        force: bool,
    ) -> FetchOutcome {
        let date = resolution.normalize_date(date);
        let path = self.cache_path(station, resolution, date);

        if !force && fs::try_exists(&path).await.unwrap_or(false) {
            info!("{} already exists.", path.display());
            return FetchOutcome::CacheHit(path);
        }

        let Some(url) = self.bases.build(station, resolution, date) else {
            return FetchOutcome::NoData { requested: false };
        };
        info!("Target url {}", url);

        let html = match self.source.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                error!("Download error: {}", error_chain(&e));
                return FetchOutcome::NoData { requested: true };
            }
        };

        if html.is_empty() {
            warn!("Empty response from {}, nothing saved", url);
            return FetchOutcome::NoData { requested: true };
        }

        match write_with_bom(&path, &html).await {
            Ok(()) => {
                info!("Data saved to {}", path.display());
                FetchOutcome::Downloaded(path)
            }
            Err(e) => {
                error!("Save error: {}", error_chain(&e));
                FetchOutcome::NoData { requested: true }
            }
        }
    }

    /// Text-keyed form of [`AmedasFetcher::save`]. Returns `true` only when a
    /// new file was written. An unknown resolution is logged and does
    /// nothing.
    pub async fn fetch_and_cache(
        &self,
        station: &Station,
        resolution: &str,
        date: NaiveDate,
        force: bool,
    ) -> bool {
        match resolution.parse::<Resolution>() {
            Ok(resolution) => self
                .save(station, resolution, date, force)
                .await
                .is_download(),
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}

fn error_chain(e: &FetchError) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
