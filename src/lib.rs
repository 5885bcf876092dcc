mod amedas;
mod config;
mod error;
mod fetch;
mod stations;
mod types;
mod utils;

pub use amedas::*;
pub use config::{ConfigError, RunConfig, DEFAULT_REQUEST_INTERVAL_MS};
pub use error::AmedasError;

pub use fetch::error::FetchError;
pub use fetch::fetcher::{AmedasFetcher, FetchOutcome, RAW_HTML_DIR};
pub use fetch::page_source::{HttpPageSource, PageSource};
pub use fetch::url::{build_url, build_url_for, UrlBases, DEFAULT_ETRN_BASE, DEFAULT_REALTIME_BASE};

pub use stations::error::RegistryError;
pub use stations::registry::{parse_row, ParsedRow, SkipReason, StationRegistry, MIN_FIELDS};

pub use types::resolution::{Resolution, UnknownResolution};
pub use types::station::{Station, UrlCategory, SURFACE_BLOCK_THRESHOLD};
