//! Loads the AMeDAS station reference table into a lookup keyed by block
//! number.

use crate::stations::error::RegistryError;
use crate::types::station::Station;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

/// Rows with fewer tab-separated fields than this are not station rows.
pub const MIN_FIELDS: usize = 10;

/// Field value the reference table uses for "no value".
const NULL_SENTINEL: &str = "None";

const BOM: char = '\u{feff}';

/// Why a line of the reference table did not produce a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewFields { found: usize },
}

/// Result of reading one line of the reference table.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    Station(Station),
    Skipped(SkipReason),
}

/// Parses one line of the reference table.
///
/// Layout is positional: prefecture number, block number and name lead the
/// row, elevation, alternate id, area code and group code close it, and
/// anything in between is ignored. Every field except the block number and
/// elevation may hold the "no value" marker. `line_no` is only used for
/// error messages.
pub fn parse_row(line_no: usize, line: &str) -> Result<ParsedRow, RegistryError> {
    let fields: Vec<Option<&str>> = line
        .trim()
        .split('\t')
        .map(|f| if f == NULL_SENTINEL { None } else { Some(f) })
        .collect();

    if fields.len() < MIN_FIELDS {
        return Ok(ParsedRow::Skipped(SkipReason::TooFewFields {
            found: fields.len(),
        }));
    }

    let n = fields.len();
    let optional = |idx: usize| fields[idx].map(str::to_string);

    let block_no = optional(1).ok_or(RegistryError::MissingField {
        line: line_no,
        field: "block_no",
    })?;

    let block_number =
        block_no
            .parse::<u32>()
            .map_err(|e| RegistryError::InvalidBlockNumber {
                line: line_no,
                value: block_no.clone(),
                source: e,
            })?;

    let height = fields[n - 4].ok_or(RegistryError::MissingElevation { line: line_no })?;
    let elevation = height
        .trim()
        .parse::<f64>()
        .map_err(|e| RegistryError::InvalidElevation {
            line: line_no,
            value: height.to_string(),
            source: e,
        })?;

    Ok(ParsedRow::Station(Station::new(
        optional(0),
        block_no,
        block_number,
        optional(2),
        optional(n - 3),
        optional(n - 2),
        optional(n - 1),
        elevation,
    )))
}

/// All stations of the reference table, keyed by block number.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: HashMap<String, Station>,
    skipped: Vec<(usize, SkipReason)>,
}

impl StationRegistry {
    /// Reads and parses the reference table at `path`.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Read(path.to_path_buf(), e))?;
        let registry = Self::parse(&text)?;
        info!(
            "Loaded {} stations from {} ({} rows skipped)",
            registry.len(),
            path.display(),
            registry.skipped.len()
        );
        Ok(registry)
    }

    /// Parses reference table text. A leading byte-order mark is ignored.
    ///
    /// Short rows are recorded in [`StationRegistry::skipped`]; an unusable
    /// elevation or block number aborts the whole load, while an absent
    /// prefecture number or name does not. A later row with the same block
    /// number replaces an earlier one.
    pub fn parse(text: &str) -> Result<Self, RegistryError> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut registry = StationRegistry::default();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            match parse_row(line_no, line)? {
                ParsedRow::Station(station) => {
                    let block_no = station.block_no.clone();
                    if let Some(previous) = registry.stations.insert(block_no, station) {
                        debug!(
                            "Line {} replaces earlier entry for block {}",
                            line_no, previous.block_no
                        );
                    }
                }
                ParsedRow::Skipped(reason) => registry.skipped.push((line_no, reason)),
            }
        }

        Ok(registry)
    }

    pub fn get(&self, block_no: &str) -> Option<&Station> {
        self.stations.get(block_no)
    }

    pub fn contains(&self, block_no: &str) -> bool {
        self.stations.contains_key(block_no)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Line numbers (1-based) and reasons of rows that were not stations.
    pub fn skipped(&self) -> &[(usize, SkipReason)] {
        &self.skipped
    }
}
