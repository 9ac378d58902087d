//! CSV file price adapter.
//!
//! Reads `Date, Open, High, Low, Close[, Volume]` tables. Headers are matched
//! case-insensitively and extra columns are ignored. Dates may carry a time
//! and a UTC offset; only the calendar date is kept.

use crate::domain::error::AnalyzerError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// Load a single price file.
    pub fn read_file(path: &Path) -> Result<PriceSeries, AnalyzerError> {
        let file = fs::File::open(path).map_err(|e| {
            AnalyzerError::data_source(format!("failed to read {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "reading price file");
        Self::parse(file)
    }

    /// Parse CSV content into a validated, date-sorted series.
    pub fn parse<R: Read>(reader: R) -> Result<PriceSeries, AnalyzerError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| AnalyzerError::data_source(format!("CSV header error: {}", e)))?
            .iter()
            .map(|h| h.to_lowercase())
            .collect::<csv::StringRecord>();
        for required in ["date", "open", "high", "low", "close"] {
            if !headers.iter().any(|h| h == required) {
                return Err(AnalyzerError::data_source(format!(
                    "missing {} column",
                    required
                )));
            }
        }
        rdr.set_headers(headers);

        let mut bars = Vec::new();
        for result in rdr.deserialize::<CsvRow>() {
            let row = result
                .map_err(|e| AnalyzerError::data_source(format!("CSV parse error: {}", e)))?;
            bars.push(OhlcvBar {
                date: parse_naive_date(&row.date)?,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        PriceSeries::new(bars)
    }
}

/// Accepts plain dates, naive timestamps, and offset-qualified timestamps,
/// dropping time and offset.
pub fn parse_naive_date(raw: &str) -> Result<NaiveDate, AnalyzerError> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Ok(dt.naive_local().date());
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.date());
        }
    }
    Err(AnalyzerError::data_source(format!(
        "invalid date format: '{}'",
        raw
    )))
}

impl DataPort for CsvAdapter {
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, AnalyzerError> {
        Self::read_file(&self.csv_path(symbol))
    }

    fn list_symbols(&self) -> Result<Vec<String>, AnalyzerError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            AnalyzerError::data_source(format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                AnalyzerError::data_source(format!("directory entry error: {}", e))
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    symbols.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
