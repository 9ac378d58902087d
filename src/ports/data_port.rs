//! Price data access port trait.
//!
//! Implementations normalize whatever they read (file rows, provider quotes)
//! into a validated `PriceSeries` with timezone-naive dates. Failures surface
//! immediately; nothing is retried.

use crate::domain::error::AnalyzerError;
use crate::domain::price_series::PriceSeries;

pub trait DataPort {
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, AnalyzerError>;

    fn list_symbols(&self) -> Result<Vec<String>, AnalyzerError>;
}
