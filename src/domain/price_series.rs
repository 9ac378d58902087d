//! Validated daily price series shared by every stage of an analysis run.
//!
//! A `PriceSeries` is built once from an adapter's bars and never mutated
//! afterwards. Indicators, signals and growth trajectories are returned as
//! separate structures keyed by date.

use crate::domain::error::AnalyzerError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Build a series, rejecting empty input, non-positive or non-finite
    /// prices, and dates that are not strictly increasing.
    pub fn new(bars: Vec<OhlcvBar>) -> Result<Self, AnalyzerError> {
        if bars.is_empty() {
            return Err(AnalyzerError::invalid_input("price series is empty"));
        }

        for (i, bar) in bars.iter().enumerate() {
            if !bar.has_valid_prices() {
                return Err(AnalyzerError::invalid_input(format!(
                    "bar {} ({}) has a non-positive or non-finite price",
                    i, bar.date
                )));
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(AnalyzerError::invalid_input(format!(
                    "dates must be strictly increasing: {} follows {}",
                    bar.date,
                    bars[i - 1].date
                )));
            }
        }

        Ok(Self { bars })
    }

    /// Convenience constructor for close-only data: one bar per close on
    /// consecutive calendar days starting at `start`.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Result<Self, AnalyzerError> {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar::flat(start + chrono::Duration::days(i as i64), close))
            .collect();
        Self::new(bars)
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn first(&self) -> &OhlcvBar {
        &self.bars[0]
    }

    pub fn last(&self) -> &OhlcvBar {
        &self.bars[self.bars.len() - 1]
    }

    /// (first date, last date, bar count)
    pub fn date_range(&self) -> (NaiveDate, NaiveDate, usize) {
        (self.first().date, self.last().date, self.bars.len())
    }
}
