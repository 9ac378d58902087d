//! Rolling technical indicators.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A time series of indicator values, one point per bar

pub mod bollinger;
pub mod sma;
pub mod stddev;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

impl IndicatorPoint {
    /// The scalar value, or `None` during warmup or for band-shaped points.
    pub fn simple(&self) -> Option<f64> {
        match self.value {
            IndicatorValue::Simple(v) if self.valid => Some(v),
            _ => None,
        }
    }

    /// `(upper, middle, lower, stddev)`, or `None` during warmup.
    pub fn bands(&self) -> Option<(f64, f64, f64, f64)> {
        match self.value {
            IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
                stddev,
            } if self.valid => Some((upper, middle, lower, stddev)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
        stddev: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Stddev(usize),
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
}

impl IndicatorType {
    /// Bollinger identity key; the multiplier is kept in hundredths.
    pub fn bollinger(period: usize, stddev_mult: f64) -> Self {
        IndicatorType::Bollinger {
            period,
            stddev_mult_x100: (stddev_mult * 100.0).round() as u32,
        }
    }

    /// Bars needed before the first defined value.
    pub fn lookback(&self) -> usize {
        match self {
            IndicatorType::Sma(period) => *period,
            IndicatorType::Stddev(period) => (*period).max(2),
            IndicatorType::Bollinger { period, .. } => (*period).max(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|p| p.valid).count()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
        }
    }
}

/// Trailing window of `period` bars ending at `i` inclusive, if one fits.
pub(crate) fn trailing_window<T>(items: &[T], i: usize, period: usize) -> Option<&[T]> {
    if period == 0 || i + 1 < period || i >= items.len() {
        return None;
    }
    Some(&items[i + 1 - period..=i])
}
