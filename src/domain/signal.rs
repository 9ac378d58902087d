//! Per-bar trading signals derived from an `IndicatorSet`.
//!
//! Bollinger: Buy when close < lower band, Sell when close > upper band.
//! SMA crossover: Buy while short SMA > long SMA, Sell while short < long.
//! The crossover rule compares levels on every bar; it is not an edge
//! detector, so it yields runs of identical signals. Anything undefined or
//! exactly on a threshold is Hold.

use crate::domain::error::AnalyzerError;
use crate::domain::indicator_set::IndicatorSet;
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::StrategyKind;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// Buy = 1, Sell = -1, Hold = 0.
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub signal: Signal,
}

fn bollinger_signal(close: f64, bands: Option<(f64, f64, f64, f64)>) -> Signal {
    match bands {
        Some((_, _, lower, _)) if close < lower => Signal::Buy,
        Some((upper, _, _, _)) if close > upper => Signal::Sell,
        _ => Signal::Hold,
    }
}

fn crossover_signal(short: Option<f64>, long: Option<f64>) -> Signal {
    match (short, long) {
        (Some(s), Some(l)) if s > l => Signal::Buy,
        (Some(s), Some(l)) if s < l => Signal::Sell,
        _ => Signal::Hold,
    }
}

pub fn derive_signals(
    series: &PriceSeries,
    indicators: &IndicatorSet,
    kind: StrategyKind,
) -> Result<Vec<SignalPoint>, AnalyzerError> {
    if indicators.strategy_kind() != kind {
        return Err(AnalyzerError::invalid_input(format!(
            "indicators were computed for {}, not {}",
            indicators.strategy_kind(),
            kind
        )));
    }
    if indicators.dates() != series.dates() {
        return Err(AnalyzerError::invalid_input(
            "indicator dates do not match the price series",
        ));
    }

    let signals = series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let signal = match indicators {
                IndicatorSet::Bollinger { bands, .. } => {
                    bollinger_signal(bar.close, bands.values[i].bands())
                }
                IndicatorSet::SmaCrossover { short, long, .. } => {
                    crossover_signal(short.values[i].simple(), long.values[i].simple())
                }
            };
            SignalPoint {
                date: bar.date,
                signal,
            }
        })
        .collect();

    Ok(signals)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalSummary {
    pub buys: usize,
    pub sells: usize,
    pub holds: usize,
}

impl SignalSummary {
    pub fn from_signals(signals: &[SignalPoint]) -> Self {
        signals
            .iter()
            .fold(SignalSummary::default(), |mut acc, p| {
                match p.signal {
                    Signal::Buy => acc.buys += 1,
                    Signal::Sell => acc.sells += 1,
                    Signal::Hold => acc.holds += 1,
                }
                acc
            })
    }
}
