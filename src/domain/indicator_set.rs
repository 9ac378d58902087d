//! Strategy-specific indicator bundles.
//!
//! An `IndicatorSet` records which strategy it was computed for, so signal
//! derivation can refuse a set that belongs to another strategy.

use crate::domain::indicator::bollinger::calculate_bollinger;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::{BollingerParams, SmaCrossoverParams, Strategy, StrategyKind};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorSet {
    Bollinger {
        params: BollingerParams,
        bands: IndicatorSeries,
    },
    SmaCrossover {
        params: SmaCrossoverParams,
        short: IndicatorSeries,
        long: IndicatorSeries,
    },
}

impl IndicatorSet {
    pub fn strategy_kind(&self) -> StrategyKind {
        match self {
            IndicatorSet::Bollinger { .. } => StrategyKind::BollingerBands,
            IndicatorSet::SmaCrossover { .. } => StrategyKind::SmaCrossover,
        }
    }

    /// Bars needed before every field of the set is defined.
    pub fn required_bars(&self) -> usize {
        match self {
            IndicatorSet::Bollinger { bands, .. } => bands.indicator_type.lookback(),
            IndicatorSet::SmaCrossover { short, long, .. } => short
                .indicator_type
                .lookback()
                .max(long.indicator_type.lookback()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndicatorSet::Bollinger { bands, .. } => bands.values.len(),
            IndicatorSet::SmaCrossover { short, .. } => short.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        match self {
            IndicatorSet::Bollinger { bands, .. } => bands.values.iter().map(|p| p.date).collect(),
            IndicatorSet::SmaCrossover { short, .. } => {
                short.values.iter().map(|p| p.date).collect()
            }
        }
    }

    /// Column names in export order.
    pub fn column_names(&self) -> Vec<String> {
        match self {
            IndicatorSet::Bollinger { .. } => vec![
                "SMA".to_string(),
                "STD".to_string(),
                "Upper Band".to_string(),
                "Lower Band".to_string(),
            ],
            IndicatorSet::SmaCrossover { .. } => {
                vec!["SMA_Short".to_string(), "SMA_Long".to_string()]
            }
        }
    }

    /// Values for bar `i` in `column_names` order; `None` where undefined.
    pub fn columns_at(&self, i: usize) -> Vec<Option<f64>> {
        match self {
            IndicatorSet::Bollinger { bands, .. } => match bands.values.get(i).and_then(|p| p.bands()) {
                Some((upper, middle, lower, stddev)) => {
                    vec![Some(middle), Some(stddev), Some(upper), Some(lower)]
                }
                None => vec![None; 4],
            },
            IndicatorSet::SmaCrossover { short, long, .. } => vec![
                short.values.get(i).and_then(|p| p.simple()),
                long.values.get(i).and_then(|p| p.simple()),
            ],
        }
    }
}

pub fn compute_bollinger(series: &PriceSeries, params: BollingerParams) -> IndicatorSet {
    IndicatorSet::Bollinger {
        params,
        bands: calculate_bollinger(series.bars(), params.period, params.stddev_mult),
    }
}

pub fn compute_sma_crossover(series: &PriceSeries, params: SmaCrossoverParams) -> IndicatorSet {
    IndicatorSet::SmaCrossover {
        params,
        short: calculate_sma(series.bars(), params.short_window),
        long: calculate_sma(series.bars(), params.long_window),
    }
}

pub fn compute_indicators(series: &PriceSeries, strategy: &Strategy) -> IndicatorSet {
    match strategy.kind {
        StrategyKind::BollingerBands => compute_bollinger(series, strategy.bollinger),
        StrategyKind::SmaCrossover => compute_sma_crossover(series, strategy.crossover),
    }
}
