//! Standard Deviation indicator.
//!
//! Sample standard deviation over n closing prices.
//! STDDEV(n)[i] = sqrt(sum((C[i-j] - SMA(n)[i])^2 for j in 0..n) / (n - 1))
//! Warmup: first (n-1) bars are invalid. A period below 2 is never valid.

use crate::domain::indicator::sma::mean_close;
use crate::domain::indicator::{
    trailing_window, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

/// Sample standard deviation of closes around `mean`. Caller guarantees
/// `window.len() >= 2`.
pub(crate) fn sample_stddev(window: &[OhlcvBar], mean: f64) -> f64 {
    let variance: f64 = window
        .iter()
        .map(|b| {
            let diff = b.close - mean;
            diff * diff
        })
        .sum::<f64>()
        / (window.len() - 1) as f64;
    variance.sqrt()
}

pub fn calculate_stddev(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let window = trailing_window(bars, i, period).filter(|w| w.len() >= 2);
        let value = window
            .map(|w| sample_stddev(w, mean_close(w)))
            .unwrap_or(0.0);

        values.push(IndicatorPoint {
            date: bars[i].date,
            valid: window.is_some(),
            value: IndicatorValue::Simple(value),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Stddev(period),
        values,
    }
}
