//! Simple Moving Average.
//!
//! SMA(n)[i] = sum(C[i-j] for j in 0..n) / n
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{
    trailing_window, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

pub(crate) fn mean_close(window: &[OhlcvBar]) -> f64 {
    window.iter().map(|b| b.close).sum::<f64>() / window.len() as f64
}

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let values = (0..bars.len())
        .map(|i| {
            let window = trailing_window(bars, i, period);
            IndicatorPoint {
                date: bars[i].date,
                valid: window.is_some(),
                value: IndicatorValue::Simple(window.map(mean_close).unwrap_or(0.0)),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar::flat(start + Duration::days(i as i64), close))
            .collect()
    }

    #[test]
    fn sma_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_sma(&bars, 3);

        assert_eq!(series.values.len(), 5);
        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[4].valid);
    }

    #[test]
    fn sma_basic_calculation() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_sma(&bars, 3);

        assert_relative_eq!(series.values[2].simple().unwrap(), 20.0);
        assert_relative_eq!(series.values[3].simple().unwrap(), 30.0);
        assert_relative_eq!(series.values[4].simple().unwrap(), 40.0);
    }

    #[test]
    fn sma_period_one_tracks_close() {
        let bars = make_bars(&[7.0, 8.0, 9.0]);
        let series = calculate_sma(&bars, 1);
        let values: Vec<f64> = series.values.iter().filter_map(|p| p.simple()).collect();
        assert_eq!(values, vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn sma_longer_than_series_is_all_invalid() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let series = calculate_sma(&bars, 50);
        assert_eq!(series.values.len(), 3);
        assert_eq!(series.valid_count(), 0);
    }

    #[test]
    fn sma_zero_period_is_all_invalid() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let series = calculate_sma(&bars, 0);
        assert_eq!(series.valid_count(), 0);
    }

    #[test]
    fn sma_keeps_dates() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let series = calculate_sma(&bars, 2);
        for (bar, point) in bars.iter().zip(&series.values) {
            assert_eq!(bar.date, point.date);
        }
        assert_eq!(series.indicator_type, IndicatorType::Sma(2));
    }
}
