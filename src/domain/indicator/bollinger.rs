//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is sample standard deviation (divides by N-1), so a period
//! below 2 never produces a valid point.
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are invalid.

use crate::domain::indicator::sma::mean_close;
use crate::domain::indicator::stddev::sample_stddev;
use crate::domain::indicator::{
    trailing_window, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

/// Bands use `stddev_mult` exactly; the series type only records it in
/// hundredths for identification.
pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult: f64,
) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let window = trailing_window(bars, i, period).filter(|w| w.len() >= 2);

        let value = match window {
            Some(window) => {
                let middle = mean_close(window);
                let stddev = sample_stddev(window, middle);
                IndicatorValue::Bollinger {
                    upper: middle + stddev_mult * stddev,
                    middle,
                    lower: middle - stddev_mult * stddev,
                    stddev,
                }
            }
            None => IndicatorValue::Bollinger {
                upper: 0.0,
                middle: 0.0,
                lower: 0.0,
                stddev: 0.0,
            },
        };

        values.push(IndicatorPoint {
            date: bars[i].date,
            valid: window.is_some(),
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::bollinger(period, stddev_mult),
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
    fn bollinger_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_bollinger(&bars, 3, 2.0);

        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[3].valid);
        assert!(series.values[4].valid);
    }

    #[test]
    fn bollinger_constant_values() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let series = calculate_bollinger(&bars, 3, 2.0);

        let (upper, middle, lower, stddev) = series.values[2].bands().unwrap();
        assert_eq!(stddev, 0.0);
        assert_eq!(middle, 100.0);
        assert_eq!(upper, 100.0);
        assert_eq!(lower, 100.0);
    }

    #[test]
    fn bollinger_basic_calculation() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 3, 2.0);

        let (upper, middle, lower, stddev) = series.values[2].bands().unwrap();
        // sample variance (100 + 0 + 100) / 2 = 100
        assert_relative_eq!(middle, 20.0, epsilon = 1e-10);
        assert_relative_eq!(stddev, 10.0, epsilon = 1e-10);
        assert_relative_eq!(upper, 40.0, epsilon = 1e-10);
        assert_relative_eq!(lower, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn bollinger_multiplier_variations() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 3, 1.5);

        let (upper, middle, lower, _) = series.values[2].bands().unwrap();
        assert_relative_eq!(middle, 20.0, epsilon = 1e-10);
        assert_relative_eq!(upper, 35.0, epsilon = 1e-10);
        assert_relative_eq!(lower, 5.0, epsilon = 1e-10);
    }

    #[test]
    fn bollinger_indicator_type() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 20, 2.0);

        assert_eq!(
            series.indicator_type,
            IndicatorType::Bollinger {
                period: 20,
                stddev_mult_x100: 200
            }
        );
        assert_eq!(series.valid_count(), 0);
    }

    #[test]
    fn bollinger_symmetry() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 25.0, 12.0]);
        let series = calculate_bollinger(&bars, 3, 2.0);

        for point in series.values.iter().skip(2) {
            let (upper, middle, lower, _) = point.bands().unwrap();
            assert_relative_eq!(upper - middle, middle - lower, epsilon = 1e-10);
        }
    }

    #[test]
    fn bollinger_period_one_is_undefined() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 1, 2.0);
        assert_eq!(series.valid_count(), 0);
        assert_eq!(series.values.len(), 3);
    }

    #[test]
    fn bollinger_multiplier_is_not_rounded() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);

        let (upper, middle, lower, _) = calculate_bollinger(&bars, 3, 1.234).values[2]
            .bands()
            .unwrap();
        assert_relative_eq!(middle, 20.0, epsilon = 1e-10);
        assert_relative_eq!(upper, 32.34, epsilon = 1e-10);
        assert_relative_eq!(lower, 7.66, epsilon = 1e-10);

        let (upper, _, lower, _) = calculate_bollinger(&bars, 3, 0.004).values[2]
            .bands()
            .unwrap();
        assert_relative_eq!(upper, 20.04, epsilon = 1e-10);
        assert_relative_eq!(lower, 19.96, epsilon = 1e-10);
    }

    #[test]
    fn bollinger_long_series_dates() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + (i % 7) as f64).collect();
        let bars = make_bars(&prices);
        let series = calculate_bollinger(&bars, 20, 2.0);

        assert_eq!(series.values.len(), 60);
        assert_eq!(series.valid_count(), 41);
        assert_eq!(
            series.values[59].date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
