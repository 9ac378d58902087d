//! Property tests over randomly generated price series.

mod common;

use common::*;
use proptest::prelude::*;
use stratlab::domain::growth::simulate;
use stratlab::domain::indicator_set::{compute_bollinger, compute_sma_crossover, IndicatorSet};
use stratlab::domain::investment_style::InvestmentStyle;
use stratlab::domain::signal::{derive_signals, Signal};
use stratlab::domain::strategy::{BollingerParams, SmaCrossoverParams, StrategyKind};

fn closes_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1_000.0, min..max)
}

proptest! {
    #[test]
    fn upper_band_never_below_lower(
        closes in closes_strategy(2, 80),
        period in 2usize..30,
        mult in 0.001f64..4.0,
    ) {
        let series = series_from_closes(&closes);
        let set = compute_bollinger(&series, BollingerParams { period, stddev_mult: mult });
        let IndicatorSet::Bollinger { bands, .. } = &set else {
            panic!("expected Bollinger set");
        };
        for (i, point) in bands.values.iter().enumerate() {
            prop_assert_eq!(point.valid, i + 1 >= period);
            if let Some((upper, middle, lower, stddev)) = point.bands() {
                prop_assert!(stddev >= 0.0);
                prop_assert!(upper >= middle && middle >= lower);
                prop_assert_eq!(upper, middle + mult * stddev);
                prop_assert_eq!(lower, middle - mult * stddev);
            }
        }
    }

    #[test]
    fn crossover_signal_follows_average_levels(
        closes in closes_strategy(1, 60),
        short in 1usize..10,
        extra in 1usize..10,
    ) {
        let series = series_from_closes(&closes);
        let params = SmaCrossoverParams { short_window: short, long_window: short + extra };
        let set = compute_sma_crossover(&series, params);
        let signals = derive_signals(&series, &set, StrategyKind::SmaCrossover).unwrap();
        let IndicatorSet::SmaCrossover { short: s, long: l, .. } = &set else {
            panic!("expected crossover set");
        };

        for (i, point) in signals.iter().enumerate() {
            let expected = match (s.values[i].simple(), l.values[i].simple()) {
                (Some(a), Some(b)) if a > b => Signal::Buy,
                (Some(a), Some(b)) if a < b => Signal::Sell,
                _ => Signal::Hold,
            };
            prop_assert_eq!(point.signal, expected);
        }
    }

    #[test]
    fn derivation_is_deterministic(closes in closes_strategy(1, 50)) {
        let series = series_from_closes(&closes);
        let params = BollingerParams { period: 5, stddev_mult: 2.0 };
        let a = compute_bollinger(&series, params);
        let b = compute_bollinger(&series, params);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(
            derive_signals(&series, &a, StrategyKind::BollingerBands).unwrap(),
            derive_signals(&series, &b, StrategyKind::BollingerBands).unwrap()
        );
    }

    #[test]
    fn growth_scales_with_principal_and_multiplier(
        closes in closes_strategy(2, 40),
        principal in 1_000.0f64..1_000_000.0,
    ) {
        let series = series_from_closes(&closes);
        let aggressive = simulate(&series, principal, &InvestmentStyle::Aggressive).unwrap();
        let moderate = simulate(&series, principal, &InvestmentStyle::Moderate).unwrap();
        let passive = simulate(&series, principal, &InvestmentStyle::Passive).unwrap();

        prop_assert!(aggressive.summary.final_growth > moderate.summary.final_growth);
        prop_assert!(moderate.summary.final_growth > passive.summary.final_growth);

        let ratio = closes[closes.len() - 1] / closes[0];
        let expected = ratio * principal;
        prop_assert!((moderate.summary.final_growth - expected).abs() <= expected * 1e-9);

        let roi = (moderate.summary.final_growth - principal) / principal * 100.0;
        prop_assert!((moderate.summary.roi_pct - roi).abs() < 1e-9);
    }

    #[test]
    fn growth_trajectory_tracks_closes(closes in closes_strategy(2, 40)) {
        let series = series_from_closes(&closes);
        let result = simulate(&series, 10_000.0, &InvestmentStyle::Moderate).unwrap();
        prop_assert_eq!(result.trajectory.points.len(), closes.len());
        for pair in closes.windows(2).zip(result.trajectory.points.windows(2)) {
            let (c, g) = pair;
            if c[1] > c[0] {
                prop_assert!(g[1].value >= g[0].value);
            } else if c[1] < c[0] {
                prop_assert!(g[1].value <= g[0].value);
            }
        }
    }
}
