//! Strategy selection and parameters.

use crate::domain::error::AnalyzerError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    BollingerBands,
    SmaCrossover,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::BollingerBands => write!(f, "Bollinger Bands"),
            StrategyKind::SmaCrossover => write!(f, "SMA Crossover"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = AnalyzerError;

    /// Accepts display names ("Bollinger Bands") as well as config-style
    /// identifiers ("bollinger", "sma_crossover"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "bollinger" | "bollingerbands" | "bb" => Ok(StrategyKind::BollingerBands),
            "sma" | "smacrossover" | "crossover" => Ok(StrategyKind::SmaCrossover),
            _ => Err(AnalyzerError::ConfigInvalid {
                section: "analysis".into(),
                key: "strategy".into(),
                reason: format!(
                    "unknown strategy '{}' (expected bollinger or sma_crossover)",
                    s.trim()
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerParams {
    pub period: usize,
    pub stddev_mult: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            stddev_mult: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmaCrossoverParams {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for SmaCrossoverParams {
    fn default() -> Self {
        Self {
            short_window: 50,
            long_window: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub kind: StrategyKind,
    pub bollinger: BollingerParams,
    pub crossover: SmaCrossoverParams,
}

impl Strategy {
    /// Strategy of the given kind with default parameters.
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            bollinger: BollingerParams::default(),
            crossover: SmaCrossoverParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_identifiers() {
        assert_eq!(
            "bollinger".parse::<StrategyKind>().unwrap(),
            StrategyKind::BollingerBands
        );
        assert_eq!(
            "sma_crossover".parse::<StrategyKind>().unwrap(),
            StrategyKind::SmaCrossover
        );
    }

    #[test]
    fn parses_display_names() {
        assert_eq!(
            "Bollinger Bands".parse::<StrategyKind>().unwrap(),
            StrategyKind::BollingerBands
        );
        assert_eq!(
            " SMA Crossover ".parse::<StrategyKind>().unwrap(),
            StrategyKind::SmaCrossover
        );
    }

    #[test]
    fn display_round_trips() {
        for kind in [StrategyKind::BollingerBands, StrategyKind::SmaCrossover] {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = "macd".parse::<StrategyKind>().unwrap_err();
        assert!(matches!(err, AnalyzerError::ConfigInvalid { key, .. } if key == "strategy"));
    }

    #[test]
    fn default_parameters() {
        let s = Strategy::new(StrategyKind::BollingerBands);
        assert_eq!(s.bollinger.period, 20);
        assert_eq!(s.bollinger.stddev_mult, 2.0);
        assert_eq!(s.crossover.short_window, 50);
        assert_eq!(s.crossover.long_window, 200);
    }
}
