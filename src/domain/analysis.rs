//! Analysis run: indicators → signals → growth over one price series.
//!
//! `AnalysisRun` moves through `Uninitialized`, `IndicatorsComputed` and
//! `SignalsComputed`. Each step recomputes from the run's own strategy, so
//! signals can never be derived from another strategy's indicators.

use crate::domain::error::AnalyzerError;
use crate::domain::growth::{simulate_styles, GrowthResult};
use crate::domain::indicator_set::{compute_indicators, IndicatorSet};
use crate::domain::investment_style::InvestmentStyle;
use crate::domain::price_series::PriceSeries;
use crate::domain::signal::{derive_signals, Signal, SignalPoint, SignalSummary};
use crate::domain::strategy::Strategy;
use chrono::NaiveDate;

/// Inclusive date range limiting which rows are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DisplayWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyzerError> {
        if end < start {
            return Err(AnalyzerError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub strategy: Strategy,
    pub styles: Vec<InvestmentStyle>,
    pub selected_style: InvestmentStyle,
    pub principal: f64,
    pub display_window: Option<DisplayWindow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    Uninitialized,
    IndicatorsComputed(IndicatorSet),
    SignalsComputed(IndicatorSet, Vec<SignalPoint>),
}

#[derive(Debug)]
pub struct AnalysisRun<'a> {
    series: &'a PriceSeries,
    strategy: Strategy,
    state: RunState,
    warnings: Vec<AnalyzerError>,
}

impl<'a> AnalysisRun<'a> {
    pub fn new(series: &'a PriceSeries, strategy: Strategy) -> Self {
        Self {
            series,
            strategy,
            state: RunState::Uninitialized,
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn warnings(&self) -> &[AnalyzerError] {
        &self.warnings
    }

    /// Compute the indicator set for this run's strategy. A series shorter
    /// than the longest window still succeeds with a sparse set and records
    /// an `InsufficientData` warning.
    pub fn compute_indicators(&mut self) -> Result<(), AnalyzerError> {
        let indicators = compute_indicators(self.series, &self.strategy);

        let required = indicators.required_bars();
        if self.series.len() < required {
            tracing::warn!(
                strategy = %self.strategy.kind,
                bars = self.series.len(),
                required,
                "series shorter than indicator window; results are sparse"
            );
            self.warnings.push(AnalyzerError::InsufficientData {
                required,
                available: self.series.len(),
            });
        }

        tracing::debug!(strategy = %self.strategy.kind, bars = indicators.len(), "indicators computed");
        self.state = RunState::IndicatorsComputed(indicators);
        Ok(())
    }

    pub fn derive_signals(&mut self) -> Result<(), AnalyzerError> {
        let state = std::mem::replace(&mut self.state, RunState::Uninitialized);
        let indicators = match state {
            RunState::IndicatorsComputed(indicators) => indicators,
            other => {
                self.state = other;
                return Err(AnalyzerError::invalid_input(
                    "signals require freshly computed indicators",
                ));
            }
        };

        let signals = match derive_signals(self.series, &indicators, self.strategy.kind) {
            Ok(s) => s,
            Err(e) => {
                self.state = RunState::IndicatorsComputed(indicators);
                return Err(e);
            }
        };
        let summary = SignalSummary::from_signals(&signals);
        tracing::debug!(
            buys = summary.buys,
            sells = summary.sells,
            holds = summary.holds,
            "signals derived"
        );

        self.state = RunState::SignalsComputed(indicators, signals);
        Ok(())
    }

    /// Simulate growth for each style over the full series and finish the run.
    pub fn simulate(
        self,
        principal: f64,
        styles: &[InvestmentStyle],
    ) -> Result<AnalysisReport<'a>, AnalyzerError> {
        let (indicators, signals) = match self.state {
            RunState::SignalsComputed(indicators, signals) => (indicators, signals),
            _ => {
                return Err(AnalyzerError::invalid_input(
                    "growth simulation requires derived signals",
                ));
            }
        };

        let growth = simulate_styles(self.series, principal, styles)?;

        Ok(AnalysisReport {
            series: self.series,
            strategy: self.strategy,
            indicators,
            signals,
            growth,
            warnings: self.warnings,
        })
    }
}

/// Run the full pipeline for one configuration.
pub fn analyze<'a>(
    series: &'a PriceSeries,
    config: &AnalysisConfig,
) -> Result<AnalysisReport<'a>, AnalyzerError> {
    tracing::info!(
        strategy = %config.strategy.kind,
        bars = series.len(),
        principal = config.principal,
        "starting analysis run"
    );
    let mut run = AnalysisRun::new(series, config.strategy.clone());
    run.compute_indicators()?;
    run.derive_signals()?;
    run.simulate(config.principal, &config.styles)
}

/// One presented row: a bar joined with everything derived for it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub indicators: Vec<Option<f64>>,
    pub signal: Signal,
    pub growth: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport<'a> {
    pub series: &'a PriceSeries,
    pub strategy: Strategy,
    pub indicators: IndicatorSet,
    pub signals: Vec<SignalPoint>,
    pub growth: Vec<GrowthResult>,
    pub warnings: Vec<AnalyzerError>,
}

impl AnalysisReport<'_> {
    pub fn signal_summary(&self) -> SignalSummary {
        SignalSummary::from_signals(&self.signals)
    }

    pub fn growth_for(&self, style: &InvestmentStyle) -> Option<&GrowthResult> {
        self.growth.iter().find(|g| &g.trajectory.style == style)
    }

    /// Header names matching `rows` cell order.
    pub fn column_names(&self) -> Vec<String> {
        let mut cols: Vec<String> = ["Date", "Open", "High", "Low", "Close"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        cols.extend(self.indicators.column_names());
        cols.push("Signal".to_string());
        cols.extend(
            self.growth
                .iter()
                .map(|g| format!("{} Growth", g.trajectory.style)),
        );
        cols
    }

    /// Annotated rows, optionally limited to a display window. Filtering
    /// never alters the growth values, which span the full series.
    pub fn rows(&self, window: Option<DisplayWindow>) -> Vec<AnnotatedRow> {
        self.series
            .bars()
            .iter()
            .enumerate()
            .filter(|(_, bar)| window.is_none_or(|w| w.contains(bar.date)))
            .map(|(i, bar)| AnnotatedRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                indicators: self.indicators.columns_at(i),
                signal: self.signals[i].signal,
                growth: self
                    .growth
                    .iter()
                    .map(|g| g.trajectory.points[i].value)
                    .collect(),
            })
            .collect()
    }
}
