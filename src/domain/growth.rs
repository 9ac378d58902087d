//! Investment growth simulation.
//!
//! Each bar's value is `(close / start_close) × principal × multiplier`, with
//! `start_close` the first close of the full series. Display windows never
//! change the start or end price; they only filter what is shown.

use crate::domain::error::AnalyzerError;
use crate::domain::investment_style::InvestmentStyle;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthTrajectory {
    pub style: InvestmentStyle,
    pub multiplier: f64,
    pub points: Vec<GrowthPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthSummary {
    pub style: InvestmentStyle,
    pub principal: f64,
    pub final_growth: f64,
    pub roi_pct: f64,
}

impl fmt::Display for GrowthSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Style Results: Final Value: {:.2}, ROI: {:.2}%",
            self.style, self.final_growth, self.roi_pct
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthResult {
    pub trajectory: GrowthTrajectory,
    pub summary: GrowthSummary,
}

pub fn simulate(
    series: &PriceSeries,
    principal: f64,
    style: &InvestmentStyle,
) -> Result<GrowthResult, AnalyzerError> {
    if series.len() < 2 {
        return Err(AnalyzerError::invalid_input(format!(
            "growth simulation needs at least 2 bars, got {}",
            series.len()
        )));
    }
    if !principal.is_finite() || principal <= 0.0 {
        return Err(AnalyzerError::invalid_input(format!(
            "principal must be a positive amount, got {}",
            principal
        )));
    }

    let start_close = series.first().close;
    let end_close = series.last().close;
    if start_close <= 0.0 {
        return Err(AnalyzerError::invalid_input(format!(
            "start close must be positive, got {}",
            start_close
        )));
    }

    let multiplier = style.multiplier();
    let points = series
        .bars()
        .iter()
        .map(|bar| GrowthPoint {
            date: bar.date,
            value: (bar.close / start_close) * principal * multiplier,
        })
        .collect();

    let final_growth = (end_close / start_close) * principal * multiplier;
    let roi_pct = (final_growth - principal) / principal * 100.0;

    tracing::debug!(
        style = %style,
        multiplier,
        final_growth,
        roi_pct,
        "simulated growth"
    );

    Ok(GrowthResult {
        trajectory: GrowthTrajectory {
            style: style.clone(),
            multiplier,
            points,
        },
        summary: GrowthSummary {
            style: style.clone(),
            principal,
            final_growth,
            roi_pct,
        },
    })
}

/// Simulate every style over the same series and principal.
pub fn simulate_styles(
    series: &PriceSeries,
    principal: f64,
    styles: &[InvestmentStyle],
) -> Result<Vec<GrowthResult>, AnalyzerError> {
    styles
        .iter()
        .map(|style| simulate(series, principal, style))
        .collect()
}
