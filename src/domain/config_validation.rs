//! Configuration validation.
//!
//! Validates all config fields before an analysis run.

use crate::domain::analysis::DisplayWindow;
use crate::domain::error::AnalyzerError;
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const MIN_PRINCIPAL: f64 = 1000.0;
pub const DEFAULT_PRINCIPAL: f64 = 10_000.0;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    validate_data_source(config)?;
    validate_strategy(config)?;
    validate_principal(config)?;
    validate_display_window(config)?;
    validate_bollinger(config)?;
    validate_sma_crossover(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> AnalyzerError {
    AnalyzerError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_data_source(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    if config.get_trimmed("data", "csv").is_some() {
        return Ok(());
    }
    match (
        config.get_trimmed("data", "dir"),
        config.get_trimmed("data", "symbol"),
    ) {
        (Some(_), Some(_)) => Ok(()),
        (Some(_), None) => Err(AnalyzerError::ConfigMissing {
            section: "data".to_string(),
            key: "symbol".to_string(),
        }),
        _ => Err(AnalyzerError::ConfigMissing {
            section: "data".to_string(),
            key: "csv".to_string(),
        }),
    }
}

fn validate_strategy(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    if let Some(name) = config.get_trimmed("analysis", "strategy") {
        name.parse::<StrategyKind>()?;
    }
    Ok(())
}

/// Read a float, distinguishing "absent" (default) from "present but not a number".
pub fn parse_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, AnalyzerError> {
    match config.get_trimmed(section, key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(section, key, format!("'{}' is not a number", raw))),
    }
}

/// Read a non-negative integer, distinguishing "absent" from "malformed".
pub fn parse_usize(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, AnalyzerError> {
    match config.get_trimmed(section, key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| invalid(section, key, format!("'{}' is not a whole number", raw))),
    }
}

fn validate_principal(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let value = parse_double(config, "analysis", "principal", DEFAULT_PRINCIPAL)?;
    check_principal(value)
}

pub fn check_principal(value: f64) -> Result<(), AnalyzerError> {
    if !value.is_finite() || value < MIN_PRINCIPAL {
        return Err(invalid(
            "analysis",
            "principal",
            format!("principal must be at least {}", MIN_PRINCIPAL),
        ));
    }
    Ok(())
}

pub fn parse_date(value: &str, section: &str, field: &str) -> Result<NaiveDate, AnalyzerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        invalid(
            section,
            field,
            format!("invalid {} format, expected YYYY-MM-DD", field),
        )
    })
}

/// Both bounds absent means "show everything"; one without the other is an error.
pub fn read_display_window(
    config: &dyn ConfigPort,
) -> Result<Option<DisplayWindow>, AnalyzerError> {
    let start = config.get_trimmed("analysis", "display_start");
    let end = config.get_trimmed("analysis", "display_end");

    match (start, end) {
        (None, None) => Ok(None),
        (Some(s), Some(e)) => {
            let start = parse_date(&s, "analysis", "display_start")?;
            let end = parse_date(&e, "analysis", "display_end")?;
            DisplayWindow::new(start, end).map(Some)
        }
        (Some(_), None) => Err(AnalyzerError::ConfigMissing {
            section: "analysis".to_string(),
            key: "display_end".to_string(),
        }),
        (None, Some(_)) => Err(AnalyzerError::ConfigMissing {
            section: "analysis".to_string(),
            key: "display_start".to_string(),
        }),
    }
}

fn validate_display_window(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    read_display_window(config).map(|_| ())
}

fn validate_bollinger(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let period = parse_usize(config, "bollinger", "period", 20)?;
    if period < 2 {
        return Err(invalid(
            "bollinger",
            "period",
            "period must be at least 2",
        ));
    }
    let mult = parse_double(config, "bollinger", "stddev_mult", 2.0)?;
    if mult <= 0.0 {
        return Err(invalid(
            "bollinger",
            "stddev_mult",
            "stddev_mult must be positive",
        ));
    }
    Ok(())
}

fn validate_sma_crossover(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let short = parse_usize(config, "sma_crossover", "short_window", 50)?;
    let long = parse_usize(config, "sma_crossover", "long_window", 200)?;
    if short == 0 {
        return Err(invalid(
            "sma_crossover",
            "short_window",
            "short_window must be at least 1",
        ));
    }
    if long <= short {
        return Err(invalid(
            "sma_crossover",
            "long_window",
            "long_window must be greater than short_window",
        ));
    }
    Ok(())
}
