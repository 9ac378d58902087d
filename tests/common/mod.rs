#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use stratlab::domain::analysis::AnalysisConfig;
use stratlab::domain::error::AnalyzerError;
pub use stratlab::domain::ohlcv::OhlcvBar;
use stratlab::domain::investment_style::InvestmentStyle;
use stratlab::domain::price_series::PriceSeries;
use stratlab::domain::strategy::{Strategy, StrategyKind};
use stratlab::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, AnalyzerError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(AnalyzerError::DataSource {
                reason: reason.clone(),
            });
        }
        PriceSeries::new(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, AnalyzerError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(date: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: Some(1000.0),
    }
}

/// `count` consecutive daily bars rising by 1.0 from `start_price`.
pub fn generate_bars(start_date: &str, count: usize, start_price: f64) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| OhlcvBar {
            date: start + chrono::Duration::days(i as i64),
            open: start_price + i as f64,
            high: start_price + i as f64 + 1.0,
            low: start_price + i as f64 - 1.0,
            close: start_price + i as f64,
            volume: Some(1000.0),
        })
        .collect()
}

pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes(date(2024, 1, 1), closes).unwrap()
}

pub fn sample_config(kind: StrategyKind) -> AnalysisConfig {
    AnalysisConfig {
        strategy: Strategy::new(kind),
        styles: InvestmentStyle::STANDARD.to_vec(),
        selected_style: InvestmentStyle::Moderate,
        principal: 10_000.0,
        display_window: None,
    }
}

pub const PRICES_CSV: &str = "Date,Open,High,Low,Close,Volume\n\
2024-01-01,99,101,98,100,1000\n\
2024-01-02,109,111,108,110,1200\n\
2024-01-03,120,122,119,121,900\n";
