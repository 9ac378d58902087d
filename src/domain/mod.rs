//! Core domain types and logic.

pub mod ohlcv;
pub mod price_series;
pub mod indicator;
pub mod indicator_set;
pub mod signal;
pub mod strategy;
pub mod investment_style;
pub mod growth;
pub mod analysis;
pub mod config_validation;
pub mod error;
