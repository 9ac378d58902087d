//! Investment styles and their growth multipliers.
//!
//! Unknown style names are not an error: they resolve to
//! `InvestmentStyle::Unrecognized`, whose multiplier is 1.0.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvestmentStyle {
    Aggressive,
    Moderate,
    Passive,
    /// Any other name; grows like `Moderate`.
    Unrecognized(String),
}

impl InvestmentStyle {
    /// The three recognized styles in display order.
    pub const STANDARD: [InvestmentStyle; 3] = [
        InvestmentStyle::Aggressive,
        InvestmentStyle::Moderate,
        InvestmentStyle::Passive,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "aggressive" => InvestmentStyle::Aggressive,
            "moderate" => InvestmentStyle::Moderate,
            "passive" => InvestmentStyle::Passive,
            _ => {
                tracing::warn!(style = name, "unrecognized investment style, using multiplier 1.0");
                InvestmentStyle::Unrecognized(name.trim().to_string())
            }
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            InvestmentStyle::Aggressive => 1.5,
            InvestmentStyle::Moderate => 1.0,
            InvestmentStyle::Passive => 0.75,
            InvestmentStyle::Unrecognized(_) => 1.0,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, InvestmentStyle::Unrecognized(_))
    }
}

impl fmt::Display for InvestmentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestmentStyle::Aggressive => write!(f, "Aggressive"),
            InvestmentStyle::Moderate => write!(f, "Moderate"),
            InvestmentStyle::Passive => write!(f, "Passive"),
            InvestmentStyle::Unrecognized(name) => write!(f, "{}", name),
        }
    }
}

/// Parse a comma-separated list of style names, skipping blanks.
pub fn parse_styles(list: &str) -> Vec<InvestmentStyle> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(InvestmentStyle::from_name)
        .collect()
}
