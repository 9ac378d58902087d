//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::analysis::{analyze, AnalysisConfig, AnalysisReport, DisplayWindow};
use crate::domain::config_validation::{
    check_principal, parse_date, parse_double, parse_usize, read_display_window,
    validate_analysis_config, DEFAULT_PRINCIPAL,
};
use crate::domain::error::AnalyzerError;
use crate::domain::investment_style::{parse_styles, InvestmentStyle};
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::{BollingerParams, SmaCrossoverParams, Strategy, StrategyKind};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "stratlab",
    about = "Technical strategy signals and investment growth simulation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an analysis
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        /// Price file, overriding [data] in the config
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        principal: Option<f64>,
        /// First displayed date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Last displayed date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the date range of a price file, or of every file in a directory
    Info {
        #[arg(long, conflicts_with = "dir", required_unless_present = "dir")]
        csv: Option<PathBuf>,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOverrides {
    pub strategy: Option<String>,
    pub principal: Option<f64>,
    pub start: Option<String>,
    pub end: Option<String>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            csv,
            strategy,
            principal,
            start,
            end,
            output,
        } => {
            let overrides = AnalysisOverrides {
                strategy,
                principal,
                start,
                end,
            };
            run_analyze(&config, csv.as_deref(), &overrides, output.as_deref())
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info { csv, dir } => run_info(csv.as_deref(), dir.as_deref()),
    }
}

fn fail(err: &AnalyzerError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| fail(&e))
}

fn run_analyze(
    config_path: &Path,
    csv_override: Option<&Path>,
    overrides: &AnalysisOverrides,
    output_override: Option<&Path>,
) -> ExitCode {
    // Stage 1: Load and validate config
    tracing::info!(path = %config_path.display(), "loading config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Build the run configuration, applying command-line overrides
    let config = match build_analysis_config(&adapter)
        .and_then(|c| apply_overrides(c, overrides))
    {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    // Stage 3: Load prices
    let base_dir = config_dir(config_path);
    let series = match load_series(csv_override, &adapter, base_dir) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let (first, last, count) = series.date_range();
    tracing::info!(bars = count, %first, %last, "price series loaded");

    // Stage 4: Indicators, signals, growth
    let report = match analyze(&series, &config) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    // Stage 5: Console summary
    let stdout = io::stdout();
    if let Err(e) = write_summary(&mut stdout.lock(), &report, &config) {
        return fail(&AnalyzerError::from(e));
    }

    // Stage 6: Optional annotated export
    let output = output_override
        .map(Path::to_path_buf)
        .or_else(|| {
            adapter
                .get_trimmed("report", "output")
                .map(|p| base_dir.join(p))
        });
    if let Some(path) = output {
        if let Err(e) = CsvReportAdapter::new().write(&report, config.display_window, &path) {
            return fail(&e);
        }
    }

    ExitCode::SUCCESS
}

pub fn build_analysis_config(adapter: &dyn ConfigPort) -> Result<AnalysisConfig, AnalyzerError> {
    validate_analysis_config(adapter)?;

    let kind = match adapter.get_trimmed("analysis", "strategy") {
        Some(name) => name.parse::<StrategyKind>()?,
        None => StrategyKind::BollingerBands,
    };

    let strategy = Strategy {
        kind,
        bollinger: BollingerParams {
            period: parse_usize(adapter, "bollinger", "period", 20)?,
            stddev_mult: parse_double(adapter, "bollinger", "stddev_mult", 2.0)?,
        },
        crossover: SmaCrossoverParams {
            short_window: parse_usize(adapter, "sma_crossover", "short_window", 50)?,
            long_window: parse_usize(adapter, "sma_crossover", "long_window", 200)?,
        },
    };

    let styles = adapter
        .get_trimmed("analysis", "styles")
        .map(|list| parse_styles(&list))
        .filter(|styles| !styles.is_empty())
        .unwrap_or_else(|| InvestmentStyle::STANDARD.to_vec());

    let selected_style = adapter
        .get_trimmed("analysis", "style")
        .map(|name| InvestmentStyle::from_name(&name))
        .unwrap_or(InvestmentStyle::Moderate);

    Ok(AnalysisConfig {
        strategy,
        styles,
        selected_style,
        principal: parse_double(adapter, "analysis", "principal", DEFAULT_PRINCIPAL)?,
        display_window: read_display_window(adapter)?,
    })
}

pub fn apply_overrides(
    mut config: AnalysisConfig,
    overrides: &AnalysisOverrides,
) -> Result<AnalysisConfig, AnalyzerError> {
    if let Some(name) = &overrides.strategy {
        config.strategy.kind = name.parse()?;
    }
    if let Some(principal) = overrides.principal {
        check_principal(principal)?;
        config.principal = principal;
    }
    config.display_window = resolve_window(
        config.display_window,
        overrides.start.as_deref(),
        overrides.end.as_deref(),
    )?;
    Ok(config)
}

/// Combine command-line bounds with the configured window. A single bound
/// borrows the other side from the config.
pub fn resolve_window(
    configured: Option<DisplayWindow>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<DisplayWindow>, AnalyzerError> {
    let start: Option<NaiveDate> = start
        .map(|s| parse_date(s, "analysis", "display_start"))
        .transpose()?;
    let end: Option<NaiveDate> = end
        .map(|s| parse_date(s, "analysis", "display_end"))
        .transpose()?;

    let start = start.or(configured.map(|w| w.start()));
    let end = end.or(configured.map(|w| w.end()));

    match (start, end) {
        (None, None) => Ok(None),
        (Some(s), Some(e)) => DisplayWindow::new(s, e).map(Some),
        (Some(_), None) => Err(AnalyzerError::ConfigMissing {
            section: "analysis".into(),
            key: "display_end".into(),
        }),
        (None, Some(_)) => Err(AnalyzerError::ConfigMissing {
            section: "analysis".into(),
            key: "display_start".into(),
        }),
    }
}

/// Directory that relative paths in a config file are resolved against.
pub fn config_dir(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or(Path::new(""))
}

/// Resolve the price source: explicit file, `[data] csv`, or `[data] dir` + `symbol`.
/// Relative config paths are taken from `base_dir`; the override is used as given.
pub fn load_series(
    csv_override: Option<&Path>,
    adapter: &dyn ConfigPort,
    base_dir: &Path,
) -> Result<PriceSeries, AnalyzerError> {
    if let Some(path) = csv_override {
        return CsvAdapter::read_file(path);
    }
    if let Some(path) = adapter.get_trimmed("data", "csv") {
        return CsvAdapter::read_file(&base_dir.join(path));
    }
    match (
        adapter.get_trimmed("data", "dir"),
        adapter.get_trimmed("data", "symbol"),
    ) {
        (Some(dir), Some(symbol)) => {
            let port = CsvAdapter::new(base_dir.join(dir));
            fetch_from(&port, &symbol)
        }
        _ => Err(AnalyzerError::ConfigMissing {
            section: "data".into(),
            key: "csv".into(),
        }),
    }
}

pub fn fetch_from(port: &dyn DataPort, symbol: &str) -> Result<PriceSeries, AnalyzerError> {
    tracing::info!(symbol, "fetching price series");
    port.fetch_series(symbol)
}

pub fn write_summary<W: Write>(
    out: &mut W,
    report: &AnalysisReport<'_>,
    config: &AnalysisConfig,
) -> io::Result<()> {
    let (first, last, count) = report.series.date_range();
    writeln!(out, "=== {} ===", report.strategy.kind)?;
    writeln!(out, "Bars:             {} ({} to {})", count, first, last)?;

    let signals = report.signal_summary();
    writeln!(
        out,
        "Signals:          {} buy, {} sell, {} hold",
        signals.buys, signals.sells, signals.holds
    )?;
    if let Some(latest) = report.signals.last() {
        writeln!(out, "Latest signal:    {} on {}", latest.signal, latest.date)?;
    }
    if let Some(window) = config.display_window {
        writeln!(
            out,
            "Display window:   {} to {} ({} bars)",
            window.start(),
            window.end(),
            report.rows(Some(window)).len()
        )?;
    }
    for warning in &report.warnings {
        writeln!(out, "Warning:          {}", warning)?;
    }

    writeln!(out, "\n=== Investment Growth (principal {:.2}) ===", config.principal)?;
    for result in &report.growth {
        let marker = if result.summary.style == config.selected_style {
            "*"
        } else {
            " "
        };
        writeln!(out, "{} {}", marker, result.summary)?;
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let config = match build_analysis_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    eprintln!("\nStrategy:  {}", config.strategy.kind);
    match config.strategy.kind {
        StrategyKind::BollingerBands => eprintln!(
            "  period {}, multiplier {}",
            config.strategy.bollinger.period, config.strategy.bollinger.stddev_mult
        ),
        StrategyKind::SmaCrossover => eprintln!(
            "  short window {}, long window {}",
            config.strategy.crossover.short_window, config.strategy.crossover.long_window
        ),
    }
    let names: Vec<String> = config.styles.iter().map(|s| s.to_string()).collect();
    eprintln!("Styles:    {}", names.join(", "));
    for style in config.styles.iter().filter(|s| !s.is_recognized()) {
        eprintln!("  note: '{}' is not a known style and uses multiplier 1.0", style);
    }
    eprintln!("Principal: {:.2}", config.principal);
    if let Some(w) = config.display_window {
        eprintln!("Display:   {} to {}", w.start(), w.end());
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

/// One line per available symbol with its bar count and date range.
pub fn write_symbol_listing<W: Write>(
    out: &mut W,
    port: &dyn DataPort,
) -> Result<usize, AnalyzerError> {
    let symbols = port.list_symbols()?;
    for symbol in &symbols {
        let (first, last, count) = port.fetch_series(symbol)?.date_range();
        writeln!(out, "{}: {} bars, {} to {}", symbol, count, first, last)?;
    }
    Ok(symbols.len())
}

fn run_info(csv_path: Option<&Path>, dir: Option<&Path>) -> ExitCode {
    if let Some(dir) = dir {
        let stdout = io::stdout();
        return match write_symbol_listing(&mut stdout.lock(), &CsvAdapter::new(dir.to_path_buf()))
        {
            Ok(0) => {
                eprintln!("No price files in {}", dir.display());
                ExitCode::SUCCESS
            }
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => fail(&e),
        };
    }

    let Some(csv_path) = csv_path else {
        return fail(&AnalyzerError::invalid_input("info needs --csv or --dir"));
    };
    match CsvAdapter::read_file(csv_path) {
        Ok(series) => {
            let (first, last, count) = series.date_range();
            println!(
                "{}: {} bars, {} to {}",
                csv_path.display(),
                count,
                first,
                last
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}
