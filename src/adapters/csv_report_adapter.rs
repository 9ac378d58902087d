//! Annotated series export as CSV.
//!
//! One row per bar inside the display window: prices, indicator columns
//! (blank while undefined), the numeric signal, and each style's growth value.

use crate::domain::analysis::{AnalysisReport, AnnotatedRow, DisplayWindow};
use crate::domain::error::AnalyzerError;
use crate::ports::report_port::ReportPort;
use std::io::Write;
use std::path::Path;

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn record(row: &AnnotatedRow) -> Vec<String> {
        let mut record = vec![
            row.date.format("%Y-%m-%d").to_string(),
            row.open.to_string(),
            row.high.to_string(),
            row.low.to_string(),
            row.close.to_string(),
        ];
        record.extend(
            row.indicators
                .iter()
                .map(|v| v.map(|v| format!("{:.4}", v)).unwrap_or_default()),
        );
        record.push(row.signal.as_i8().to_string());
        record.extend(row.growth.iter().map(|v| format!("{:.2}", v)));
        record
    }

    /// Write the report to any writer; `write` wraps this with a file.
    pub fn write_to<W: Write>(
        &self,
        report: &AnalysisReport<'_>,
        window: Option<DisplayWindow>,
        writer: W,
    ) -> Result<usize, AnalyzerError> {
        let mut wtr = csv::Writer::from_writer(writer);
        let to_io = |e: csv::Error| AnalyzerError::Io {
            reason: format!("CSV write error: {}", e),
        };

        wtr.write_record(report.column_names()).map_err(to_io)?;
        let rows = report.rows(window);
        for row in &rows {
            wtr.write_record(Self::record(row)).map_err(to_io)?;
        }
        wtr.flush()?;
        Ok(rows.len())
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        report: &AnalysisReport<'_>,
        window: Option<DisplayWindow>,
        output_path: &Path,
    ) -> Result<(), AnalyzerError> {
        let file = std::fs::File::create(output_path).map_err(|e| AnalyzerError::Io {
            reason: format!("failed to create {}: {}", output_path.display(), e),
        })?;
        let written = self.write_to(report, window, file)?;
        tracing::info!(path = %output_path.display(), rows = written, "report written");
        Ok(())
    }
}
