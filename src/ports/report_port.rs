//! Report output port trait.

use crate::domain::analysis::{AnalysisReport, DisplayWindow};
use crate::domain::error::AnalyzerError;
use std::path::Path;

/// Port for writing analysis output.
pub trait ReportPort {
    fn write(
        &self,
        report: &AnalysisReport<'_>,
        window: Option<DisplayWindow>,
        output_path: &Path,
    ) -> Result<(), AnalyzerError>;
}
