//! Report generation port trait.

use crate::domain::error::TrackerError;
use crate::domain::summary::Summary;
use crate::domain::tracker::TrackerResult;

/// Port for writing tracker output (rendered reports or tabular exports).
pub trait ReportPort {
    fn write(
        &self,
        result: &TrackerResult,
        summary: &Summary,
        output_path: &str,
    ) -> Result<(), TrackerError>;
}
