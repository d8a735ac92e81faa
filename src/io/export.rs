//! Export per-station analysis results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts; the aggregate numbers live in the report and the saved run, not
//! here.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::AnalysisSummary;
use crate::error::AppError;

/// Write per-station summaries to a CSV file.
pub fn write_summary_csv(path: &Path, summaries: &[AnalysisSummary]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "sample_id,distance_mm,sigma_air_mm,sigma_material_mm,sigma_corrected_mm,theta_rad,theoretical_sigma_mm"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for s in summaries {
        writeln!(
            file,
            "{},{:.4},{:.4},{:.4},{:.4},{:.6},{:.4}",
            s.sample_id,
            s.distance_mm,
            s.sigma_air_mm,
            s.sigma_material_mm,
            s.sigma_corrected_mm,
            s.theta_rad,
            s.theoretical_sigma_mm,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
