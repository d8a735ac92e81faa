//! Combine per-film widths into corrected sigmas, angles and the RMS angle.
//!
//! Everything here is a pure projection of the current film samples plus the
//! Highland angle: recompute on every input change, never mutate in place.

use crate::domain::{AnalysisSummary, FilmSample};

/// Material-induced beam width after quadrature subtraction of the air width.
///
/// When the material width does not exceed the air width (no measurable
/// scattering, or a noisy fit), the corrected width is 0 by definition, never
/// negative or NaN.
pub fn corrected_sigma(sigma_air_mm: f64, sigma_material_mm: f64) -> f64 {
    (sigma_material_mm * sigma_material_mm - sigma_air_mm * sigma_air_mm)
        .max(0.0)
        .sqrt()
}

/// Project each film sample into its derived record.
///
/// Missing sigmas are treated as 0 (an unanalyzed or failed film contributes
/// no width). A non-positive station distance defines that station's angle as
/// 0 instead of dividing by it.
pub fn summarize(films: &[FilmSample], theta_highland_rad: f64) -> Vec<AnalysisSummary> {
    films
        .iter()
        .map(|film| {
            let sigma_air = film.sigma_air_mm.unwrap_or(0.0);
            let sigma_material = film.sigma_material_mm.unwrap_or(0.0);
            let sigma_corrected = corrected_sigma(sigma_air, sigma_material);
            let theta = if film.distance_mm > 0.0 {
                sigma_corrected / film.distance_mm
            } else {
                0.0
            };
            AnalysisSummary {
                sample_id: film.id.clone(),
                distance_mm: film.distance_mm,
                sigma_air_mm: sigma_air,
                sigma_material_mm: sigma_material,
                sigma_corrected_mm: sigma_corrected,
                theta_rad: theta,
                theoretical_sigma_mm: theta_highland_rad * film.distance_mm,
            }
        })
        .collect()
}

/// RMS of the measured angles over stations with a strictly positive angle.
///
/// Stations with `theta = 0` (no corrected width, or a non-positive distance)
/// are excluded from the mean entirely rather than counted as zero
/// contributors. With no qualifying station the RMS is 0.
pub fn theta_rms(summaries: &[AnalysisSummary]) -> f64 {
    let thetas: Vec<f64> = summaries
        .iter()
        .map(|s| s.theta_rad)
        .filter(|&t| t > 0.0)
        .collect();
    if thetas.is_empty() {
        return 0.0;
    }
    let mean_sq = thetas.iter().map(|t| t * t).sum::<f64>() / thetas.len() as f64;
    mean_sq.sqrt()
}
