//! Image decoding: file on disk -> `SampleGrid`.
//!
//! Decoding is the only external I/O in the analysis pipeline. A failure here
//! is surfaced to the caller as an `AppError`; the pipeline treats it as a
//! per-film warning (that film's sigma is simply absent) rather than aborting
//! the whole run.

use std::path::Path;

use crate::error::AppError;
use crate::scan::SampleGrid;

/// Decode a scan image into a brightness grid.
///
/// Color scans are averaged per pixel into grayscale brightness; grayscale
/// scans pass through unchanged.
pub fn load_sample_grid(path: &Path) -> Result<SampleGrid, AppError> {
    let img = image::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to decode '{}': {e}", path.display())))?;

    let grid = match img {
        image::DynamicImage::ImageLuma8(gray) => {
            let (w, h) = (gray.width() as usize, gray.height() as usize);
            SampleGrid::from_luma8(w, h, gray.as_raw())
        }
        other => {
            let rgb = other.into_rgb8();
            let (w, h) = (rgb.width() as usize, rgb.height() as usize);
            SampleGrid::from_rgb8(w, h, rgb.as_raw())
        }
    };

    Ok(grid)
}
