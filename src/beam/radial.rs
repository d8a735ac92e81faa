//! Radial intensity profile.
//!
//! Collapses the 2D scan into a 1D `radius -> average intensity` curve around
//! the beam centroid. Bins are one raw pixel wide; averaging (rather than
//! summing) per bin normalizes for the growing number of pixels at larger
//! radii. The physical scale is applied to the bin index after binning.

use crate::domain::{Point, RadialPoint};
use crate::scan::SampleGrid;

/// Bin pixels by distance from `centroid` into an ordered radial profile.
///
/// No noise floor here: the fitter's intensity window does its own tail
/// rejection, and thresholding twice would bias the bin averages.
///
/// The bin array spans distances up to the half-diagonal
/// `sqrt(width^2 + height^2) / 2`; with an off-center centroid a few corner
/// pixels can lie beyond that and are skipped, which keeps every emitted
/// radius within the documented bound. Empty bins are skipped, not
/// zero-filled, so radii are strictly increasing but not contiguous.
pub fn radial_profile(
    grid: &SampleGrid,
    centroid: Point,
    scale_mm_per_px: f64,
) -> Vec<RadialPoint> {
    let w = grid.width();
    let h = grid.height();
    let max_radius = ((w * w + h * h) as f64).sqrt() / 2.0;
    let bin_count = max_radius.ceil() as usize;
    if bin_count == 0 {
        return Vec::new();
    }

    let mut sums = vec![0.0_f64; bin_count];
    let mut counts = vec![0_u32; bin_count];

    for y in 0..h {
        for x in 0..w {
            let dx = x as f64 - centroid.x;
            let dy = y as f64 - centroid.y;
            let r = (dx * dx + dy * dy).sqrt();
            let bin = r.floor() as usize;
            if bin >= bin_count {
                continue;
            }
            sums[bin] += grid.intensity(x, y);
            counts[bin] += 1;
        }
    }

    let mut profile = Vec::new();
    for (bin, (&sum, &count)) in sums.iter().zip(counts.iter()).enumerate() {
        if count == 0 {
            continue;
        }
        profile.push(RadialPoint {
            radius_mm: bin as f64 * scale_mm_per_px,
            intensity: sum / count as f64,
            fit: None,
        });
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::MAX_BRIGHTNESS;

    fn grid_with_center_spot(size: usize) -> SampleGrid {
        let mut data = vec![MAX_BRIGHTNESS; size * size];
        let c = size / 2;
        data[c * size + c] = 0.0;
        SampleGrid::from_brightness(size, size, data)
    }

    #[test]
    fn radii_are_strictly_increasing_and_bounded() {
        let grid = grid_with_center_spot(31);
        let centroid = Point { x: 15.0, y: 15.0 };
        let scale = 0.2;
        let profile = radial_profile(&grid, centroid, scale);

        assert!(!profile.is_empty());
        for pair in profile.windows(2) {
            assert!(pair[0].radius_mm < pair[1].radius_mm);
        }
        let bound = scale * ((31.0_f64 * 31.0 * 2.0).sqrt() / 2.0);
        for p in &profile {
            assert!(p.radius_mm <= bound, "radius {} above {bound}", p.radius_mm);
        }
    }

    #[test]
    fn center_bin_holds_the_spot_intensity() {
        let grid = grid_with_center_spot(31);
        let profile = radial_profile(&grid, Point { x: 15.0, y: 15.0 }, 1.0);
        // Bin 0 contains exactly the centroid pixel.
        assert!((profile[0].radius_mm - 0.0).abs() < 1e-12);
        assert!((profile[0].intensity - MAX_BRIGHTNESS).abs() < 1e-12);
        // The next bin is background.
        assert!(profile[1].intensity < 1e-12);
    }

    #[test]
    fn bin_average_normalizes_pixel_counts() {
        // A ring of dark pixels at r ~ 2 from the centroid; the bin average
        // must equal the per-pixel intensity regardless of how many pixels
        // the ring holds.
        let size = 9;
        let mut data = vec![MAX_BRIGHTNESS; size * size];
        let c = 4_i32;
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                let dx = (x - c) as f64;
                let dy = (y - c) as f64;
                let r = (dx * dx + dy * dy).sqrt();
                if (2.0..3.0).contains(&r) {
                    data[(y as usize) * size + x as usize] = 55.0;
                }
            }
        }
        let grid = SampleGrid::from_brightness(size, size, data);
        let profile = radial_profile(&grid, Point { x: 4.0, y: 4.0 }, 1.0);
        let ring = profile
            .iter()
            .find(|p| (p.radius_mm - 2.0).abs() < 1e-12)
            .unwrap();
        assert!((ring.intensity - 200.0).abs() < 1e-12);
    }

    #[test]
    fn off_center_centroid_drops_far_corners() {
        // Centroid in the top-left corner: the far corner is farther than the
        // half-diagonal and must not appear in the profile.
        let grid = grid_with_center_spot(21);
        let scale = 1.0;
        let profile = radial_profile(&grid, Point { x: 0.0, y: 0.0 }, scale);
        let bound = (21.0_f64 * 21.0 * 2.0).sqrt() / 2.0;
        for p in &profile {
            assert!(p.radius_mm <= bound);
        }
    }

    #[test]
    fn scale_converts_bin_index_to_mm() {
        let grid = grid_with_center_spot(15);
        let profile = radial_profile(&grid, Point { x: 7.0, y: 7.0 }, 0.1693);
        for p in &profile {
            let bins = p.radius_mm / 0.1693;
            assert!((bins - bins.round()).abs() < 1e-9);
        }
    }
}
