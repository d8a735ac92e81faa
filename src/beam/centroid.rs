//! Intensity-weighted beam centroid.
//!
//! The centroid is a first-moment estimate over inverted brightness: the film
//! darkens with absorbed dose, so darkness is the "mass". A hard noise floor
//! keeps the faint scanner background from dragging the centroid toward the
//! image center when the spot sits off-center.

use crate::domain::Point;
use crate::scan::SampleGrid;

/// Samples with inverted brightness at or below this value are treated as
/// background and excluded from the weighted sums entirely.
pub const NOISE_FLOOR: f64 = 20.0;

/// Intensity-weighted center of mass of a scan, in pixel coordinates.
///
/// A scan with no sample above the noise floor (blank film, saturated white
/// scan) has zero total mass; the geometric center of the grid is returned as
/// a plausible fallback instead of dividing by zero. No error is raised for
/// degenerate scans.
pub fn weighted_centroid(grid: &SampleGrid) -> Point {
    let mut mass = 0.0;
    let mut mx = 0.0;
    let mut my = 0.0;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let i = grid.intensity(x, y);
            if i <= NOISE_FLOOR {
                continue;
            }
            mass += i;
            mx += x as f64 * i;
            my += y as f64 * i;
        }
    }

    if mass <= 0.0 {
        return grid.geometric_center();
    }

    Point {
        x: mx / mass,
        y: my / mass,
    }
}
