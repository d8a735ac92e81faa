//! Seeded synthetic beam-spot scans.
//!
//! A synthetic scan is a white (undosed) film with a dark Gaussian spot:
//!
//! ```text
//! brightness(x, y) = 255 - A exp(-r^2 / 2 sigma^2) + grain
//! ```
//!
//! Generation is deterministic for a given spec and seed, so demo output and
//! tests are reproducible run to run.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::domain::Point;
use crate::scan::{SampleGrid, MAX_BRIGHTNESS};

/// Parameters of one synthetic beam spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotSpec {
    pub width: usize,
    pub height: usize,
    /// Spot center in pixel coordinates (sub-pixel positions allowed).
    pub center: Point,
    /// Beam width in pixels.
    pub sigma_px: f64,
    /// Peak darkening in brightness units, at most 255.
    pub amplitude: f64,
    /// Film-grain standard deviation in brightness units; 0 disables noise.
    pub noise: f64,
}

/// Render a Gaussian beam spot onto a fresh scan.
///
/// A non-positive `sigma_px` produces a blank (pure white) film rather than
/// a division by zero; the analysis pipeline treats such a scan as signal-free.
pub fn gaussian_spot(spec: &SpotSpec, seed: u64) -> SampleGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let grain = if spec.noise > 0.0 {
        Normal::new(0.0, spec.noise).ok()
    } else {
        None
    };

    let mut data = Vec::with_capacity(spec.width * spec.height);
    let two_sigma_sq = 2.0 * spec.sigma_px * spec.sigma_px;

    for y in 0..spec.height {
        for x in 0..spec.width {
            let dose = if spec.sigma_px > 0.0 {
                let dx = x as f64 - spec.center.x;
                let dy = y as f64 - spec.center.y;
                spec.amplitude * (-(dx * dx + dy * dy) / two_sigma_sq).exp()
            } else {
                0.0
            };
            let noise = grain.as_ref().map_or(0.0, |n| n.sample(&mut rng));
            let b = (MAX_BRIGHTNESS - dose + noise).clamp(0.0, MAX_BRIGHTNESS);
            data.push(b);
        }
    }

    SampleGrid::from_brightness(spec.width, spec.height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered_spec(sigma_px: f64, noise: f64) -> SpotSpec {
        SpotSpec {
            width: 64,
            height: 64,
            center: Point { x: 32.0, y: 32.0 },
            sigma_px,
            amplitude: 200.0,
            noise,
        }
    }

    #[test]
    fn spot_is_darkest_at_the_center() {
        let grid = gaussian_spot(&centered_spec(5.0, 0.0), 1);
        let center = grid.brightness(32, 32);
        let edge = grid.brightness(0, 0);
        assert!(center < 60.0, "center brightness {center}");
        assert!((edge - MAX_BRIGHTNESS).abs() < 1e-9, "edge brightness {edge}");
    }

    #[test]
    fn same_seed_same_scan() {
        let spec = centered_spec(5.0, 3.0);
        assert_eq!(gaussian_spot(&spec, 7), gaussian_spot(&spec, 7));
    }

    #[test]
    fn different_seed_different_grain() {
        let spec = centered_spec(5.0, 3.0);
        assert_ne!(gaussian_spot(&spec, 7), gaussian_spot(&spec, 8));
    }

    #[test]
    fn zero_sigma_renders_blank_film() {
        let grid = gaussian_spot(&centered_spec(0.0, 0.0), 1);
        for y in 0..64 {
            for x in 0..64 {
                assert!((grid.brightness(x, y) - MAX_BRIGHTNESS).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn brightness_stays_in_range_under_noise() {
        let mut spec = centered_spec(3.0, 40.0);
        spec.amplitude = 255.0;
        let grid = gaussian_spot(&spec, 21);
        for y in 0..64 {
            for x in 0..64 {
                let b = grid.brightness(x, y);
                assert!((0.0..=MAX_BRIGHTNESS).contains(&b));
            }
        }
    }
}
