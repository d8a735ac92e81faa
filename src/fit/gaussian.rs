//! Linearized Gaussian fit of a radial intensity profile.
//!
//! The on-axis dose profile follows `I(r) = A exp(-r^2 / 2 sigma^2)`. Taking
//! logarithms gives a straight line in `x = r^2`:
//!
//! ```text
//! ln I = ln A - x / (2 sigma^2)      =>      sigma = sqrt(-1 / (2 m))
//! ```
//!
//! The fit window keeps only `0.30 I_max < I < 0.95 I_max` at `r > 0`: the
//! upper cut drops the saturated plateau around the peak, the lower cut drops
//! the tails where scanner noise dominates, and the center bin is excluded as
//! a single-pixel outlier. Most of the profile is discarded by construction;
//! that is the intended simplicity/robustness tradeoff of a linearized fit.

use crate::domain::{FitStatus, GaussianFit, RadialPoint};
use crate::math::{linear_design, solve_least_squares};

/// Lower edge of the fit window, as a fraction of the peak intensity.
pub const WINDOW_LOW_FRAC: f64 = 0.30;

/// Upper edge of the fit window, as a fraction of the peak intensity.
pub const WINDOW_HIGH_FRAC: f64 = 0.95;

/// Minimum number of windowed points for a regression worth trusting.
pub const MIN_WINDOW_POINTS: usize = 5;

/// Fit a Gaussian width to a radial profile.
///
/// Refusals are soft: a window with fewer than [`MIN_WINDOW_POINTS`] points
/// or a non-negative regression slope (flat or rising profile) yields
/// `sigma_mm = 0` with the corresponding [`FitStatus`], never an error.
pub fn fit_gaussian(profile: &[RadialPoint]) -> GaussianFit {
    let max_intensity = peak_intensity(profile);

    let windowed: Vec<(f64, f64)> = profile
        .iter()
        .filter(|p| {
            p.radius_mm > 0.0
                && p.intensity > WINDOW_LOW_FRAC * max_intensity
                && p.intensity < WINDOW_HIGH_FRAC * max_intensity
        })
        .map(|p| (p.radius_mm * p.radius_mm, p.intensity.ln()))
        .collect();

    if windowed.len() < MIN_WINDOW_POINTS {
        return GaussianFit::rejected(FitStatus::TooFewPoints);
    }

    let (x, y) = linear_design(&windowed);
    let Some(beta) = solve_least_squares(&x, &y) else {
        return GaussianFit::rejected(FitStatus::NonGaussian);
    };

    let slope = beta[1];
    if slope >= 0.0 {
        return GaussianFit::rejected(FitStatus::NonGaussian);
    }

    GaussianFit {
        sigma_mm: (-1.0 / (2.0 * slope)).sqrt(),
        amplitude: beta[0].exp(),
        status: FitStatus::Converged,
    }
}

/// Fill each profile point's `fit` field with the modeled intensity
/// `I_max exp(-r^2 / 2 sigma^2)`.
///
/// Purely a display overlay: it runs after the fit and has no effect on the
/// fitted sigma. Profiles whose fit was refused are left untouched.
pub fn overlay_fit(profile: &mut [RadialPoint], fit: &GaussianFit) {
    if fit.status != FitStatus::Converged || fit.sigma_mm <= 0.0 {
        return;
    }
    let max_intensity = peak_intensity(profile);
    let two_sigma_sq = 2.0 * fit.sigma_mm * fit.sigma_mm;
    for p in profile.iter_mut() {
        let r_sq = p.radius_mm * p.radius_mm;
        p.fit = Some(max_intensity * (-r_sq / two_sigma_sq).exp());
    }
}

fn peak_intensity(profile: &[RadialPoint]) -> f64 {
    profile.iter().map(|p| p.intensity).fold(0.0, f64::max)
}
