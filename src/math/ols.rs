//! Least squares solver for the linearized Gaussian fit.
//!
//! The Gaussian profile `I(r) = A exp(-r^2 / 2 sigma^2)` becomes linear after
//! taking logarithms:
//!
//! ```text
//! ln I = ln A - r^2 / (2 sigma^2)
//! ```
//!
//! so each fit is a tiny two-column regression (intercept + slope) over the
//! windowed profile points. SVD keeps the solve well-behaved even when the
//! window is narrow and the `r^2` column spans several orders of magnitude.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem `min ||X b - y||` using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // A profile whose window collapses to nearly identical radii produces a
    // rank-deficient design matrix; try progressively looser tolerances
    // before giving up.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Build the `[1, x_i]` design matrix and `y` vector for a simple linear
/// regression over `(x, y)` pairs.
pub fn linear_design(points: &[(f64, f64)]) -> (DMatrix<f64>, DVector<f64>) {
    let n = points.len();
    let mut x = DMatrix::<f64>::zeros(n, 2);
    let mut y = DVector::<f64>::zeros(n);
    for (i, &(xi, yi)) in points.iter().enumerate() {
        x[(i, 0)] = 1.0;
        x[(i, 1)] = xi;
        y[i] = yi;
    }
    (x, y)
}
