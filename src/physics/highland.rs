//! Highland approximation for the RMS multiple-Coulomb-scattering angle.
//!
//! ```text
//! theta = 17.5 / (beta p) * sqrt(x / X0) * (1 + 0.038 ln(x / X0))
//! ```
//!
//! with `x` the material thickness, `X0` its radiation length and `p` in
//! MeV/c. The formula is an empirical closed form; for `x` far below `X0`
//! the log correction can drive the product negative, so the result is
//! clamped to 0 (the physical quantity is a magnitude).

use crate::domain::HighlandParams;

/// Leading coefficient of the Highland formula, in MeV.
pub const HIGHLAND_COEFF_MEV: f64 = 17.5;

/// Coefficient of the logarithmic thickness correction.
pub const LOG_CORRECTION_COEFF: f64 = 0.038;

/// Evaluate the Highland RMS scattering angle, in radians.
///
/// Any non-positive input among thickness, radiation length, momentum and
/// beta makes the formula undefined (log of a non-positive ratio, division
/// by zero); the result is then 0 rather than NaN. The `density` field is
/// carried on [`HighlandParams`] but not consumed here.
pub fn theta_highland(params: &HighlandParams) -> f64 {
    if params.thickness_cm <= 0.0
        || params.rad_length_cm <= 0.0
        || params.momentum_mev_c <= 0.0
        || params.beta <= 0.0
    {
        return 0.0;
    }

    let lx = params.thickness_cm / params.rad_length_cm;
    let theta = HIGHLAND_COEFF_MEV / (params.beta * params.momentum_mev_c)
        * lx.sqrt()
        * (1.0 + LOG_CORRECTION_COEFF * lx.ln());

    if !theta.is_finite() {
        return 0.0;
    }
    theta.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(thickness: f64, rad_length: f64, momentum: f64, beta: f64) -> HighlandParams {
        HighlandParams {
            thickness_cm: thickness,
            density_g_cm3: 1.0,
            rad_length_cm: rad_length,
            momentum_mev_c: momentum,
            beta,
        }
    }

    #[test]
    fn matches_reference_evaluation() {
        // x = 1 cm of water-like material, X0 = 36.08 cm, p = 150 MeV/c,
        // beta = 0.5:
        //   lx    = 0.027716...
        //   term1 = 17.5 / 75       = 0.23333
        //   term2 = sqrt(lx)        = 0.16648
        //   term3 = 1 + 0.038 ln lx = 0.86375
        let theta = theta_highland(&params(1.0, 36.08, 150.0, 0.5));
        assert!((theta - 0.03355).abs() < 5e-4, "theta = {theta}");
    }

    #[test]
    fn non_positive_inputs_yield_zero() {
        assert_eq!(theta_highland(&params(0.0, 36.08, 150.0, 0.5)), 0.0);
        assert_eq!(theta_highland(&params(1.0, 0.0, 150.0, 0.5)), 0.0);
        assert_eq!(theta_highland(&params(1.0, 36.08, 0.0, 0.5)), 0.0);
        assert_eq!(theta_highland(&params(1.0, 36.08, 150.0, 0.0)), 0.0);
        assert_eq!(theta_highland(&params(-1.0, 36.08, 150.0, 0.5)), 0.0);
    }

    #[test]
    fn very_thin_material_clamps_to_zero() {
        // x / X0 ~ 1e-13 puts the log correction below -1, flipping the sign
        // of the product; the clamp keeps the angle at 0.
        let theta = theta_highland(&params(1e-12, 10.0, 150.0, 0.9));
        assert_eq!(theta, 0.0);
    }

    #[test]
    fn density_does_not_enter_the_formula() {
        let mut a = params(1.0, 36.08, 150.0, 0.5);
        let mut b = a;
        a.density_g_cm3 = 1.0;
        b.density_g_cm3 = 19.3;
        assert_eq!(theta_highland(&a), theta_highland(&b));
    }

    #[test]
    fn angle_grows_with_thickness() {
        let thin = theta_highland(&params(0.5, 36.08, 150.0, 0.5));
        let thick = theta_highland(&params(2.0, 36.08, 150.0, 0.5));
        assert!(thick > thin && thin > 0.0);
    }
}
