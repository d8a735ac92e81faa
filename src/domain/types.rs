//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during analysis
//! - exported to JSON/CSV
//! - reloaded later for cross-run comparison

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of film stations a fresh measurement session starts with.
///
/// Ten stations is the default bench layout, not an architectural limit: the
/// sample list is an ordinary ordered `Vec` and may hold any count.
pub const DEFAULT_SLOT_COUNT: usize = 10;

/// A 2D coordinate in pixel space.
///
/// Produced by the centroid estimator, consumed by the radial profiler.
/// Sub-pixel positions are meaningful (intensity-weighted averages).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One bin of a radial intensity profile.
///
/// `fit` is filled in by the overlay helper after a successful Gaussian fit;
/// it is a display aid and never feeds back into the fitted sigma.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialPoint {
    /// Bin center distance from the beam centroid, in mm.
    pub radius_mm: f64,
    /// Average inverted brightness (dose proxy) of the pixels in this bin.
    pub intensity: f64,
    /// Modeled intensity at this radius, if a fit converged.
    pub fit: Option<f64>,
}

/// Outcome classification for a Gaussian width fit.
///
/// The numeric contract is unchanged by this flag: whenever the status is not
/// `Converged`, the fitted sigma is exactly 0. The flag exists so callers can
/// tell "no signal" apart from "bad signal" when debugging a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitStatus {
    /// The windowed regression produced a negative slope; sigma is valid.
    Converged,
    /// Fewer than the minimum number of usable points in the fit window.
    TooFewPoints,
    /// The windowed profile was flat or increasing with radius.
    NonGaussian,
}

/// Result of fitting a Gaussian profile to one film scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianFit {
    /// Beam width (standard deviation) in mm; 0 when the fit was refused.
    pub sigma_mm: f64,
    /// Peak intensity implied by the regression intercept, `exp(c)`.
    pub amplitude: f64,
    pub status: FitStatus,
}

impl GaussianFit {
    /// A refused fit: sigma and amplitude pinned to 0.
    pub fn rejected(status: FitStatus) -> Self {
        Self {
            sigma_mm: 0.0,
            amplitude: 0.0,
            status,
        }
    }
}

/// One physical measurement station: a film holder at a known distance from
/// the scattering material.
///
/// Created at setup time with a default distance; image references and fitted
/// sigmas are filled in as scans are uploaded and analyzed. Stations are never
/// deleted mid-session, only reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmSample {
    pub id: String,
    /// Distance from the scattering material to the film, in mm.
    ///
    /// May be non-positive for a misconfigured station; the analyzer then
    /// defines that station's scattering angle as 0 instead of failing.
    pub distance_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_image: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_image: Option<PathBuf>,
    /// Fitted beam width without scattering material, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_air_mm: Option<f64>,
    /// Fitted beam width with scattering material, in mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_material_mm: Option<f64>,
}

impl FilmSample {
    pub fn new(id: impl Into<String>, distance_mm: f64) -> Self {
        Self {
            id: id.into(),
            distance_mm,
            air_image: None,
            material_image: None,
            sigma_air_mm: None,
            sigma_material_mm: None,
        }
    }

    /// Build the default station set: `count` stations spaced `spacing_mm`
    /// apart, ids `F1..Fn`.
    pub fn slots(count: usize, spacing_mm: f64) -> Vec<FilmSample> {
        (0..count)
            .map(|i| FilmSample::new(format!("F{}", i + 1), spacing_mm * (i + 1) as f64))
            .collect()
    }

    /// Clear images and fitted sigmas, keeping the station id and distance.
    pub fn reset(&mut self) {
        self.air_image = None;
        self.material_image = None;
        self.sigma_air_mm = None;
        self.sigma_material_mm = None;
    }
}

/// Per-station derived record.
///
/// A pure projection of a `FilmSample` plus the Highland angle: recomputed
/// whenever any input changes, never mutated in place or persisted on its own
/// (except inside a `SavedRun` snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub sample_id: String,
    pub distance_mm: f64,
    pub sigma_air_mm: f64,
    pub sigma_material_mm: f64,
    /// Material-induced width after quadrature subtraction of the air width.
    /// Clamped to be non-negative.
    pub sigma_corrected_mm: f64,
    /// Measured scattering angle `sigma_corrected / distance`, in radians.
    pub theta_rad: f64,
    /// Width the Highland angle predicts at this station's distance, in mm.
    pub theoretical_sigma_mm: f64,
}

/// Inputs to the Highland scattering-angle formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlandParams {
    /// Material thickness `x`, in cm.
    pub thickness_cm: f64,
    /// Material density, in g/cm3. Carried through the data model and the
    /// session file but not consumed by the formula itself (reserved for a
    /// radiation-length-from-density derivation).
    pub density_g_cm3: f64,
    /// Radiation length `X0`, in cm.
    pub rad_length_cm: f64,
    /// Beam momentum `p`, in MeV/c.
    pub momentum_mev_c: f64,
    /// Particle velocity as a fraction of c.
    pub beta: f64,
}

/// Immutable snapshot of one analyzed measurement run.
///
/// Created only on explicit save and never mutated afterwards; the list of
/// saved runs is the only state the tool persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRun {
    pub id: String,
    pub material: String,
    pub saved_at: DateTime<Utc>,
    pub summaries: Vec<AnalysisSummary>,
    /// RMS of the per-station measured angles at save time, in radians.
    pub theta_rms_rad: f64,
    pub highland: HighlandParams,
    /// Highland prediction evaluated from `highland` at save time, in radians.
    pub theoretical_theta_rad: f64,
}

/// Analysis configuration shared by every film in a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Physical size of one scan pixel, in mm.
    pub scale_mm_per_px: f64,
    pub highland: HighlandParams,
}

impl AnalysisConfig {
    /// Reject configurations the pipeline cannot work with.
    ///
    /// Only the pixel scale is a hard requirement; Highland parameters may be
    /// non-positive (the formula then evaluates to 0 by contract).
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.scale_mm_per_px.is_finite() && self.scale_mm_per_px > 0.0) {
            return Err(AppError::new(
                2,
                format!(
                    "Pixel scale must be a positive number of mm/px, got {}.",
                    self.scale_mm_per_px
                ),
            ));
        }
        Ok(())
    }
}
