//! Saved-run snapshots and cross-run comparison.
//!
//! A `SavedRun` freezes one analyzed session: the per-station summaries, the
//! aggregate RMS angle, and the Highland inputs/prediction used at save time.
//! The comparator lines runs up against each other without recomputing
//! anything from images.

use chrono::{DateTime, Utc};

use crate::domain::{AnalysisSummary, HighlandParams, SavedRun};
use crate::physics::theta_rms;

/// Per-run scalar statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub run_id: String,
    pub material: String,
    /// Largest corrected width across the run's stations, in mm.
    pub max_sigma_corrected_mm: f64,
    pub theta_rms_rad: f64,
    /// Agreement with the Highland prediction, 0-100.
    pub theory_match_pct: f64,
}

/// Corrected-width series aligned on shared distances.
///
/// `sigma_by_run[run][i]` is the corrected width of run `run` at
/// `distances_mm[i]`, or `None` when that run has no station at exactly that
/// distance. Matching is by equality only: runs measured on different
/// distance sets simply show gaps, no interpolation is attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSeries {
    pub distances_mm: Vec<f64>,
    pub sigma_by_run: Vec<Vec<Option<f64>>>,
}

/// Output of comparing a selection of saved runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunComparison {
    pub stats: Vec<RunStats>,
    pub series: ComparisonSeries,
}

impl SavedRun {
    /// Freeze an analyzed session into an immutable snapshot.
    ///
    /// The RMS angle is recomputed from the summaries here so a snapshot can
    /// never disagree with its own data. Without an explicit id the save
    /// timestamp provides one.
    pub fn from_analysis(
        id: Option<String>,
        material: impl Into<String>,
        saved_at: DateTime<Utc>,
        summaries: Vec<AnalysisSummary>,
        highland: HighlandParams,
        theoretical_theta_rad: f64,
    ) -> Self {
        let id = id.unwrap_or_else(|| format!("run-{}", saved_at.format("%Y%m%d%H%M%S")));
        let theta_rms_rad = theta_rms(&summaries);
        Self {
            id,
            material: material.into(),
            saved_at,
            summaries,
            theta_rms_rad,
            highland,
            theoretical_theta_rad,
        }
    }
}

/// Agreement between a measured RMS angle and the theoretical prediction,
/// as a percentage in `0..=100`.
///
/// Defined as 0 when there is no prediction to compare against
/// (`theoretical_theta <= 0`), and clamped at 0 when the relative deviation
/// exceeds 100%.
pub fn theory_match_pct(theta_rms_rad: f64, theoretical_theta_rad: f64) -> f64 {
    if theoretical_theta_rad <= 0.0 {
        return 0.0;
    }
    let deviation_pct =
        (theta_rms_rad - theoretical_theta_rad).abs() / theoretical_theta_rad * 100.0;
    (100.0 - deviation_pct).max(0.0)
}

/// Compare a selection of saved runs: per-run stats plus distance-matched
/// corrected-width series.
pub fn compare(runs: &[SavedRun]) -> RunComparison {
    let stats = runs
        .iter()
        .map(|run| RunStats {
            run_id: run.id.clone(),
            material: run.material.clone(),
            max_sigma_corrected_mm: run
                .summaries
                .iter()
                .map(|s| s.sigma_corrected_mm)
                .fold(0.0, f64::max),
            theta_rms_rad: run.theta_rms_rad,
            theory_match_pct: theory_match_pct(run.theta_rms_rad, run.theoretical_theta_rad),
        })
        .collect();

    let distances_mm = shared_distance_axis(runs);
    let sigma_by_run = runs
        .iter()
        .map(|run| {
            distances_mm
                .iter()
                .map(|&d| {
                    run.summaries
                        .iter()
                        .find(|s| s.distance_mm == d)
                        .map(|s| s.sigma_corrected_mm)
                })
                .collect()
        })
        .collect();

    RunComparison {
        stats,
        series: ComparisonSeries {
            distances_mm,
            sigma_by_run,
        },
    }
}

/// Union of all station distances across the runs, ascending, deduplicated
/// by exact value.
fn shared_distance_axis(runs: &[SavedRun]) -> Vec<f64> {
    let mut distances: Vec<f64> = runs
        .iter()
        .flat_map(|run| run.summaries.iter().map(|s| s.distance_mm))
        .collect();
    distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    distances.dedup();
    distances
}
