//! Terminal report formatting.
//!
//! Fixed-width tables only; anything graphical is out of scope for this tool
//! (overlay data for plots is exported through the profile's `fit` values and
//! the CSV/JSON files instead).

use crate::domain::{AnalysisConfig, AnalysisSummary, HighlandParams};
use crate::runs::{theory_match_pct, RunComparison};

/// Format the full analysis report: setup, per-station table, aggregates.
pub fn format_analysis_report(
    material: &str,
    config: &AnalysisConfig,
    summaries: &[AnalysisSummary],
    theta_rms_rad: f64,
    theoretical_theta_rad: f64,
    warnings: &[String],
) -> String {
    let mut out = String::new();

    out.push_str("=== mcs - Film Scattering Analysis ===\n");
    out.push_str(&format!("Material: {material}\n"));
    out.push_str(&format!("Scale: {:.4} mm/px\n", config.scale_mm_per_px));
    out.push_str(&format!(
        "Highland: x={:.3}cm X0={:.3}cm p={:.1}MeV/c beta={:.3}\n",
        config.highland.thickness_cm,
        config.highland.rad_length_cm,
        config.highland.momentum_mev_c,
        config.highland.beta,
    ));
    out.push('\n');

    out.push_str(&format_summary_table(summaries));

    out.push_str("\nAggregates:\n");
    out.push_str(&format!("- theta RMS (measured): {theta_rms_rad:.6} rad\n"));
    out.push_str(&format!(
        "- theta (Highland)    : {theoretical_theta_rad:.6} rad\n"
    ));
    out.push_str(&format!(
        "- theory match        : {:.1}%\n",
        theory_match_pct(theta_rms_rad, theoretical_theta_rad)
    ));

    if !warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }

    out
}

/// Format the per-station summary table.
pub fn format_summary_table(summaries: &[AnalysisSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "station", "L_mm", "s_air", "s_mat", "s_corr", "theta", "s_theory"
    ));
    out.push_str(&format!(
        "{:-<8} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10} {:-<10}\n",
        "", "", "", "", "", "", ""
    ));
    for s in summaries {
        out.push_str(&format!(
            "{:<8} {:>10.1} {:>10.3} {:>10.3} {:>10.3} {:>10.5} {:>10.3}\n",
            s.sample_id,
            s.distance_mm,
            s.sigma_air_mm,
            s.sigma_material_mm,
            s.sigma_corrected_mm,
            s.theta_rad,
            s.theoretical_sigma_mm,
        ));
    }
    out
}

/// Format a standalone Highland evaluation.
pub fn format_theory(params: &HighlandParams, theta_rad: f64) -> String {
    let mut out = String::new();
    out.push_str("=== mcs - Highland Prediction ===\n");
    out.push_str(&format!("thickness : {:.4} cm\n", params.thickness_cm));
    out.push_str(&format!("density   : {:.4} g/cm3 (not used by the formula)\n", params.density_g_cm3));
    out.push_str(&format!("rad length: {:.4} cm\n", params.rad_length_cm));
    out.push_str(&format!("momentum  : {:.2} MeV/c\n", params.momentum_mev_c));
    out.push_str(&format!("beta      : {:.4}\n", params.beta));
    out.push('\n');
    out.push_str(&format!("theta_rms = {theta_rad:.6} rad\n"));
    out
}

/// Format the cross-run comparison: per-run stats plus the matched series.
pub fn format_comparison(cmp: &RunComparison) -> String {
    let mut out = String::new();

    out.push_str("=== mcs - Run Comparison ===\n\n");
    out.push_str(&format!(
        "{:<20} {:<12} {:>12} {:>14} {:>8}\n",
        "run", "material", "max s_corr", "theta RMS", "match"
    ));
    out.push_str(&format!(
        "{:-<20} {:-<12} {:-<12} {:-<14} {:-<8}\n",
        "", "", "", "", ""
    ));
    for s in &cmp.stats {
        out.push_str(&format!(
            "{:<20} {:<12} {:>12.3} {:>14.6} {:>7.1}%\n",
            truncate(&s.run_id, 20),
            truncate(&s.material, 12),
            s.max_sigma_corrected_mm,
            s.theta_rms_rad,
            s.theory_match_pct,
        ));
    }

    if !cmp.series.distances_mm.is_empty() {
        out.push_str("\nCorrected sigma by distance (mm):\n");
        out.push_str(&format!("{:<10}", "L_mm"));
        for s in &cmp.stats {
            out.push_str(&format!(" {:>12}", truncate(&s.run_id, 12)));
        }
        out.push('\n');
        for (i, d) in cmp.series.distances_mm.iter().enumerate() {
            out.push_str(&format!("{d:<10.1}"));
            for run in &cmp.series.sigma_by_run {
                match run[i] {
                    Some(sigma) => out.push_str(&format!(" {sigma:>12.3}")),
                    None => out.push_str(&format!(" {:>12}", "-")),
                }
            }
            out.push('\n');
        }
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
