//! Command-line parsing for the film scattering analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the analysis/physics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{HighlandParams, DEFAULT_SLOT_COUNT};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "mcs",
    version,
    about = "Radiochromic-film multiple-Coulomb-scattering analyzer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a measurement session (film scans -> sigmas -> Highland comparison).
    Analyze(AnalyzeArgs),
    /// Evaluate the Highland prediction from explicit physical parameters.
    Theory(TheoryArgs),
    /// Compare saved runs (per-run stats + distance-matched widths).
    Compare(CompareArgs),
    /// Run the full pipeline on synthetic scans (no scanner required).
    Demo(DemoArgs),
}

/// Options for analyzing a session file.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Session JSON: material, pixel scale, Highland inputs, film stations.
    #[arg(short = 's', long, value_name = "JSON")]
    pub session: PathBuf,

    /// Export per-station summaries to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Append this run's snapshot to a run file.
    #[arg(long = "save-run", value_name = "JSON")]
    pub save_run: Option<PathBuf>,

    /// Id for the saved run (defaults to a timestamp-derived id).
    #[arg(long)]
    pub run_id: Option<String>,
}

/// Highland formula inputs.
///
/// Defaults describe 1 cm of water in a 150 MeV/c beam.
#[derive(Debug, Parser, Clone, Copy)]
pub struct TheoryArgs {
    /// Material thickness x, in cm.
    #[arg(long, default_value_t = 1.0)]
    pub thickness: f64,

    /// Material density, in g/cm3 (recorded, not used by the formula).
    #[arg(long, default_value_t = 1.0)]
    pub density: f64,

    /// Radiation length X0, in cm.
    #[arg(long = "rad-length", default_value_t = 36.08)]
    pub rad_length: f64,

    /// Beam momentum p, in MeV/c.
    #[arg(long, default_value_t = 150.0)]
    pub momentum: f64,

    /// Particle velocity as a fraction of c.
    #[arg(long, default_value_t = 0.5)]
    pub beta: f64,
}

impl TheoryArgs {
    pub fn params(&self) -> HighlandParams {
        HighlandParams {
            thickness_cm: self.thickness,
            density_g_cm3: self.density,
            rad_length_cm: self.rad_length,
            momentum_mev_c: self.momentum,
            beta: self.beta,
        }
    }
}

/// Options for comparing saved runs.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// Run files to compare; every run in every file is included.
    #[arg(required = true, value_name = "JSON")]
    pub runs: Vec<PathBuf>,

    /// Restrict the comparison to runs with these ids.
    #[arg(long = "id")]
    pub ids: Vec<String>,
}

/// Options for the synthetic demo run.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Number of film stations to simulate.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SLOT_COUNT)]
    pub films: usize,

    /// Random seed for the film-grain noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Pixel scale of the synthetic scans, in mm/px.
    #[arg(long, default_value_t = 0.5)]
    pub scale: f64,

    /// Film-grain standard deviation in brightness units.
    #[arg(long, default_value_t = 2.0)]
    pub noise: f64,

    #[command(flatten)]
    pub theory: TheoryArgs,

    /// Export per-station summaries to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Append this run's snapshot to a run file.
    #[arg(long = "save-run", value_name = "JSON")]
    pub save_run: Option<PathBuf>,

    /// Id for the saved run (defaults to a timestamp-derived id).
    #[arg(long)]
    pub run_id: Option<String>,
}
