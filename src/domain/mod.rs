//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - geometry and profile primitives (`Point`, `RadialPoint`)
//! - fit outputs (`GaussianFit`, `FitStatus`)
//! - measurement records (`FilmSample`, `AnalysisSummary`)
//! - physics inputs (`HighlandParams`) and run snapshots (`SavedRun`)

pub mod types;

pub use types::*;
