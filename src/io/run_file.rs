//! Read/append saved-run JSON files.
//!
//! A run file holds a list of `SavedRun` snapshots. The in-memory run list is
//! session state; a run file is its durable form, shared between `analyze
//! --save-run` (append) and `compare` (read). Appending re-reads the file so
//! multiple sessions can accumulate runs into the same file.

use std::fs::File;
use std::path::Path;

use crate::domain::SavedRun;
use crate::error::AppError;

/// Read all runs from a run file.
pub fn read_runs(path: &Path) -> Result<Vec<SavedRun>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open runs '{}': {e}", path.display())))?;
    let runs: Vec<SavedRun> = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid runs JSON '{}': {e}", path.display())))?;
    Ok(runs)
}

/// Write a full run list, replacing the file.
pub fn write_runs(path: &Path, runs: &[SavedRun]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create runs '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, runs)
        .map_err(|e| AppError::new(2, format!("Failed to write runs JSON: {e}")))?;
    Ok(())
}

/// Append one run to a run file, creating the file if absent.
pub fn append_run(path: &Path, run: SavedRun) -> Result<(), AppError> {
    let mut runs = if path.exists() {
        read_runs(path)?
    } else {
        Vec::new()
    };
    runs.push(run);
    write_runs(path, &runs)
}
