//! Read/write session JSON files.
//!
//! A session file describes one measurement setup: the scattering material,
//! the scanner's pixel scale, the Highland inputs, and the film stations with
//! their image paths. It is the `analyze` subcommand's sole input.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisConfig, FilmSample, HighlandParams};
use crate::error::AppError;

/// On-disk description of one measurement session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    /// Scattering material name, for reports and saved runs.
    pub material: String,
    pub scale_mm_per_px: f64,
    pub highland: HighlandParams,
    pub films: Vec<FilmSample>,
}

impl SessionFile {
    /// Analysis configuration shared by every film in this session.
    pub fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            scale_mm_per_px: self.scale_mm_per_px,
            highland: self.highland,
        }
    }
}

/// Read a session JSON file.
pub fn read_session(path: &Path) -> Result<SessionFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open session '{}': {e}", path.display())))?;
    let session: SessionFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid session JSON '{}': {e}", path.display())))?;
    Ok(session)
}

/// Write a session JSON file (pretty-printed, spreadsheet-diffable).
pub fn write_session(path: &Path, session: &SessionFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create session '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, session)
        .map_err(|e| AppError::new(2, format!("Failed to write session JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_SLOT_COUNT;

    fn sample_session() -> SessionFile {
        SessionFile {
            material: "aluminum".to_string(),
            scale_mm_per_px: 0.1693,
            highland: HighlandParams {
                thickness_cm: 1.0,
                density_g_cm3: 2.7,
                rad_length_cm: 8.897,
                momentum_mev_c: 150.0,
                beta: 0.6,
            },
            films: FilmSample::slots(DEFAULT_SLOT_COUNT, 50.0),
        }
    }

    #[test]
    fn session_round_trips_through_json() {
        let session = sample_session();
        let json = serde_json::to_string(&session).unwrap();
        let back: SessionFile = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }

    #[test]
    fn films_without_sigmas_omit_the_fields() {
        let json = serde_json::to_string(&sample_session()).unwrap();
        assert!(!json.contains("sigma_air_mm"));
        assert!(!json.contains("air_image"));
    }

    #[test]
    fn session_survives_a_disk_round_trip() {
        let dir = std::env::temp_dir().join("mcs-films-session-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");

        let session = sample_session();
        write_session(&path, &session).unwrap();
        let back = read_session(&path).unwrap();
        assert_eq!(session, back);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_session_file_is_a_hard_error() {
        let err = read_session(Path::new("/nonexistent/session.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
