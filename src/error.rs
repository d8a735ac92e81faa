//! Hard-failure error type for the CLI surface.
//!
//! Numeric edge cases inside the analysis (degenerate centroid, refused fit,
//! invalid Highland parameter) deliberately do NOT use this type: they resolve
//! to zero-valued results so one bad film never takes down a whole run. This
//! type is for failures the user must act on: unreadable files, invalid JSON,
//! bad configuration.

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Process exit code reported to the shell (2 = I/O or config, 3 = no
    /// usable input data).
    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
