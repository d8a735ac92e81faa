//! Input/output helpers.
//!
//! - session JSON read/write (`session`)
//! - saved-run JSON read/append (`run_file`)
//! - per-station CSV export (`export`)

pub mod export;
pub mod run_file;
pub mod session;

pub use export::*;
pub use run_file::*;
pub use session::*;
