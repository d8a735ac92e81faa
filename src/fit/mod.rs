//! Gaussian width fitting.
//!
//! Responsibilities:
//!
//! - select the usable intensity window of a radial profile
//! - run the linearized least-squares fit and recover sigma
//! - overlay the fitted curve on the profile for display

pub mod gaussian;

pub use gaussian::*;
