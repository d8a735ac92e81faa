//! Mathematical utilities: least-squares solving for the linearized fit.

pub mod ols;

pub use ols::*;
