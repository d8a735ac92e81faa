//! Synthetic scan generation.
//!
//! Used by the `demo` subcommand (an end-to-end run with no scanner attached)
//! and by the fit-recovery tests.

pub mod synth;

pub use synth::*;
