//! Utility functions module
//!
//! Output rendering for resolved variables and definition listings.

pub mod format;

pub use format::*;
