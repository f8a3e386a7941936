//! CLI module for envgroup
//!
//! Command definitions, variable spec parsing, and command execution for
//! the `envgroup` host binary.

pub mod commands;

pub use commands::*;
