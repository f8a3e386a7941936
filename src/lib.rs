//! envgroup - grouped configuration variables
//!
//! Resolves named variables from command-line flags and environment
//! variables, converts them to typed values, applies defaults and required
//! checks, and groups the results by project.

pub mod cli;
pub mod error;
pub mod resolver;
pub mod utils;

// Re-export commonly used types
pub use error::{ConversionError, EnvGroupError, Result};
pub use resolver::{
    Converter, EnvSource, ProcessEnv, ResolvedVars, Resolver, ValueKind, ValueSource,
    VariableDefinition, DEFAULT_PROJECT,
};
