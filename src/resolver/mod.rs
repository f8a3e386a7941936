//! Variable resolution
//!
//! Definitions are registered on a [`Resolver`], which turns them into a
//! [`ResolvedVars`] mapping of project name to variable name to value.

pub mod converter;
pub mod definition;
pub mod engine;
pub mod resolved;
pub mod sources;

pub use converter::{Converter, ValueKind};
pub use definition::{VariableDefinition, DEFAULT_PROJECT};
pub use engine::Resolver;
pub use resolved::{ResolvedValue, ResolvedVars, ValueSource};
pub use sources::{flag_value, EnvSource, ProcessEnv};
