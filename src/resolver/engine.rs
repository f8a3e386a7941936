//! The resolution pass
//!
//! Priority for each variable:
//! 1. Command-line flag (first occurrence, followed by a non-empty value)
//! 2. Environment variable of the same name
//! 3. Default value
//!
//! Empty strings count as "not set" at every level.

use super::definition::VariableDefinition;
use super::resolved::{ResolvedVars, ValueSource};
use super::sources::{flag_value, EnvSource, ProcessEnv};
use crate::error::{EnvGroupError, Result};
use tracing::{debug, warn};

/// Collects variable definitions and resolves them in one pass.
#[derive(Debug, Default)]
pub struct Resolver {
    definitions: Vec<VariableDefinition>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition. Definitions resolve in the order they were added.
    pub fn register(&mut self, definition: VariableDefinition) -> &mut Self {
        self.definitions.push(definition);
        self
    }

    /// Owned form of [`Resolver::register`] for expression-style chaining.
    pub fn with(mut self, definition: VariableDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn definitions(&self) -> &[VariableDefinition] {
        &self.definitions
    }

    /// Resolve against the process environment and `std::env::args`.
    pub fn resolve(&self) -> Result<ResolvedVars> {
        let args: Vec<String> = std::env::args().collect();
        self.resolve_with(&ProcessEnv, &args)
    }

    /// Resolve against an explicit environment table and argument vector.
    ///
    /// Stops at the first missing required variable (unless it opted out via
    /// `quit_on_missing(false)`) or the first conversion failure; nothing is
    /// returned for a failed pass.
    pub fn resolve_with<E, S>(&self, env: &E, args: &[S]) -> Result<ResolvedVars>
    where
        E: EnvSource + ?Sized,
        S: AsRef<str>,
    {
        let mut resolved = ResolvedVars::new();

        for def in &self.definitions {
            let project = def.project_name();
            let name = def.name();
            resolved.ensure_project(project);

            match raw_value(def, env, args) {
                None => {
                    if let Some(default) = def.default() {
                        debug!("Using default value for {}.{}", project, name);
                        resolved.insert(project, name, default.clone(), ValueSource::Default);
                    } else if def.is_required() {
                        let err = EnvGroupError::missing_required(name, def.flag_name());
                        if def.quits_on_missing() {
                            return Err(err);
                        }
                        let message = err.to_string();
                        warn!("{}", message);
                        resolved.push_warning(message);
                    } else {
                        debug!("Optional variable {}.{} is not set", project, name);
                    }
                }
                Some((raw, source)) => {
                    let value = def
                        .convert(&raw)
                        .map_err(|e| EnvGroupError::conversion(name, e))?;
                    debug!("Resolved {}.{} from {}", project, name, source);
                    resolved.insert(project, name, value, source);
                }
            }
        }

        Ok(resolved)
    }
}

fn raw_value<E, S>(def: &VariableDefinition, env: &E, args: &[S]) -> Option<(String, ValueSource)>
where
    E: EnvSource + ?Sized,
    S: AsRef<str>,
{
    if let Some(value) = def.flag_name().and_then(|flag| flag_value(args, flag)) {
        return Some((value.to_string(), ValueSource::Flag));
    }

    env.var(def.name())
        .filter(|value| !value.is_empty())
        .map(|value| (value, ValueSource::Env))
}
