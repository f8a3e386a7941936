//! Variable definitions
//!
//! A [`VariableDefinition`] names one value to resolve and the policy used to
//! resolve it: where to look, how to convert, and what to do when nothing is
//! found.

use super::converter::{Converter, FnConverter, ParseConverter, ValueKind};
use crate::error::ConversionError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Namespace used when a definition names no project.
pub const DEFAULT_PROJECT: &str = "env";

pub struct VariableDefinition {
    name: String,
    project: Option<String>,
    required: bool,
    default: Option<Value>,
    flag: Option<String>,
    quit_on_missing: Option<bool>,
    converter: Option<Box<dyn Converter>>,
}

impl VariableDefinition {
    /// Create a definition for `name`, looked up as an environment variable
    /// of the same name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            project: None,
            required: false,
            default: None,
            flag: None,
            quit_on_missing: None,
            converter: None,
        }
    }

    /// Group this variable under `project` instead of [`DEFAULT_PROJECT`].
    pub fn project<S: Into<String>>(mut self, project: S) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Value used when neither the flag nor the environment provides one.
    /// Stored as given; the converter is not applied to it.
    pub fn default_value<V: Into<Value>>(mut self, default: V) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Command-line flag (e.g. `--token`) whose value wins over the
    /// environment variable.
    pub fn flag<S: Into<String>>(mut self, flag: S) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// When false, a missing required variable is logged as a warning instead
    /// of failing the resolution.
    pub fn quit_on_missing(mut self, quit: bool) -> Self {
        self.quit_on_missing = Some(quit);
        self
    }

    pub fn converter<C: Converter + 'static>(mut self, converter: C) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    pub fn kind(self, kind: ValueKind) -> Self {
        self.converter(kind)
    }

    /// Convert raw values with a closure.
    pub fn parse_with<F, T, E>(self, f: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + 'static,
        T: Into<Value>,
        E: Into<ConversionError>,
    {
        self.converter(FnConverter::new(f))
    }

    /// Convert raw values through `T`'s `FromStr` implementation.
    pub fn parse_as<T>(self) -> Self
    where
        T: FromStr + Serialize + 'static,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.converter(ParseConverter::<T>::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace this variable is grouped under.
    pub fn project_name(&self) -> &str {
        self.project.as_deref().unwrap_or(DEFAULT_PROJECT)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn flag_name(&self) -> Option<&str> {
        self.flag.as_deref()
    }

    /// Missing required variables are fatal unless explicitly disabled.
    pub fn quits_on_missing(&self) -> bool {
        self.quit_on_missing != Some(false)
    }

    pub fn type_name(&self) -> &str {
        self.converter
            .as_deref()
            .map_or(ValueKind::String.as_str(), |c| c.type_name())
    }

    /// Apply the converter, or pass the raw string through when there is none.
    pub(crate) fn convert(&self, raw: &str) -> Result<Value, ConversionError> {
        match &self.converter {
            Some(converter) => converter.convert(raw),
            None => Ok(Value::String(raw.to_string())),
        }
    }
}

impl fmt::Debug for VariableDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableDefinition")
            .field("name", &self.name)
            .field("project", &self.project)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("flag", &self.flag)
            .field("quit_on_missing", &self.quit_on_missing)
            .field("converter", &self.type_name())
            .finish()
    }
}
