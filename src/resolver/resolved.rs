//! Resolution results
//!
//! [`ResolvedVars`] holds the values found by one resolution pass, grouped by
//! project and then by variable name.

use crate::error::{EnvGroupError, Result};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Flag,
    Env,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueSource::Flag => "flag",
            ValueSource::Env => "env",
            ValueSource::Default => "default",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    pub value: Value,
    pub source: ValueSource,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedVars {
    projects: BTreeMap<String, BTreeMap<String, ResolvedValue>>,
    warnings: Vec<String>,
}

impl ResolvedVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a bucket exists for `project`, even if it stays empty.
    pub(crate) fn ensure_project(&mut self, project: &str) {
        self.projects.entry(project.to_string()).or_default();
    }

    pub(crate) fn insert(&mut self, project: &str, name: &str, value: Value, source: ValueSource) {
        self.projects
            .entry(project.to_string())
            .or_default()
            .insert(name.to_string(), ResolvedValue { value, source });
    }

    pub(crate) fn push_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn get(&self, project: &str, name: &str) -> Option<&Value> {
        self.entry(project, name).map(|resolved| &resolved.value)
    }

    pub fn entry(&self, project: &str, name: &str) -> Option<&ResolvedValue> {
        self.projects.get(project)?.get(name)
    }

    pub fn contains(&self, project: &str, name: &str) -> bool {
        self.entry(project, name).is_some()
    }

    /// Deserialize a single value into `T`. Returns `Ok(None)` when the
    /// variable was not resolved.
    pub fn get_as<T: DeserializeOwned>(&self, project: &str, name: &str) -> Result<Option<T>> {
        self.get(project, name)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| EnvGroupError::deserialize(project, name, e))
            })
            .transpose()
    }

    /// All values of `project` as a JSON object.
    pub fn project(&self, project: &str) -> Option<Map<String, Value>> {
        self.projects.get(project).map(|vars| {
            vars.iter()
                .map(|(name, resolved)| (name.clone(), resolved.value.clone()))
                .collect()
        })
    }

    /// Deserialize every value of `project` into a struct whose fields are
    /// named after the variables. A project with no bucket deserializes from
    /// an empty object.
    pub fn deserialize_project<T: DeserializeOwned>(&self, project: &str) -> Result<T> {
        let object = self.project(project).unwrap_or_default();
        serde_json::from_value(Value::Object(object))
            .map_err(|e| EnvGroupError::deserialize(project, "*", e))
    }

    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }

    /// Every resolved value as `(project, name, value)`.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &ResolvedValue)> {
        self.projects.iter().flat_map(|(project, vars)| {
            vars.iter()
                .map(move |(name, resolved)| (project.as_str(), name.as_str(), resolved))
        })
    }

    pub fn len(&self) -> usize {
        self.projects.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Messages for required variables that were missing but not fatal.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The nested `{project: {name: value}}` mapping.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.projects
                .keys()
                .filter_map(|project| {
                    self.project(project)
                        .map(|vars| (project.clone(), Value::Object(vars)))
                })
                .collect(),
        )
    }
}

impl Serialize for ResolvedVars {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
