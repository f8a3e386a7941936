//! Raw value sources
//!
//! The resolver never touches process state directly; it reads through an
//! [`EnvSource`] and an argument slice so both can be supplied by the caller.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Read-only view of an environment variable table.
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                debug!("Ignoring non-unicode value of {}", key);
                None
            }
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Value given to `flag` in an argument vector.
///
/// Only the first occurrence of the flag is considered. The value is the
/// token right after it; a missing or empty token yields `None`.
pub fn flag_value<'a, S: AsRef<str>>(args: &'a [S], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|arg| arg.as_ref() == flag)?;
    args.get(idx + 1)
        .map(|value| value.as_ref())
        .filter(|value| !value.is_empty())
}
