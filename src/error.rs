use thiserror::Error;

/// Error produced by a converter when a raw value cannot be turned into a value.
pub type ConversionError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for envgroup operations
#[derive(Debug, Error)]
pub enum EnvGroupError {
    #[error("Missing required variable/flag: {name}{}", flag_suffix(.flag))]
    MissingRequired { name: String, flag: Option<String> },

    #[error("Failed to parse variable \"{name}\": {source}")]
    Conversion {
        name: String,
        #[source]
        source: ConversionError,
    },

    #[error("Variable {project}.{name} could not be deserialized: {source}")]
    Deserialize {
        project: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid variable definition: {0}")]
    InvalidDefinition(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn flag_suffix(flag: &Option<String>) -> String {
    match flag {
        Some(flag) => format!(" (flag: {flag})"),
        None => String::new(),
    }
}

impl EnvGroupError {
    pub fn missing_required<S: Into<String>>(name: S, flag: Option<&str>) -> Self {
        Self::MissingRequired {
            name: name.into(),
            flag: flag.map(str::to_string),
        }
    }

    pub fn conversion<S: Into<String>>(name: S, source: ConversionError) -> Self {
        Self::Conversion {
            name: name.into(),
            source,
        }
    }

    pub fn deserialize<S: Into<String>>(project: S, name: S, source: serde_json::Error) -> Self {
        Self::Deserialize {
            project: project.into(),
            name: name.into(),
            source,
        }
    }

    pub fn invalid_definition<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDefinition(msg.into())
    }

    /// Whether this error aborts a resolution pass.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::MissingRequired { .. } | Self::Conversion { .. })
    }
}

/// Result type alias for envgroup operations
pub type Result<T> = std::result::Result<T, EnvGroupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_message() {
        let err = EnvGroupError::missing_required("MISSING_VAR", None);
        assert_eq!(err.to_string(), "Missing required variable/flag: MISSING_VAR");
        assert!(err.is_resolution_failure());
    }

    #[test]
    fn test_missing_required_message_with_flag() {
        let err = EnvGroupError::missing_required("TOKEN", Some("--token"));
        assert_eq!(
            err.to_string(),
            "Missing required variable/flag: TOKEN (flag: --token)"
        );
    }

    #[test]
    fn test_conversion_message() {
        let err = EnvGroupError::conversion("FAIL_PARSE", "intentional failure".into());
        assert_eq!(
            err.to_string(),
            "Failed to parse variable \"FAIL_PARSE\": intentional failure"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_definition_is_not_resolution_failure() {
        let err = EnvGroupError::invalid_definition("name is required");
        assert!(!err.is_resolution_failure());
        assert_eq!(err.to_string(), "Invalid variable definition: name is required");
    }
}
