//! Value converters
//!
//! A converter turns the raw string found in a flag or environment variable
//! into a typed value. Each definition carries at most one converter; without
//! one the raw string is stored unchanged.

use crate::error::ConversionError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Strategy applied to a raw value before it is stored.
pub trait Converter {
    fn convert(&self, raw: &str) -> Result<Value, ConversionError>;

    /// Short name shown when definitions are listed.
    fn type_name(&self) -> &str {
        "custom"
    }
}

/// Built-in converters, selectable by name from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    Json,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Json => "json",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(ValueKind::String),
            "integer" | "int" => Ok(ValueKind::Integer),
            "float" | "number" => Ok(ValueKind::Float),
            "boolean" | "bool" => Ok(ValueKind::Boolean),
            "json" => Ok(ValueKind::Json),
            other => Err(format!("unknown value type '{other}'")),
        }
    }
}

impl Converter for ValueKind {
    fn convert(&self, raw: &str) -> Result<Value, ConversionError> {
        match self {
            ValueKind::String => Ok(Value::String(raw.to_string())),
            ValueKind::Integer => Ok(Value::from(raw.trim().parse::<i64>()?)),
            ValueKind::Float => {
                let number = raw.trim().parse::<f64>()?;
                serde_json::Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| format!("'{raw}' is not a finite number").into())
            }
            ValueKind::Boolean => parse_bool(raw).map(Value::Bool),
            ValueKind::Json => Ok(serde_json::from_str(raw)?),
        }
    }

    fn type_name(&self) -> &str {
        self.as_str()
    }
}

fn parse_bool(raw: &str) -> Result<bool, ConversionError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("'{raw}' is not a boolean").into()),
    }
}

/// Adapts a closure into a [`Converter`].
pub(crate) struct FnConverter<F> {
    f: F,
}

impl<F> FnConverter<F> {
    pub(crate) fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, T, E> Converter for FnConverter<F>
where
    F: Fn(&str) -> Result<T, E>,
    T: Into<Value>,
    E: Into<ConversionError>,
{
    fn convert(&self, raw: &str) -> Result<Value, ConversionError> {
        (self.f)(raw).map(Into::into).map_err(Into::into)
    }
}

/// Converts through `FromStr` and then into a JSON value.
pub(crate) struct ParseConverter<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> ParseConverter<T> {
    pub(crate) fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Converter for ParseConverter<T>
where
    T: FromStr + Serialize,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    fn convert(&self, raw: &str) -> Result<Value, ConversionError> {
        let parsed = raw.parse::<T>()?;
        Ok(serde_json::to_value(parsed)?)
    }

    fn type_name(&self) -> &str {
        std::any::type_name::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_is_identity() {
        assert_eq!(
            ValueKind::String.convert(" raw value ").unwrap(),
            json!(" raw value ")
        );
    }

    #[test]
    fn test_integer() {
        assert_eq!(ValueKind::Integer.convert("8080").unwrap(), json!(8080));
        assert_eq!(ValueKind::Integer.convert("-3").unwrap(), json!(-3));

        let err = ValueKind::Integer.convert("eighty").unwrap_err();
        assert_eq!(err.to_string(), "invalid digit found in string");
    }

    #[test]
    fn test_float() {
        assert_eq!(ValueKind::Float.convert("0.5").unwrap(), json!(0.5));
        assert!(ValueKind::Float.convert("inf").is_err());
        assert!(ValueKind::Float.convert("abc").is_err());
    }

    #[test]
    fn test_boolean() {
        for raw in ["true", "TRUE", "1", "yes", "on"] {
            assert_eq!(ValueKind::Boolean.convert(raw).unwrap(), json!(true), "{raw}");
        }
        for raw in ["false", "0", "No", "off"] {
            assert_eq!(ValueKind::Boolean.convert(raw).unwrap(), json!(false), "{raw}");
        }

        let err = ValueKind::Boolean.convert("maybe").unwrap_err();
        assert_eq!(err.to_string(), "'maybe' is not a boolean");
    }

    #[test]
    fn test_json() {
        assert_eq!(
            ValueKind::Json.convert(r#"{"hosts":["a","b"]}"#).unwrap(),
            json!({"hosts": ["a", "b"]})
        );
        assert!(ValueKind::Json.convert("{not json").is_err());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("int".parse::<ValueKind>().unwrap(), ValueKind::Integer);
        assert_eq!("Boolean".parse::<ValueKind>().unwrap(), ValueKind::Boolean);
        assert!("date".parse::<ValueKind>().is_err());
        assert_eq!(ValueKind::Float.to_string(), "float");
    }

    #[test]
    fn test_fn_converter() {
        let upper = FnConverter::new(|raw: &str| Ok::<_, ConversionError>(raw.to_uppercase()));
        assert_eq!(upper.convert("abc").unwrap(), json!("ABC"));
        assert_eq!(upper.type_name(), "custom");

        let failing = FnConverter::new(|_: &str| Err::<String, _>("intentional failure"));
        assert_eq!(
            failing.convert("boom").unwrap_err().to_string(),
            "intentional failure"
        );
    }

    #[test]
    fn test_parse_converter() {
        let port = ParseConverter::<u16>::new();
        assert_eq!(port.convert("443").unwrap(), json!(443));
        assert!(port.convert("70000").is_err());
        assert_eq!(port.type_name(), "u16");
    }
}
