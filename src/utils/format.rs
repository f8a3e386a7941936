//! Table formatting and output utilities
//!
//! Renders resolved variables and definition listings either as styled
//! tables or as JSON.

use crate::error::Result;
use crate::resolver::{ResolvedVars, VariableDefinition};
use crossterm::terminal::size;
use serde::Serialize;
use serde_json::Value;
use tabled::{
    settings::{object::Rows, Alignment, Color, Modify, Padding, Style, Width},
    Table, Tabled,
};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct VariableRow {
    #[tabled(rename = "Project")]
    pub project: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DefinitionRow {
    #[tabled(rename = "Project")]
    pub project: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Flag")]
    pub flag: String,
    #[tabled(rename = "Type")]
    pub kind: String,
    #[tabled(rename = "Required")]
    pub required: bool,
    #[tabled(rename = "Default")]
    pub default: String,
    #[tabled(rename = "On Missing")]
    pub on_missing: String,
}

impl From<&VariableDefinition> for DefinitionRow {
    fn from(def: &VariableDefinition) -> Self {
        let on_missing = if !def.is_required() {
            "ignore"
        } else if def.quits_on_missing() {
            "fail"
        } else {
            "warn"
        };

        Self {
            project: def.project_name().to_string(),
            name: def.name().to_string(),
            flag: def.flag_name().unwrap_or("-").to_string(),
            kind: def.type_name().to_string(),
            required: def.is_required(),
            default: def.default().map_or_else(|| "-".to_string(), display_value),
            on_missing: on_missing.to_string(),
        }
    }
}

/// Strings print without quotes, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn resolved_rows(vars: &ResolvedVars) -> Vec<VariableRow> {
    vars.entries()
        .map(|(project, name, resolved)| VariableRow {
            project: project.to_string(),
            name: name.to_string(),
            value: display_value(&resolved.value),
            source: resolved.source.to_string(),
        })
        .collect()
}

pub fn render_resolved(vars: &ResolvedVars, format: OutputFormat, no_color: bool) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(vars)?),
        OutputFormat::Table => {
            let rows = resolved_rows(vars);
            if rows.is_empty() {
                return Ok("No variables resolved".to_string());
            }
            Ok(format_table(Table::new(rows), no_color))
        }
    }
}

pub fn render_definitions(
    definitions: &[VariableDefinition],
    format: OutputFormat,
    no_color: bool,
) -> Result<String> {
    let rows: Vec<DefinitionRow> = definitions.iter().map(DefinitionRow::from).collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => {
            if rows.is_empty() {
                return Ok("No variables defined".to_string());
            }
            Ok(format_table(Table::new(rows), no_color))
        }
    }
}

/// Convenience function for formatting a table with default settings
pub fn format_table(mut table: Table, no_color: bool) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .with(Padding::new(1, 1, 0, 0));

    if !no_color {
        table.with(Modify::new(Rows::first()).with(Color::FG_BLUE));
    }

    // Auto-adjust width to terminal
    if let Ok((width, _)) = size() {
        table.with(Width::wrap(width as usize));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{Resolver, ValueKind};
    use serde_json::json;
    use std::collections::HashMap;

    fn resolved() -> ResolvedVars {
        let mut env = HashMap::new();
        env.insert("DISCORD_TOKEN".to_string(), "abc123".to_string());

        Resolver::new()
            .with(
                VariableDefinition::new("DISCORD_TOKEN")
                    .project("discordBot")
                    .required(true),
            )
            .with(
                VariableDefinition::new("PORT")
                    .project("apiServer")
                    .default_value(3000),
            )
            .resolve_with(&env, &["app"])
            .unwrap()
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("abc")), "abc");
        assert_eq!(display_value(&json!(3000)), "3000");
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_resolved_rows() {
        let rows = resolved_rows(&resolved());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].project, "apiServer");
        assert_eq!(rows[0].value, "3000");
        assert_eq!(rows[0].source, "default");
        assert_eq!(rows[1].name, "DISCORD_TOKEN");
        assert_eq!(rows[1].source, "env");
    }

    #[test]
    fn test_render_resolved_table() {
        let output = render_resolved(&resolved(), OutputFormat::Table, true).unwrap();
        assert!(output.contains("DISCORD_TOKEN"));
        assert!(output.contains("abc123"));
        assert!(output.contains("Source"));
    }

    #[test]
    fn test_render_resolved_json() {
        let output = render_resolved(&resolved(), OutputFormat::Json, true).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            json!({
                "discordBot": {"DISCORD_TOKEN": "abc123"},
                "apiServer": {"PORT": 3000}
            })
        );
    }

    #[test]
    fn test_render_empty_table() {
        let output = render_resolved(&ResolvedVars::new(), OutputFormat::Table, true).unwrap();
        assert_eq!(output, "No variables resolved");
    }

    #[test]
    fn test_definition_rows() {
        let definitions = vec![
            VariableDefinition::new("PORT")
                .flag("--port")
                .kind(ValueKind::Integer)
                .default_value(3000),
            VariableDefinition::new("TOKEN")
                .required(true)
                .quit_on_missing(false),
        ];

        let output = render_definitions(&definitions, OutputFormat::Json, true).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["flag"], "--port");
        assert_eq!(parsed[0]["kind"], "integer");
        assert_eq!(parsed[0]["default"], "3000");
        assert_eq!(parsed[0]["on_missing"], "ignore");
        assert_eq!(parsed[1]["on_missing"], "warn");
        assert_eq!(parsed[1]["flag"], "-");
    }
}
