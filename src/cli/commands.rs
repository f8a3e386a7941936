//! CLI commands and argument parsing
//!
//! Variables are declared on the command line as comma-separated specs, e.g.
//! `--var name=PORT,type=integer,project=apiServer,flag=--port,default=3000`.
//! Tokens after `--` form the argument vector that flags are looked up in.

use crate::error::{EnvGroupError, Result};
use crate::resolver::{Converter, ProcessEnv, Resolver, ValueKind, VariableDefinition};
use crate::utils::format::{render_definitions, render_resolved, OutputFormat};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "envgroup")]
#[command(about = "Resolve grouped configuration variables from flags and the environment")]
#[command(version, author)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "table",
        env = "ENVGROUP_FORMAT"
    )]
    pub format: OutputFormat,

    /// Disable colored table headers
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve variables from the environment and the arguments after `--`
    Resolve {
        /// Variable spec: name=NAME[,type=T][,project=P][,flag=F][,default=V][,required][,warn-only]
        #[arg(short, long = "var", value_name = "SPEC", required = true, value_parser = parse_var_spec)]
        vars: Vec<VarSpec>,
        /// Argument vector searched for variable flags
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// List variable definitions without resolving them
    Describe {
        /// Variable spec (see `resolve --help`)
        #[arg(short, long = "var", value_name = "SPEC", required = true, value_parser = parse_var_spec)]
        vars: Vec<VarSpec>,
    },
}

/// A variable definition as written on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct VarSpec {
    pub name: String,
    pub kind: ValueKind,
    pub project: Option<String>,
    pub flag: Option<String>,
    pub default: Option<Value>,
    pub required: bool,
    pub warn_only: bool,
}

impl VarSpec {
    pub fn to_definition(&self) -> VariableDefinition {
        let mut def = VariableDefinition::new(&self.name)
            .kind(self.kind)
            .required(self.required);

        if let Some(project) = &self.project {
            def = def.project(project);
        }
        if let Some(flag) = &self.flag {
            def = def.flag(flag);
        }
        if let Some(default) = &self.default {
            def = def.default_value(default.clone());
        }
        if self.warn_only {
            def = def.quit_on_missing(false);
        }

        def
    }
}

/// Parse a `key=value,...` variable spec.
///
/// The default is converted with the spec's type here, once, because the
/// resolver stores defaults as they are given.
pub fn parse_var_spec(s: &str) -> Result<VarSpec> {
    let mut name = None;
    let mut kind = ValueKind::String;
    let mut project = None;
    let mut flag = None;
    let mut default_raw = None;
    let mut required = false;
    let mut warn_only = false;

    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('=') {
            Some((key, value)) => {
                let value = value.trim().to_string();
                match key.trim() {
                    "name" => name = Some(value),
                    "type" => {
                        kind = value
                            .parse::<ValueKind>()
                            .map_err(EnvGroupError::invalid_definition)?
                    }
                    "project" => project = Some(value),
                    "flag" => flag = Some(value),
                    "default" => default_raw = Some(value),
                    other => {
                        return Err(EnvGroupError::invalid_definition(format!(
                            "unknown key '{other}' in `{s}`"
                        )))
                    }
                }
            }
            None => match part {
                "required" => required = true,
                "warn-only" => warn_only = true,
                other => {
                    return Err(EnvGroupError::invalid_definition(format!(
                        "unknown switch '{other}' in `{s}`"
                    )))
                }
            },
        }
    }

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| EnvGroupError::invalid_definition(format!("no name given in `{s}`")))?;

    let default = default_raw
        .map(|raw| {
            kind.convert(&raw).map_err(|e| {
                EnvGroupError::invalid_definition(format!("default for {name}: {e}"))
            })
        })
        .transpose()?;

    Ok(VarSpec {
        name,
        kind,
        project,
        flag,
        default,
        required,
        warn_only,
    })
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        info!("Starting envgroup");

        match self.command {
            Commands::Resolve { vars, args } => {
                let resolver = build_resolver(&vars);
                debug!(
                    "Resolving {} variables against {} arguments",
                    resolver.definitions().len(),
                    args.len()
                );
                let resolved = resolver.resolve_with(&ProcessEnv, &args)?;
                println!("{}", render_resolved(&resolved, self.format, self.no_color)?);
            }
            Commands::Describe { vars } => {
                let resolver = build_resolver(&vars);
                println!(
                    "{}",
                    render_definitions(resolver.definitions(), self.format, self.no_color)?
                );
            }
        }

        Ok(())
    }
}

fn build_resolver(specs: &[VarSpec]) -> Resolver {
    let mut resolver = Resolver::new();
    for spec in specs {
        resolver.register(spec.to_definition());
    }
    resolver
}
