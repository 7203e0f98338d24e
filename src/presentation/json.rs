//! NDJSON events for `--json` output
//!
//! One JSON object per line on stdout.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::application::DeployInstructions;
use crate::domain::entities::DeploymentPlan;
use crate::domain::value_objects::ConfigWarning;

/// Write one event followed by a newline.
pub fn write_event<T: Serialize>(out: &mut impl Write, event: &T) -> io::Result<()> {
    let line =
        serde_json::to_string(event).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")
}

/// Write one event to stdout.
pub fn emit_event<T: Serialize>(event: &T) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, event)
}

/// Emitted when a command starts.
#[derive(Debug, Clone, Serialize)]
pub struct StartEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub version: &'static str,
}

impl<'a> StartEvent<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            event: "start",
            command,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Emitted once the hosting config resolved.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEvent {
    pub event: &'static str,
    pub plan: Value,
}

impl PlanEvent {
    pub fn new(plan: &DeploymentPlan) -> Self {
        Self {
            event: "plan",
            plan: plan.to_json(),
        }
    }
}

/// Emitted once staging finished.
#[derive(Debug, Clone, Serialize)]
pub struct StagedEvent<'a> {
    pub event: &'static str,
    pub instructions: &'a DeployInstructions,
}

impl<'a> StagedEvent<'a> {
    pub fn new(instructions: &'a DeployInstructions) -> Self {
        Self {
            event: "staged",
            instructions,
        }
    }
}

/// Emitted for each unknown key in the options file.
#[derive(Debug, Clone, Serialize)]
pub struct WarningEvent<'a> {
    pub event: &'static str,
    pub key: &'a str,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'a str>,
}

impl<'a> WarningEvent<'a> {
    pub fn new(warning: &'a ConfigWarning) -> Self {
        Self {
            event: "warning",
            key: &warning.key,
            file: warning.file.display().to_string(),
            line: warning.line,
            suggestion: warning.suggestion.as_deref(),
        }
    }
}

/// Emitted when a command fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent<'a> {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
    pub message: String,
}

impl<'a> ErrorEvent<'a> {
    pub fn new(code: Option<&'a str>, message: impl Into<String>) -> Self {
        Self {
            event: "error",
            code,
            message: message.into(),
        }
    }
}
