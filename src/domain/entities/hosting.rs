//! Hosting configuration document entities
//!
//! A `firebase.json` is read once per adapt run and never mutated. Field
//! shapes are checked by the rule tables in `domain::policies`; these types
//! give typed access to a document that may still be malformed.

use serde_json::Value;

use crate::domain::value_objects::CloudRunServiceId;

/// Parsed hosting configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct HostingConfigDocument {
    root: Value,
}

impl HostingConfigDocument {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        Ok(Self { root })
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The `hosting` field normalized to a sequence.
    ///
    /// A single record becomes a one-element sequence. `None` means there is
    /// nothing to deploy: the field is absent, empty or not a record.
    pub fn hosting_entries(&self) -> Option<Vec<HostingSiteEntry>> {
        match self.root.get("hosting")? {
            Value::Array(items) if !items.is_empty() => {
                Some(items.iter().cloned().map(HostingSiteEntry::new).collect())
            }
            record @ Value::Object(_) => Some(vec![HostingSiteEntry::new(record.clone())]),
            _ => None,
        }
    }

    /// The top-level `functions` record, if any
    pub fn functions(&self) -> Option<&Value> {
        self.root.get("functions").filter(|v| !v.is_null())
    }
}

/// One element of the `hosting` sequence
#[derive(Debug, Clone, PartialEq)]
pub struct HostingSiteEntry {
    pub site: Option<String>,
    pub target: Option<String>,
    raw: Value,
}

impl HostingSiteEntry {
    pub fn new(raw: Value) -> Self {
        Self {
            site: non_empty_str(&raw, "site"),
            target: non_empty_str(&raw, "target"),
            raw,
        }
    }

    /// Selection identifier; `target` takes precedence over `site`.
    pub fn identifier(&self) -> Option<&str> {
        self.target.as_deref().or(self.site.as_deref())
    }

    /// Every identifier this entry can be selected by, `target` first.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.target.as_deref().into_iter().chain(self.site.as_deref())
    }

    pub fn public(&self) -> Option<&str> {
        self.raw.get("public").and_then(Value::as_str)
    }

    pub fn rewrites(&self) -> Vec<RewriteRule> {
        self.raw
            .get("rewrites")
            .and_then(Value::as_array)
            .map(|rules| rules.iter().map(RewriteRule::new).collect())
            .unwrap_or_default()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Which backend a rewrite routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKind {
    Function,
    Run,
}

/// A request-routing rule inside a hosting entry
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRule {
    pub source: Option<String>,
    raw: Value,
}

impl RewriteRule {
    pub fn new(raw: &Value) -> Self {
        Self {
            source: raw.get("source").and_then(Value::as_str).map(str::to_string),
            raw: raw.clone(),
        }
    }

    /// The declared backend. A rule naming both routes to the function.
    pub fn kind(&self) -> Option<RewriteKind> {
        if self.raw.get("function").is_some_and(is_truthy) {
            Some(RewriteKind::Function)
        } else if self.raw.get("run").is_some_and(is_truthy) {
            Some(RewriteKind::Run)
        } else {
            None
        }
    }

    /// True when `source` equals `source_match` exactly and a backend is declared
    pub fn is_relevant(&self, source_match: &str) -> bool {
        self.source.as_deref() == Some(source_match) && self.kind().is_some()
    }

    /// Function name from either `"function": "name"` or
    /// `"function": {"functionId": "name"}`.
    pub fn function_name(&self) -> Option<&str> {
        match self.raw.get("function")? {
            Value::String(name) => Some(name),
            Value::Object(record) => record.get("functionId").and_then(Value::as_str),
            _ => None,
        }
    }

    pub fn run(&self) -> Option<&Value> {
        self.raw.get("run")
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Cloud Run rewrite destination, built from a validated `run` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudRunSelector {
    pub service_id: CloudRunServiceId,
    pub region: Option<String>,
}

impl CloudRunSelector {
    pub fn from_validated(run: &Value) -> Option<Self> {
        let service_id = run
            .get("serviceId")
            .and_then(Value::as_str)
            .and_then(CloudRunServiceId::parse)?;
        Some(Self {
            service_id,
            region: run.get("region").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// Top-level `functions` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionsConfig {
    pub source: String,
    pub runtime: Option<String>,
}

impl FunctionsConfig {
    pub fn from_validated(functions: &Value) -> Option<Self> {
        Some(Self {
            source: functions.get("source").and_then(Value::as_str)?.to_string(),
            runtime: functions
                .get("runtime")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// JSON truthiness as hosting configs are usually authored: `null`, `false`,
/// `0` and `""` do not count as declared.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_str(raw: &Value, field: &str) -> Option<String> {
    raw.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
