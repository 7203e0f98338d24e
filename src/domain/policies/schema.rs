//! Declarative field-rule schema
//!
//! A record is validated against an ordered table of [`FieldRule`]s by one
//! generic routine. Each rule owns the mapping from its violation to the
//! tagged [`ConfigError`], so every rule can be tested on its own.

use std::path::Path;

use serde_json::Value;

use crate::error::ConfigError;

/// Expected JSON shape of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string, including `""`
    String,
    /// A string with at least one character
    NonEmptyString,
    /// A sequence with at least one element
    NonEmptyArray,
    /// A record
    Object,
    /// Any non-null value; shape is left to the rule's check
    Any,
}

/// How a field failed its rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Absent or `null`
    Missing,
    /// Present with the wrong JSON shape
    WrongType,
    /// Present but empty
    Empty,
    /// Right shape, refused by the rule's check
    Rejected,
}

/// Context shared by every rule of one resolve run
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub config_path: &'a Path,
    pub source_match: &'a str,
}

/// One row of a rule table
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    /// Extra acceptance test on a correctly shaped value
    pub check: Option<fn(&Value) -> bool>,
    /// Build the error for a violation; receives the offending value (or `Null`)
    pub error: fn(&RuleContext<'_>, Violation, &Value) -> ConfigError,
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .finish()
    }
}

impl FieldRule {
    /// Evaluate this rule against `record`. Non-record inputs have no fields.
    pub fn evaluate(&self, record: &Value) -> Result<(), (Violation, Value)> {
        let value = match record.get(self.field) {
            None | Some(Value::Null) => {
                return if self.required {
                    Err((Violation::Missing, Value::Null))
                } else {
                    Ok(())
                };
            }
            Some(value) => value,
        };

        let shape = match (self.kind, value) {
            (FieldKind::String, Value::String(_)) => Ok(()),
            (FieldKind::NonEmptyString, Value::String(s)) if s.is_empty() => Err(Violation::Empty),
            (FieldKind::NonEmptyString, Value::String(_)) => Ok(()),
            (FieldKind::NonEmptyArray, Value::Array(items)) if items.is_empty() => {
                Err(Violation::Empty)
            }
            (FieldKind::NonEmptyArray, Value::Array(_)) => Ok(()),
            (FieldKind::Object, Value::Object(_)) => Ok(()),
            (FieldKind::Any, _) => Ok(()),
            _ => Err(Violation::WrongType),
        };
        shape.map_err(|violation| (violation, value.clone()))?;

        match self.check {
            Some(check) if !check(value) => Err((Violation::Rejected, value.clone())),
            _ => Ok(()),
        }
    }
}

/// Validate `record` against `rules` in order; the first violation wins.
pub fn validate_record(
    record: &Value,
    rules: &[FieldRule],
    ctx: &RuleContext<'_>,
) -> Result<(), ConfigError> {
    for rule in rules {
        if let Err((violation, value)) = rule.evaluate(record) {
            tracing::trace!(field = rule.field, ?violation, "field rule violated");
            return Err((rule.error)(ctx, violation, &value));
        }
    }
    Ok(())
}
