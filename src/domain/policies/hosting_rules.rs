//! Rule tables for the hosting configuration document

use serde_json::Value;

use super::schema::{FieldKind, FieldRule, RuleContext, Violation};
use crate::domain::entities::SUPPORTED_REGION;
use crate::domain::value_objects::{
    valid_cloud_function_name, valid_cloud_run_service_id, SUPPORTED_NODE_VERSIONS,
};
use crate::error::ConfigError;

/// Rules for the selected `hosting[]` entry
pub const HOSTING_ENTRY_RULES: &[FieldRule] = &[
    FieldRule {
        field: "public",
        required: true,
        kind: FieldKind::NonEmptyString,
        check: None,
        error: public_dir_error,
    },
    FieldRule {
        field: "rewrites",
        required: true,
        kind: FieldKind::NonEmptyArray,
        check: None,
        error: rewrites_error,
    },
];

/// Rules for the `run` record of a Cloud Run rewrite
pub const CLOUD_RUN_RULES: &[FieldRule] = &[
    FieldRule {
        field: "serviceId",
        required: true,
        kind: FieldKind::NonEmptyString,
        check: Some(is_service_id),
        error: service_id_error,
    },
    FieldRule {
        field: "region",
        required: false,
        kind: FieldKind::String,
        check: Some(is_supported_region),
        error: region_error,
    },
];

/// Rules for a function rewrite rule
pub const FUNCTION_REWRITE_RULES: &[FieldRule] = &[FieldRule {
    field: "function",
    required: true,
    kind: FieldKind::Any,
    check: Some(is_function_ref),
    error: function_name_error,
}];

/// Rules for the top-level `functions` record (function target only)
pub const FUNCTIONS_RULES: &[FieldRule] = &[
    FieldRule {
        field: "source",
        required: true,
        kind: FieldKind::NonEmptyString,
        check: None,
        error: functions_source_error,
    },
    FieldRule {
        field: "runtime",
        required: false,
        kind: FieldKind::String,
        check: None,
        error: runtime_error,
    },
];

fn is_service_id(value: &Value) -> bool {
    value.as_str().is_some_and(valid_cloud_run_service_id)
}

fn is_supported_region(value: &Value) -> bool {
    value.as_str() == Some(SUPPORTED_REGION)
}

fn is_function_ref(value: &Value) -> bool {
    let name = match value {
        Value::String(name) => Some(name.as_str()),
        Value::Object(record) => record.get("functionId").and_then(Value::as_str),
        _ => None,
    };
    name.is_some_and(valid_cloud_function_name)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(record) => match record.get("functionId") {
            Some(Value::String(id)) => id.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}

fn public_dir_error(ctx: &RuleContext<'_>, violation: Violation, _: &Value) -> ConfigError {
    let path = ctx.config_path.to_path_buf();
    match violation {
        Violation::Empty => ConfigError::EmptyPublicDir { path },
        _ => ConfigError::MissingPublicDir { path },
    }
}

fn rewrites_error(ctx: &RuleContext<'_>, _: Violation, _: &Value) -> ConfigError {
    ConfigError::MissingRewrites {
        path: ctx.config_path.to_path_buf(),
        source_match: ctx.source_match.to_string(),
    }
}

fn service_id_error(ctx: &RuleContext<'_>, violation: Violation, value: &Value) -> ConfigError {
    let path = ctx.config_path.to_path_buf();
    match violation {
        Violation::Rejected => ConfigError::InvalidServiceId {
            path,
            service_id: display_value(value),
        },
        _ => ConfigError::MissingServiceId { path },
    }
}

fn region_error(ctx: &RuleContext<'_>, _: Violation, value: &Value) -> ConfigError {
    ConfigError::InvalidRegion {
        path: ctx.config_path.to_path_buf(),
        region: display_value(value),
        expected: SUPPORTED_REGION.to_string(),
    }
}

fn function_name_error(ctx: &RuleContext<'_>, _: Violation, value: &Value) -> ConfigError {
    ConfigError::InvalidFunctionName {
        path: ctx.config_path.to_path_buf(),
        name: display_value(value),
    }
}

fn functions_source_error(ctx: &RuleContext<'_>, _: Violation, _: &Value) -> ConfigError {
    ConfigError::MissingFunctionsSource {
        path: ctx.config_path.to_path_buf(),
    }
}

fn runtime_error(_: &RuleContext<'_>, _: Violation, value: &Value) -> ConfigError {
    ConfigError::UnsupportedRuntime {
        declared: Some(display_value(value)),
        supported: SUPPORTED_NODE_VERSIONS.iter().map(|v| v.to_string()).collect(),
    }
}
