//! Domain Policies
//!
//! Declarative validation rules for the hosting configuration.

pub mod hosting_rules;
pub mod schema;

pub use hosting_rules::{
    CLOUD_RUN_RULES, FUNCTIONS_RULES, FUNCTION_REWRITE_RULES, HOSTING_ENTRY_RULES,
};
pub use schema::{validate_record, FieldKind, FieldRule, RuleContext, Violation};
