//! Environment variable validation with helpful warnings
//!
//! Invalid values fall back to a default and log a warning with a
//! Levenshtein-based typo suggestion.

use crate::domain::services::closest_match;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    /// Create a new validator for the given environment variable
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, returning `default` (and logging a warning) if invalid
    pub fn parse<T, F>(&self, value: &str, parser: F, default: T) -> T
    where
        F: Fn(&str) -> Option<T>,
    {
        match parser(value) {
            Some(parsed) => parsed,
            None => {
                tracing::warn!("{}", self.warning(value));
                default
            }
        }
    }

    /// Operator-facing warning for an invalid value
    pub fn warning(&self, value: &str) -> String {
        let suggestion = closest_match(value, self.valid_values.iter().copied())
            .map(|s| format!(". Did you mean '{}'?", s))
            .unwrap_or_default();
        format!(
            "Invalid {} value '{}'{} (valid values: {})",
            self.var_name,
            value,
            suggestion,
            self.valid_values.join(", ")
        )
    }
}
