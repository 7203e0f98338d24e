//! Header coalescing

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A platform header value: one string, or one string per occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// Collapse to a single string, joining repeated values with `,`
    pub fn coalesce(&self) -> String {
        match self {
            HeaderValue::Single(value) => value.clone(),
            HeaderValue::Multiple(values) => values.join(","),
        }
    }

    /// First value, for headers where only one occurrence matters
    pub fn first(&self) -> Option<&str> {
        match self {
            HeaderValue::Single(value) => Some(value),
            HeaderValue::Multiple(values) => values.first().map(String::as_str),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Single(value.to_string())
    }
}

impl From<Vec<&str>> for HeaderValue {
    fn from(values: Vec<&str>) -> Self {
        HeaderValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Platform-native header map
pub type PlatformHeaders = BTreeMap<String, HeaderValue>;

/// Render-side headers: every value a single string, names unchanged.
pub fn to_headers(headers: &PlatformHeaders) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| (name.clone(), value.coalesce()))
        .collect()
}

/// Case-insensitive header lookup
pub fn header<'a>(headers: &'a PlatformHeaders, name: &str) -> Option<&'a HeaderValue> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}
