//! Cloud Run service id value object

use std::fmt;

use serde::Serialize;

/// Shortest service id the grammar accepts: one leading and one trailing character
pub const MIN_SERVICE_ID_LEN: usize = 2;

/// Longest service id Cloud Run accepts
pub const MAX_SERVICE_ID_LEN: usize = 63;

/// A service id that satisfies the Cloud Run naming grammar:
/// lowercase ASCII letters, digits and interior dashes, starting and ending
/// with an alphanumeric character, 2 to 63 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CloudRunServiceId(String);

impl CloudRunServiceId {
    pub fn parse(raw: &str) -> Option<Self> {
        valid_cloud_run_service_id(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CloudRunServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check `raw` against `^[a-z0-9][a-z0-9-]*[a-z0-9]$` with length < 64.
pub fn valid_cloud_run_service_id(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    let edge = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();

    (MIN_SERVICE_ID_LEN..=MAX_SERVICE_ID_LEN).contains(&bytes.len())
        && edge(first)
        && edge(last)
        && bytes.iter().all(|b| edge(b) || *b == b'-')
}
