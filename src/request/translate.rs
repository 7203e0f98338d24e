//! Platform request to render request translation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::headers::{header, to_headers, HeaderValue, PlatformHeaders};

/// Host used when the platform forwards none
pub const DEFAULT_HOST: &str = "localhost";

/// Request translation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Request as the hosting platform hands it over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    pub method: String,
    /// Path and query, e.g. `/todos?done=true`
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: PlatformHeaders,
    #[serde(default)]
    pub raw_body: Option<Vec<u8>>,
}

/// Request body after content-type based decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum RequestBody {
    Empty,
    Text(String),
    Binary(Vec<u8>),
}

/// Request shape the render function expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    /// Absolute URL
    pub href: String,
    /// `proto://host`
    pub host: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

/// Translate a platform request.
///
/// The origin comes from `x-forwarded-proto` (default `http`) and
/// `x-forwarded-host`, falling back to `host` and then [`DEFAULT_HOST`].
pub fn to_render_request(request: &PlatformRequest) -> Result<RenderRequest, RequestError> {
    let headers = &request.headers;
    let proto = forwarded_value(headers, "x-forwarded-proto").unwrap_or("http");
    let host = forwarded_value(headers, "x-forwarded-host")
        .or_else(|| forwarded_value(headers, "host"))
        .unwrap_or(DEFAULT_HOST);
    let origin = format!("{}://{}", proto, host);

    let invalid = |message: String| RequestError::InvalidUrl {
        url: format!("{}{}", origin, request.url),
        message,
    };
    let base = Url::parse(&origin).map_err(|e| invalid(e.to_string()))?;
    let url = base.join(&request.url).map_err(|e| invalid(e.to_string()))?;

    Ok(RenderRequest {
        method: request.method.to_ascii_uppercase(),
        headers: to_headers(headers),
        host: origin,
        path: url.path().to_string(),
        query: url.query_pairs().into_owned().collect(),
        href: url.into(),
        body: decode_body(headers, request.raw_body.as_deref()),
    })
}

/// Decode as text only for textual, unencoded, valid UTF-8 payloads.
pub fn decode_body(headers: &PlatformHeaders, raw: Option<&[u8]>) -> RequestBody {
    let raw = match raw {
        None | Some([]) => return RequestBody::Empty,
        Some(raw) => raw,
    };

    let encoded = header(headers, "content-encoding")
        .and_then(HeaderValue::first)
        .is_some_and(|enc| !enc.trim().eq_ignore_ascii_case("identity"));
    let textual = header(headers, "content-type")
        .and_then(HeaderValue::first)
        .is_some_and(is_textual);

    if textual && !encoded {
        if let Ok(text) = std::str::from_utf8(raw) {
            return RequestBody::Text(text.to_string());
        }
    }
    RequestBody::Binary(raw.to_vec())
}

fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.starts_with("text/")
        || mime.ends_with("+json")
        || mime.ends_with("+xml")
        || matches!(
            mime.as_str(),
            "application/json"
                | "application/xml"
                | "application/javascript"
                | "application/x-www-form-urlencoded"
                | "application/graphql"
        )
}

/// First comma-separated element of a possibly proxied header
fn forwarded_value<'a>(headers: &'a PlatformHeaders, name: &str) -> Option<&'a str> {
    header(headers, name)
        .and_then(HeaderValue::first)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
