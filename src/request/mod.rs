//! Runtime request adapter
//!
//! Mirrors what the generated `handler.js` does at request time: coalesce
//! platform headers, rebuild the absolute URL from forwarding headers, and
//! hand the request to a lazily built renderer.

mod handler;
mod headers;
mod translate;

pub use handler::{handle_request, RenderHandle, RenderedResponse, Renderer};
pub use headers::{header, to_headers, HeaderValue, PlatformHeaders};
pub use translate::{
    decode_body, to_render_request, PlatformRequest, RenderRequest, RequestBody, RequestError,
    DEFAULT_HOST,
};
