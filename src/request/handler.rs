//! Render dispatch
//!
//! The renderer is built once, on first use, and owned by whoever hosts the
//! handle. A render that produces nothing answers 404.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use super::translate::{to_render_request, PlatformRequest, RenderRequest, RequestError};

/// Response produced by a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl RenderedResponse {
    pub fn not_found() -> Self {
        Self {
            status: 404,
            headers: BTreeMap::new(),
            body: b"Not Found".to_vec(),
        }
    }
}

/// Server-side render entrypoint
pub trait Renderer {
    /// Render a request; `None` when no route answers it.
    fn render(&self, request: &RenderRequest) -> Option<RenderedResponse>;
}

impl<F> Renderer for F
where
    F: Fn(&RenderRequest) -> Option<RenderedResponse>,
{
    fn render(&self, request: &RenderRequest) -> Option<RenderedResponse> {
        self(request)
    }
}

/// Translate and render one platform request.
pub fn handle_request<R: Renderer + ?Sized>(
    renderer: &R,
    request: &PlatformRequest,
) -> Result<RenderedResponse, RequestError> {
    let request = to_render_request(request)?;
    let response = renderer.render(&request);
    tracing::debug!(
        method = %request.method,
        path = %request.path,
        rendered = response.is_some(),
        "request handled"
    );
    Ok(response.unwrap_or_else(RenderedResponse::not_found))
}

/// Lazily initialized renderer, shared across requests
pub struct RenderHandle<R> {
    renderer: OnceLock<R>,
}

impl<R> Default for RenderHandle<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RenderHandle<R> {
    pub const fn new() -> Self {
        Self {
            renderer: OnceLock::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.renderer.get().is_some()
    }

    /// The renderer, building it with `init` on the first call only.
    pub fn get_or_init(&self, init: impl FnOnce() -> R) -> &R {
        self.renderer.get_or_init(init)
    }
}

impl<R: Renderer> RenderHandle<R> {
    /// Handle a request, initializing the renderer if this is the first one.
    pub fn handle(
        &self,
        init: impl FnOnce() -> R,
        request: &PlatformRequest,
    ) -> Result<RenderedResponse, RequestError> {
        handle_request(self.get_or_init(init), request)
    }
}
