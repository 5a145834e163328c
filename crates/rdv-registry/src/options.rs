//! Renderer creation options and injected host capabilities.
//!
//! Renderers receive everything they need from the host at construction
//! time through [`RendererOptions`]. There is deliberately no process-wide
//! slot for borrowing host machinery; a renderer that needs the host's own
//! rendering capability, or network access for auxiliary metadata, gets it
//! as an explicit capability here.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::RenderError;

/// Blocking JSON-over-HTTP fetch capability.
///
/// Renderers that need auxiliary metadata (map bounds, dataset listings)
/// receive this through their creation options instead of owning an HTTP
/// client. Implementations may block; async renderers drive calls through
/// `tokio::task::spawn_blocking`.
pub trait DataFetch: Send + Sync {
    /// Fetch `url` and parse the response body as JSON.
    fn get_json(&self, url: &str) -> Result<Value, RenderError>;
}

/// The host engine's own rendering capability, for nested payloads.
///
/// Used where a renderer wants an inner value (e.g. a JSON summary) drawn
/// by the host's regular mime renderer rather than by its own markup.
pub trait NestedRender: Send + Sync {
    /// Render `data` as `mime_type`, returning the produced fragment.
    fn render(&self, mime_type: &str, data: &Value) -> Result<String, RenderError>;
}

/// Capabilities the embedding host grants to renderers.
#[derive(Clone, Default)]
pub struct HostCapabilities {
    /// JSON fetch for auxiliary requests.
    pub fetch: Option<Arc<dyn DataFetch>>,
    /// Nested rendering through the host engine.
    pub nested: Option<Arc<dyn NestedRender>>,
}

impl fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("fetch", &self.fetch.is_some())
            .field("nested", &self.nested.is_some())
            .finish()
    }
}

/// Options handed to a factory when creating a renderer.
///
/// The bridge dispatcher builds these by merging its stored base
/// capabilities with the content type extracted from the incoming payload.
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Mime type the renderer is being created for.
    pub mime_type: String,
    /// Injected host capabilities.
    pub host: HostCapabilities,
}

impl RendererOptions {
    /// Options for `mime_type` with no host capabilities.
    #[must_use]
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            host: HostCapabilities::default(),
        }
    }

    /// Attach host capabilities.
    #[must_use]
    pub fn with_host(mut self, host: HostCapabilities) -> Self {
        self.host = host;
        self
    }
}
