//! Renderer and factory contracts.

use std::future::Future;
use std::pin::Pin;

use crate::error::RenderError;
use crate::location::DataLocation;
use crate::options::RendererOptions;
use crate::surface::Surface;

/// Completion of a renderer's [`render`](Renderer::render) call.
pub type RenderFuture<'a> = Pin<Box<dyn Future<Output = Result<(), RenderError>> + Send + 'a>>;

/// A renderer for remote data.
///
/// Structural capability, no base type: anything with a surface, a one-shot
/// asynchronous `render`, and a disposal operation qualifies. Instances are
/// created fresh per render cycle by a [`RendererFactory`] and are never
/// reused across two data locations.
pub trait Renderer: Send {
    /// The visual node this renderer draws into.
    fn surface(&self) -> &Surface;

    /// Render the data at `location`.
    ///
    /// Invoked exactly once per instance. The returned future is the
    /// renderer's declared completion; asynchronous work the renderer
    /// triggers without awaiting it here is not covered by that completion.
    fn render<'a>(&'a mut self, location: &'a DataLocation) -> RenderFuture<'a>;

    /// Release internal resources. Idempotent.
    fn dispose(&mut self);

    /// Whether [`dispose`](Renderer::dispose) has run.
    fn is_disposed(&self) -> bool;
}

impl std::fmt::Debug for dyn Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

/// A factory advertising the content types it can render.
///
/// Factories are immutable capability records: a non-empty set of mime
/// types plus a constructor. The same factory value may be shared across
/// registries.
pub trait RendererFactory: Send + Sync {
    /// Mime types this factory answers for. Must be non-empty.
    fn mime_types(&self) -> &[&str];

    /// Create a fresh renderer for one render cycle.
    fn create(&self, options: &RendererOptions) -> Box<dyn Renderer>;
}

/// Record-style factory: a static mime type list plus a build function.
///
/// Covers the common case where a factory carries no state of its own.
pub struct StaticFactory {
    mime_types: &'static [&'static str],
    build: fn(&RendererOptions) -> Box<dyn Renderer>,
}

impl StaticFactory {
    /// Create a factory from a mime type list and a build function.
    #[must_use]
    pub fn new(
        mime_types: &'static [&'static str],
        build: fn(&RendererOptions) -> Box<dyn Renderer>,
    ) -> Self {
        Self { mime_types, build }
    }
}

impl RendererFactory for StaticFactory {
    fn mime_types(&self) -> &[&str] {
        self.mime_types
    }

    fn create(&self, options: &RendererOptions) -> Box<dyn Renderer> {
        (self.build)(options)
    }
}
