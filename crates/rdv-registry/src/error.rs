//! Error types for registry dispatch and renderer execution.

/// Registry dispatch errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No factory is bound for the requested mime type.
    ///
    /// Signals a registry/usage misconfiguration: the caller asked to
    /// render a type nothing was registered for. The dispatch path never
    /// swallows this, so the host can surface it instead of showing a
    /// silently blank view.
    #[error("mime type {mime_type} is not known to the registry")]
    UnknownContentType {
        /// The type nothing was registered for.
        mime_type: String,
    },
}

/// Renderer-internal failures.
///
/// These are local to a concrete renderer and forwarded transparently
/// through the dispatcher's completion; the dispatch core neither produces
/// nor interprets them.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An auxiliary fetch failed.
    #[error("fetch of {url} failed: {message}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// Transport or HTTP-level detail.
        message: String,
    },

    /// An auxiliary document did not have the expected shape.
    #[error("invalid metadata: {0}")]
    Metadata(String),

    /// The renderer needs the fetch capability but none was injected.
    #[error("no fetch capability was provided in the renderer options")]
    FetchUnavailable,

    /// The renderer needs nested host rendering but none was injected.
    #[error("no nested render capability was provided in the renderer options")]
    NestedRenderUnavailable,

    /// A background task backing the render was cancelled.
    #[error("render task was cancelled")]
    Canceled,
}
