//! In-memory probes and capability mocks for testing.
//!
//! Provides [`RecordingFactory`] / [`RecordingRenderer`] for observing
//! renderer lifecycles (creation, render, disposal order), plus canned
//! implementations of the injectable host capabilities.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::RenderError;
use crate::location::DataLocation;
use crate::options::{DataFetch, NestedRender, RendererOptions};
use crate::renderer::{RenderFuture, Renderer, RendererFactory};
use crate::surface::Surface;

/// One observable step in a probe renderer's life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    /// The factory created instance `id` for `mime_type`.
    Created {
        /// Sequential instance id, starting at 0.
        id: usize,
        /// Mime type the instance was created for.
        mime_type: String,
    },
    /// Instance `id` rendered `location`.
    Rendered {
        /// Instance id.
        id: usize,
        /// The exact location passed to `render`.
        location: DataLocation,
    },
    /// Instance `id` was disposed.
    Disposed {
        /// Instance id.
        id: usize,
    },
}

/// Shared, ordered log of [`ProbeEvent`]s.
pub type ProbeLog = Arc<Mutex<Vec<ProbeEvent>>>;

/// Renderer that records its lifecycle into a shared log.
///
/// Produced by [`RecordingFactory`]; not constructed directly.
pub struct RecordingRenderer {
    id: usize,
    log: ProbeLog,
    surface: Surface,
    disposed: bool,
}

impl Renderer for RecordingRenderer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn render<'a>(&'a mut self, location: &'a DataLocation) -> RenderFuture<'a> {
        self.log.lock().unwrap().push(ProbeEvent::Rendered {
            id: self.id,
            location: location.clone(),
        });
        Box::pin(async { Ok(()) })
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.log
            .lock()
            .unwrap()
            .push(ProbeEvent::Disposed { id: self.id });
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Factory producing [`RecordingRenderer`]s with sequential ids.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rdv_registry::{RendererOptions, RendererRegistry};
/// use rdv_registry::mock::{ProbeEvent, RecordingFactory};
///
/// let factory = RecordingFactory::new(&["image/png"]);
/// let log = factory.log();
///
/// let mut registry = RendererRegistry::new();
/// registry.add_factory(Arc::new(factory));
/// registry.create_renderer(&RendererOptions::new("image/png")).unwrap();
///
/// assert!(matches!(
///     log.lock().unwrap()[0],
///     ProbeEvent::Created { id: 0, .. }
/// ));
/// ```
pub struct RecordingFactory {
    mime_types: Vec<&'static str>,
    log: ProbeLog,
    next_id: AtomicUsize,
}

impl RecordingFactory {
    /// Create a factory answering for `mime_types`, with a fresh log.
    #[must_use]
    pub fn new(mime_types: &[&'static str]) -> Self {
        Self {
            mime_types: mime_types.to_vec(),
            log: Arc::default(),
            next_id: AtomicUsize::new(0),
        }
    }

    /// Handle to the shared event log.
    ///
    /// Take this before moving the factory into a registry.
    #[must_use]
    pub fn log(&self) -> ProbeLog {
        Arc::clone(&self.log)
    }
}

impl RendererFactory for RecordingFactory {
    fn mime_types(&self) -> &[&str] {
        &self.mime_types
    }

    fn create(&self, options: &RendererOptions) -> Box<dyn Renderer> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(ProbeEvent::Created {
            id,
            mime_type: options.mime_type.clone(),
        });
        Box::new(RecordingRenderer {
            id,
            log: Arc::clone(&self.log),
            surface: Surface::new(),
            disposed: false,
        })
    }
}

/// Canned [`DataFetch`] backed by a URL → JSON map.
#[derive(Default)]
pub struct MockFetch {
    responses: HashMap<String, Value>,
}

impl MockFetch {
    /// Create a fetch with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `value` for requests to `url`.
    #[must_use]
    pub fn with_response(mut self, url: impl Into<String>, value: Value) -> Self {
        self.responses.insert(url.into(), value);
        self
    }
}

impl DataFetch for MockFetch {
    fn get_json(&self, url: &str) -> Result<Value, RenderError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| RenderError::Fetch {
                url: url.to_owned(),
                message: "no canned response".to_owned(),
            })
    }
}

/// Canned [`NestedRender`] that wraps the value in a marker element.
#[derive(Debug, Default)]
pub struct MockNested;

impl NestedRender for MockNested {
    fn render(&self, mime_type: &str, data: &Value) -> Result<String, RenderError> {
        Ok(format!("<div data-mime=\"{mime_type}\">{data}</div>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recording_lifecycle_order() {
        let factory = RecordingFactory::new(&["image/png"]);
        let log = factory.log();

        let mut renderer = factory.create(&RendererOptions::new("image/png"));
        let location = DataLocation::new("image/png", "https://x/a.png");
        tokio_test::block_on(renderer.render(&location)).unwrap();
        renderer.dispose();
        renderer.dispose(); // second dispose records nothing

        let events = log.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                ProbeEvent::Created {
                    id: 0,
                    mime_type: "image/png".to_owned()
                },
                ProbeEvent::Rendered {
                    id: 0,
                    location: location.clone()
                },
                ProbeEvent::Disposed { id: 0 },
            ]
        );
    }

    #[test]
    fn test_mock_fetch_misses_unknown_urls() {
        let fetch = MockFetch::new().with_response("https://x/meta", serde_json::json!({"a": 1}));
        assert_eq!(
            fetch.get_json("https://x/meta").unwrap(),
            serde_json::json!({"a": 1})
        );
        assert!(matches!(
            fetch.get_json("https://x/other"),
            Err(RenderError::Fetch { .. })
        ));
    }
}
