//! Mime-type-to-factory mapping; the dispatch authority.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::options::RendererOptions;
use crate::renderer::{Renderer, RendererFactory};

/// A registry for renderers that know how to render remote (potentially
/// large) data.
///
/// Renderers registered here are only ever handed a
/// [`DataLocation`](crate::DataLocation): a URL acting as an entry point to
/// the data, which may be as simple as a static image or as complex as a
/// query-capable API. The registry itself never touches the data.
///
/// The mapping is a flat single-valued map: each mime type is bound to at
/// most one factory, lookup is O(1) and deterministic, and registering a
/// factory for an already-bound type silently overwrites the previous
/// binding. That last-write-wins rule is the override mechanism — an
/// embedder replaces a default renderer by registering its own factory for
/// the same type, with no separate replace operation.
///
/// The registry holds no renderer instances. Ownership of created
/// renderers rests entirely with the caller.
#[derive(Default)]
pub struct RendererRegistry {
    factories: HashMap<String, Arc<dyn RendererFactory>>,
}

impl RendererRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `factories`.
    #[must_use]
    pub fn with_factories<I>(factories: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn RendererFactory>>,
    {
        let mut registry = Self::new();
        for factory in factories {
            registry.add_factory(factory);
        }
        registry
    }

    /// Bind every mime type advertised by `factory` to it.
    ///
    /// Overwrites any prior binding for the same type. Keys are not
    /// validated; registering an empty mime type is the caller's
    /// responsibility.
    pub fn add_factory(&mut self, factory: Arc<dyn RendererFactory>) {
        for mime_type in factory.mime_types() {
            let previous = self
                .factories
                .insert((*mime_type).to_owned(), Arc::clone(&factory));
            if previous.is_some() {
                tracing::debug!(mime_type = %mime_type, "Overwriting renderer factory binding");
            } else {
                tracing::debug!(mime_type = %mime_type, "Registered renderer factory");
            }
        }
    }

    /// Remove the binding for `mime_type`. No-op if absent.
    pub fn remove_mime_type(&mut self, mime_type: &str) {
        if self.factories.remove(mime_type).is_some() {
            tracing::debug!(mime_type = %mime_type, "Removed renderer factory binding");
        }
    }

    /// Create a renderer for the mime type carried in `options`.
    ///
    /// Synchronous; never suspends.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownContentType`] when no factory is bound for
    /// the requested type.
    pub fn create_renderer(
        &self,
        options: &RendererOptions,
    ) -> Result<Box<dyn Renderer>, RegistryError> {
        let factory =
            self.factories
                .get(&options.mime_type)
                .ok_or_else(|| RegistryError::UnknownContentType {
                    mime_type: options.mime_type.clone(),
                })?;
        Ok(factory.create(options))
    }

    /// Whether a factory is bound for `mime_type`.
    #[must_use]
    pub fn has_mime_type(&self, mime_type: &str) -> bool {
        self.factories.contains_key(mime_type)
    }

    /// All bound mime types, sorted.
    #[must_use]
    pub fn mime_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.factories.keys().cloned().collect();
        types.sort();
        types
    }
}
