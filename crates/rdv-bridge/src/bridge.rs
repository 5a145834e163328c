//! The bridge dispatcher.

use rdv_registry::{
    DataLocation, HostCapabilities, RegistryError, RenderError, Renderer, RendererOptions,
    RendererRegistry, Surface,
};
use rdv_renderers::{dataset_metadata_factory, default_factories, tiled_map_factory};

use crate::model::HostModel;

/// The well-known content type under which hosts deliver dataset payloads.
///
/// The value stored under this key in a [`HostModel`] must structurally
/// match [`DataLocation`]: `{ "mimeType": "...", "url": "..." }`.
pub const DATASET_MIME_TYPE: &str = "application/vnd.rdv.dataset+json";

/// Errors surfaced by [`DataBridge::render_model`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No factory is bound for the payload's content type.
    ///
    /// Deliberately not caught here: the host has no fallback renderer for
    /// the dataset type, so the misconfiguration must cross the bridge
    /// boundary unchanged for the host to attribute it.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The mounted renderer's own render failed. Forwarded transparently.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The payload under the dataset key is not a data location.
    #[error("invalid dataset payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    /// The bridge was already disposed.
    #[error("render requested on a disposed bridge")]
    Disposed,
}

/// The renderer a host engine instantiates for [`DATASET_MIME_TYPE`]
/// payloads.
///
/// Owns one [`RendererRegistry`] and the currently mounted renderer, if
/// any. Ownership is transitively exclusive: the bridge owns the registry
/// and the current renderer; the registry owns no renderer instances.
///
/// At most one renderer is mounted at a time. Mounting a replacement
/// always disposes the previous renderer first, so repeated render cycles
/// on the same bridge never accumulate resources. There is no cancellation
/// mechanism: if a render request arrives while a prior renderer's render
/// is still suspended, that prior call is orphaned, and side effects it
/// produces afterwards land on a disposed renderer.
pub struct DataBridge {
    host: HostCapabilities,
    registry: RendererRegistry,
    current: Option<Box<dyn Renderer>>,
    disposed: bool,
}

impl DataBridge {
    /// Create a bridge with the default registry: the stock media
    /// factories plus the tiled-map and dataset-metadata factories.
    #[must_use]
    pub fn new(host: HostCapabilities) -> Self {
        let mut registry = RendererRegistry::with_factories(default_factories());
        registry.add_factory(tiled_map_factory());
        registry.add_factory(dataset_metadata_factory());
        Self::with_registry(host, registry)
    }

    /// Create a bridge around a caller-supplied registry.
    #[must_use]
    pub fn with_registry(host: HostCapabilities, registry: RendererRegistry) -> Self {
        Self {
            host,
            registry,
            current: None,
            disposed: false,
        }
    }

    /// Render the data location embedded in `model`.
    ///
    /// A model without the dataset payload is not an error; it simply has
    /// nothing for this bridge to show, and any mounted renderer is left
    /// untouched. With a payload present, the previous renderer is
    /// disposed, a new one is created for the payload's mime type, mounted
    /// and rendered; this call's completion is the inner render's
    /// completion.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Disposed`] after [`dispose`](Self::dispose)
    /// - [`DispatchError::InvalidPayload`] when the payload does not
    ///   deserialize into a [`DataLocation`]
    /// - [`DispatchError::Registry`] when no factory is bound for the
    ///   payload's mime type
    /// - [`DispatchError::Render`] when the mounted renderer's render fails
    pub async fn render_model(&mut self, model: &HostModel) -> Result<(), DispatchError> {
        if self.disposed {
            return Err(DispatchError::Disposed);
        }

        let Some(payload) = model.get(DATASET_MIME_TYPE) else {
            return Ok(());
        };
        let location: DataLocation =
            serde_json::from_value(payload.clone()).map_err(DispatchError::InvalidPayload)?;

        // Tear the previous renderer down before the replacement exists so
        // at most one renderer's resources are live at any instant.
        if let Some(mut previous) = self.current.take() {
            previous.dispose();
        }

        let options =
            RendererOptions::new(location.mime_type.clone()).with_host(self.host.clone());
        let renderer = self.registry.create_renderer(&options)?;
        tracing::debug!(
            mime_type = %location.mime_type,
            url = %location.url,
            "Dispatching render"
        );

        let renderer = self.current.insert(renderer);
        renderer.render(&location).await?;
        Ok(())
    }

    /// Dispose the bridge and whatever renderer is mounted.
    ///
    /// Idempotent. Afterwards [`render_model`](Self::render_model) fails
    /// with [`DispatchError::Disposed`].
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(mut renderer) = self.current.take() {
            renderer.dispose();
        }
    }

    /// The registry backing this bridge.
    #[must_use]
    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Mutable registry access — the extension surface for embedders
    /// adding or overriding supported content types.
    pub fn registry_mut(&mut self) -> &mut RendererRegistry {
        &mut self.registry
    }

    /// Surface of the currently mounted renderer, if any.
    #[must_use]
    pub fn current_surface(&self) -> Option<&Surface> {
        self.current.as_deref().map(|renderer| renderer.surface())
    }

    /// Whether the bridge reached its terminal state.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for DataBridge {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use rdv_registry::mock::{ProbeEvent, RecordingFactory};

    use super::*;

    fn dataset_model(mime_type: &str, url: &str) -> HostModel {
        HostModel::new().with_entry(
            DATASET_MIME_TYPE,
            json!({ "mimeType": mime_type, "url": url }),
        )
    }

    fn probe_bridge(mime_types: &[&'static str]) -> (DataBridge, rdv_registry::mock::ProbeLog) {
        let factory = RecordingFactory::new(mime_types);
        let log = factory.log();
        let mut registry = RendererRegistry::new();
        registry.add_factory(Arc::new(factory));
        (
            DataBridge::with_registry(HostCapabilities::default(), registry),
            log,
        )
    }

    #[tokio::test]
    async fn test_previous_renderer_disposed_before_next_created() {
        let (mut bridge, log) = probe_bridge(&["image/png", "video/mp4"]);

        bridge
            .render_model(&dataset_model("image/png", "https://x/a.png"))
            .await
            .unwrap();
        bridge
            .render_model(&dataset_model("video/mp4", "https://x/b.mp4"))
            .await
            .unwrap();

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
                    location: DataLocation::new("image/png", "https://x/a.png")
                },
                ProbeEvent::Disposed { id: 0 },
                ProbeEvent::Created {
                    id: 1,
                    mime_type: "video/mp4".to_owned()
                },
                ProbeEvent::Rendered {
                    id: 1,
                    location: DataLocation::new("video/mp4", "https://x/b.mp4")
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_model_without_dataset_key_is_not_an_error() {
        let (mut bridge, log) = probe_bridge(&["image/png"]);

        bridge
            .render_model(&dataset_model("image/png", "https://x/a.png"))
            .await
            .unwrap();
        let events_before = log.lock().unwrap().len();

        let unrelated = HostModel::new().with_entry("text/plain", json!("hello"));
        bridge.render_model(&unrelated).await.unwrap();

        // Mounted renderer untouched; no dispose, no new instance.
        assert_eq!(log.lock().unwrap().len(), events_before);
        assert!(bridge.current_surface().is_some());
    }

    #[tokio::test]
    async fn test_location_reaches_renderer_unchanged() {
        let (mut bridge, log) = probe_bridge(&["audio/mp3"]);

        bridge
            .render_model(&dataset_model("audio/mp3", "https://x/a.mp3"))
            .await
            .unwrap();

        let events = log.lock().unwrap().clone();
        assert_eq!(
            events[1],
            ProbeEvent::Rendered {
                id: 0,
                location: DataLocation::new("audio/mp3", "https://x/a.mp3")
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_content_type_propagates() {
        let (mut bridge, _log) = probe_bridge(&["image/png"]);

        let err = bridge
            .render_model(&dataset_model("application/x-nope", "https://x/d"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Registry(RegistryError::UnknownContentType { ref mime_type })
                if mime_type == "application/x-nope"
        ));
    }

    #[tokio::test]
    async fn test_invalid_payload_leaves_current_mounted() {
        let (mut bridge, log) = probe_bridge(&["image/png"]);

        bridge
            .render_model(&dataset_model("image/png", "https://x/a.png"))
            .await
            .unwrap();
        let events_before = log.lock().unwrap().len();

        let malformed = HostModel::new().with_entry(DATASET_MIME_TYPE, json!("not a location"));
        let err = bridge.render_model(&malformed).await.unwrap_err();
        assert!(matches!(err, DispatchError::InvalidPayload(_)));

        // The payload is validated before the old renderer is torn down.
        assert_eq!(log.lock().unwrap().len(), events_before);
        assert!(bridge.current_surface().is_some());
    }

    #[tokio::test]
    async fn test_dispose_disposes_mounted_renderer() {
        let (mut bridge, log) = probe_bridge(&["image/png"]);

        bridge
            .render_model(&dataset_model("image/png", "https://x/a.png"))
            .await
            .unwrap();
        bridge.dispose();
        bridge.dispose(); // idempotent

        let events = log.lock().unwrap().clone();
        assert_eq!(events.last(), Some(&ProbeEvent::Disposed { id: 0 }));
        assert!(bridge.is_disposed());
        assert!(bridge.current_surface().is_none());

        let err = bridge
            .render_model(&dataset_model("image/png", "https://x/a.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Disposed));
    }

    #[tokio::test]
    async fn test_drop_disposes_mounted_renderer() {
        let (mut bridge, log) = probe_bridge(&["image/png"]);
        bridge
            .render_model(&dataset_model("image/png", "https://x/a.png"))
            .await
            .unwrap();
        drop(bridge);

        let events = log.lock().unwrap().clone();
        assert_eq!(events.last(), Some(&ProbeEvent::Disposed { id: 0 }));
    }

    #[tokio::test]
    async fn test_registry_mut_allows_override() {
        let mut bridge = DataBridge::new(HostCapabilities::default());

        let replacement = RecordingFactory::new(&["image/png"]);
        let log = replacement.log();
        bridge.registry_mut().add_factory(Arc::new(replacement));

        bridge
            .render_model(&dataset_model("image/png", "https://x/a.png"))
            .await
            .unwrap();
        assert_eq!(log.lock().unwrap().len(), 2); // created + rendered
    }

    #[test]
    fn test_default_registry_contents() {
        let bridge = DataBridge::new(HostCapabilities::default());
        for mime_type in [
            "image/png",
            "video/mp4",
            "audio/mp3",
            "application/pdf",
            "image/geotiff",
            "application/x-hdf5",
        ] {
            assert!(
                bridge.registry().has_mime_type(mime_type),
                "missing {mime_type}"
            );
        }
        assert!(!bridge.registry().has_mime_type("text/html"));
    }
}
