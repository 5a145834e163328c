//! Dataset metadata renderer for HDF5-style listings.
//!
//! The reference URL points at a metadata document, not at the dataset
//! bytes: a JSON object with an optional `"summary"` member and arbitrary
//! named group entries. The summary is rendered through the host engine's
//! own JSON renderer (injected as a capability); each group becomes a
//! heading plus a preformatted listing.

use std::fmt::Write as _;
use std::sync::Arc;

use serde_json::Value;

use rdv_registry::{
    DataFetch, DataLocation, NestedRender, RenderError, RenderFuture, Renderer, RendererFactory,
    RendererOptions, StaticFactory, Surface,
};

use crate::util::escape_html;

/// Mime types handled by [`DatasetMetadataRenderer`].
pub const METADATA_MIME_TYPES: &[&str] = &["application/x-hdf5"];

const CSS_CLASS: &str = "rdv-MetadataViewer";

/// Key of the summary member inside a metadata document.
const SUMMARY_KEY: &str = "summary";

/// A renderer for dataset metadata documents.
pub struct DatasetMetadataRenderer {
    surface: Surface,
    fetch: Option<Arc<dyn DataFetch>>,
    nested: Option<Arc<dyn NestedRender>>,
    disposed: bool,
}

impl DatasetMetadataRenderer {
    /// Create a metadata renderer, taking its capabilities from `options`.
    #[must_use]
    pub fn new(options: &RendererOptions) -> Self {
        Self {
            surface: Surface::with_class(CSS_CLASS),
            fetch: options.host.fetch.clone(),
            nested: options.host.nested.clone(),
            disposed: false,
        }
    }
}

fn group_listing(document: &serde_json::Map<String, Value>) -> String {
    let mut listing = String::new();
    for (name, entry) in document {
        if name.as_str() == SUMMARY_KEY {
            continue;
        }
        let text = match entry {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let _ = write!(
            listing,
            "<div><h1>{}</h1><pre>{}</pre></div>",
            escape_html(name),
            escape_html(&text)
        );
    }
    listing
}

impl Renderer for DatasetMetadataRenderer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn render<'a>(&'a mut self, location: &'a DataLocation) -> RenderFuture<'a> {
        Box::pin(async move {
            let fetch = self
                .fetch
                .as_ref()
                .map(Arc::clone)
                .ok_or(RenderError::FetchUnavailable)?;
            let nested = self
                .nested
                .as_ref()
                .map(Arc::clone)
                .ok_or(RenderError::NestedRenderUnavailable)?;

            let url = location.url.clone();
            tracing::debug!(url = %url, "Fetching dataset metadata");
            let document = tokio::task::spawn_blocking(move || fetch.get_json(&url))
                .await
                .map_err(|_| RenderError::Canceled)??;
            let Value::Object(document) = document else {
                return Err(RenderError::Metadata(
                    "metadata document is not a JSON object".to_owned(),
                ));
            };

            let summary = match document.get(SUMMARY_KEY) {
                Some(value) => nested.render("application/json", value)?,
                None => String::new(),
            };

            self.surface.set_html(format!(
                "<div class=\"rdv-MetadataSummary\">{summary}</div>\
                 <div class=\"rdv-MetadataListing\">{}</div>",
                group_listing(&document)
            ));
            Ok(())
        })
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.surface.clear();
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Factory for [`DatasetMetadataRenderer`].
#[must_use]
pub fn dataset_metadata_factory() -> Arc<dyn RendererFactory> {
    Arc::new(StaticFactory::new(METADATA_MIME_TYPES, |options| {
        Box::new(DatasetMetadataRenderer::new(options))
    }))
}
