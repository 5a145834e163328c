//! Concrete renderers for remote data.
//!
//! Every renderer here satisfies the `rdv-registry` contract: it owns a
//! [`Surface`](rdv_registry::Surface), renders exactly one
//! [`DataLocation`](rdv_registry::DataLocation), and is disposed by its
//! owner when superseded. None of them contain dispatch logic; the mapping
//! from mime type to renderer lives in the registry.
//!
//! - [`ImageRenderer`], [`VideoRenderer`], [`AudioRenderer`],
//!   [`PdfRenderer`]: direct media embeds
//! - [`TiledMapRenderer`]: cloud-optimized GeoTIFF datasets on a tiled map
//! - [`DatasetMetadataRenderer`]: HDF5-style metadata listings
//!
//! [`default_factories`] returns the stock media set; deployments add the
//! map and metadata factories on top (the bridge's default registry does).

use std::sync::Arc;

use rdv_registry::RendererFactory;

mod fetch;
mod map;
mod media;
mod metadata;
mod util;

pub use fetch::HttpFetch;
pub use map::{
    GEOTIFF_MIME_TYPE, MAP_MIME_TYPES, TILE_SERVICE_URL, TileLayer, TiledMapRenderer, Viewport,
    tiled_map_factory,
};
pub use media::{
    AUDIO_MIME_TYPES, AudioRenderer, IMAGE_MIME_TYPES, ImageRenderer, PDF_MIME_TYPES, PdfRenderer,
    VIDEO_MIME_TYPES, VideoRenderer, audio_factory, image_factory, pdf_factory, video_factory,
};
pub use metadata::{DatasetMetadataRenderer, METADATA_MIME_TYPES, dataset_metadata_factory};

/// The default factory set: audio, image, PDF and video renderers.
#[must_use]
pub fn default_factories() -> Vec<Arc<dyn RendererFactory>> {
    vec![
        audio_factory(),
        image_factory(),
        pdf_factory(),
        video_factory(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factories_cover_stock_media_types() {
        let factories = default_factories();
        let types: Vec<&str> = factories
            .iter()
            .flat_map(|f| f.mime_types().to_vec())
            .collect();
        for expected in ["audio/mp3", "image/png", "application/pdf", "video/mp4"] {
            assert!(types.contains(&expected), "missing {expected}");
        }
        assert!(!types.contains(&GEOTIFF_MIME_TYPE));
    }
}
