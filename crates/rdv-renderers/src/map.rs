//! Tiled map renderer for cloud-optimized GeoTIFF datasets.
//!
//! The dataset bytes are never downloaded whole: a tile service renders
//! individual tiles on demand from the dataset URL, and a companion
//! `bounds` endpoint reports the dataset's geographic extent so the
//! viewport can be fitted after mount. The bounds fetch is awaited inside
//! `render`, so the dispatcher's completion covers it.

use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Deserialize;

use rdv_registry::{
    DataFetch, DataLocation, RenderError, RenderFuture, Renderer, RendererFactory, RendererOptions,
    StaticFactory, Surface,
};

/// Mime type for cloud-optimized GeoTIFF datasets.
pub const GEOTIFF_MIME_TYPE: &str = "image/geotiff";

/// Mime types handled by [`TiledMapRenderer`].
pub const MAP_MIME_TYPES: &[&str] = &[GEOTIFF_MIME_TYPE];

/// Tile service that renders GeoTIFF tiles and reports dataset bounds.
pub const TILE_SERVICE_URL: &str =
    "https://bstlgagxwg.execute-api.us-east-1.amazonaws.com/production";

/// URL template for the base map tile layer.
const BASE_TILE_URL_TEMPLATE: &str =
    "https://cartodb-basemaps-{s}.global.ssl.fastly.net/light_all/{z}/{x}/{y}{r}.png";

/// Attribution for the base map tile layer.
const BASE_LAYER_ATTRIBUTION: &str =
    "Map data (c) <a href=\"https://openstreetmap.org\">OpenStreetMap</a> contributors";

const MIN_ZOOM: u8 = 0;
const MAX_ZOOM: u8 = 18;

const CSS_CLASS: &str = "rdv-MapViewer";

/// Characters escaped when embedding the dataset URL in a query string.
const URL_QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'&');

/// A tile layer added to the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    /// Tile URL template (`{z}`/`{x}`/`{y}` placeholders).
    pub url_template: String,
    /// Attribution line, if any.
    pub attribution: Option<String>,
    /// Minimum zoom level.
    pub min_zoom: u8,
    /// Maximum zoom level.
    pub max_zoom: u8,
}

/// Geographic bounds as `[west, south, east, north]`.
pub type Bounds = [f64; 4];

/// Shape of the tile service's `bounds` response.
#[derive(Debug, Deserialize)]
struct BoundsResponse {
    bounds: Bounds,
}

/// Map viewport state: tile layers plus the currently fitted corners.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Viewport {
    layers: Vec<TileLayer>,
    fitted: Option<((f64, f64), (f64, f64))>,
}

impl Viewport {
    fn add_layer(&mut self, layer: TileLayer) {
        self.layers.push(layer);
    }

    /// Fit the viewport to `[west, south, east, north]` bounds.
    fn fit_bounds(&mut self, bounds: Bounds) {
        // South-west and north-east corners as (lat, lon) pairs.
        self.fitted = Some(((bounds[1], bounds[0]), (bounds[3], bounds[2])));
    }

    fn clear(&mut self) {
        self.layers.clear();
        self.fitted = None;
    }

    /// Layers in mount order.
    #[must_use]
    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// Corners the viewport was fitted to, as `((south, west), (north, east))`.
    #[must_use]
    pub fn fitted_corners(&self) -> Option<((f64, f64), (f64, f64))> {
        self.fitted
    }
}

/// A renderer for cloud-optimized GeoTIFF datasets on a tiled map.
pub struct TiledMapRenderer {
    surface: Surface,
    viewport: Viewport,
    fetch: Option<Arc<dyn DataFetch>>,
    disposed: bool,
}

impl TiledMapRenderer {
    /// Create a map renderer, taking the fetch capability from `options`.
    #[must_use]
    pub fn new(options: &RendererOptions) -> Self {
        Self {
            surface: Surface::with_class(CSS_CLASS),
            viewport: Viewport::default(),
            fetch: options.host.fetch.clone(),
            disposed: false,
        }
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

fn base_tile_layer() -> TileLayer {
    TileLayer {
        url_template: BASE_TILE_URL_TEMPLATE.to_owned(),
        attribution: Some(BASE_LAYER_ATTRIBUTION.to_owned()),
        min_zoom: MIN_ZOOM,
        max_zoom: MAX_ZOOM,
    }
}

impl Renderer for TiledMapRenderer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn render<'a>(&'a mut self, location: &'a DataLocation) -> RenderFuture<'a> {
        Box::pin(async move {
            self.viewport.add_layer(base_tile_layer());

            let encoded = utf8_percent_encode(&location.url, URL_QUERY).to_string();
            self.viewport.add_layer(TileLayer {
                url_template: format!("{TILE_SERVICE_URL}/tiles/{{z}}/{{x}}/{{y}}.jpg?url={encoded}"),
                attribution: None,
                min_zoom: MIN_ZOOM,
                max_zoom: MAX_ZOOM,
            });

            let fetch = self
                .fetch
                .as_ref()
                .map(Arc::clone)
                .ok_or(RenderError::FetchUnavailable)?;
            let bounds_url = format!("{TILE_SERVICE_URL}/bounds?url={encoded}");
            tracing::debug!(url = %bounds_url, "Fetching dataset bounds");
            let value = tokio::task::spawn_blocking(move || fetch.get_json(&bounds_url))
                .await
                .map_err(|_| RenderError::Canceled)??;
            let response: BoundsResponse =
                serde_json::from_value(value).map_err(|e| RenderError::Metadata(e.to_string()))?;

            self.viewport.fit_bounds(response.bounds);
            Ok(())
        })
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.viewport.clear();
        self.surface.clear();
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Factory for [`TiledMapRenderer`].
#[must_use]
pub fn tiled_map_factory() -> Arc<dyn RendererFactory> {
    Arc::new(StaticFactory::new(MAP_MIME_TYPES, |options| {
        Box::new(TiledMapRenderer::new(options))
    }))
}
