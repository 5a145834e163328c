//! Content-type renderer registry for remote data.
//!
//! This crate is the dispatch core of RDV: given a payload described by a
//! content type and a reference to where its bytes live (never the bytes
//! themselves), it selects the renderer responsible for that type. Three
//! seams form the API:
//!
//! - [`DataLocation`]: the value pairing a mime type with an opaque URL
//! - [`Renderer`] / [`RendererFactory`]: the contract every rendering
//!   strategy satisfies
//! - [`RendererRegistry`]: the mime-type-to-factory lookup table
//!
//! The registry holds no renderer instances; it is a pure factory lookup.
//! Ownership of the currently mounted renderer belongs to the bridge
//! dispatcher in `rdv-bridge`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rdv_registry::{RendererOptions, RendererRegistry};
//! use rdv_registry::mock::RecordingFactory;
//!
//! let mut registry = RendererRegistry::new();
//! registry.add_factory(Arc::new(RecordingFactory::new(&["image/png"])));
//!
//! let renderer = registry.create_renderer(&RendererOptions::new("image/png"))?;
//! assert!(!renderer.is_disposed());
//! # Ok::<(), rdv_registry::RegistryError>(())
//! ```

pub mod mock;

mod error;
mod location;
mod options;
mod registry;
mod renderer;
mod surface;

pub use error::{RegistryError, RenderError};
pub use location::DataLocation;
pub use options::{DataFetch, HostCapabilities, NestedRender, RendererOptions};
pub use registry::RendererRegistry;
pub use renderer::{RenderFuture, Renderer, RendererFactory, StaticFactory};
pub use surface::Surface;
