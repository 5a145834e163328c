//! Bridge dispatcher between a host content-rendering engine and the RDV
//! renderer registry.
//!
//! A host engine dispatches payloads by content type. This crate provides
//! the renderer the host instantiates for the well-known dataset type
//! [`DATASET_MIME_TYPE`]: a [`DataBridge`] that unwraps the embedded
//! [`DataLocation`](rdv_registry::DataLocation) and delegates to its own
//! inner [`RendererRegistry`](rdv_registry::RendererRegistry) — a second
//! level of dispatch keyed on the dataset's real mime type.
//!
//! # Example
//!
//! ```
//! use rdv_bridge::{DATASET_MIME_TYPE, DataBridge, HostModel};
//! use rdv_registry::HostCapabilities;
//!
//! # tokio_test::block_on(async {
//! let mut bridge = DataBridge::new(HostCapabilities::default());
//! let model = HostModel::new().with_entry(
//!     DATASET_MIME_TYPE,
//!     serde_json::json!({ "mimeType": "image/png", "url": "https://x/a.png" }),
//! );
//! bridge.render_model(&model).await.unwrap();
//! assert!(bridge.current_surface().is_some());
//! # });
//! ```

mod bridge;
mod extension;
mod model;

pub use bridge::{DATASET_MIME_TYPE, DataBridge, DispatchError};
pub use extension::{HostExtension, extension};
pub use model::HostModel;
