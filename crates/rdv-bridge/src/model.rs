//! Host render request model.

use serde_json::{Map, Value};

/// A keyed bundle of content type → payload, as delivered by the host
/// engine with a render request.
///
/// The bridge reads exactly one well-known key
/// ([`DATASET_MIME_TYPE`](crate::DATASET_MIME_TYPE)) from the bundle;
/// everything else is opaque to it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HostModel {
    data: Map<String, Value>,
}

impl HostModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a payload under `mime_type`.
    #[must_use]
    pub fn with_entry(mut self, mime_type: impl Into<String>, value: Value) -> Self {
        self.data.insert(mime_type.into(), value);
        self
    }

    /// Payload stored under `mime_type`, if any.
    #[must_use]
    pub fn get(&self, mime_type: &str) -> Option<&Value> {
        self.data.get(mime_type)
    }
}
