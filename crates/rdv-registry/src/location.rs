//! Data location value object.

use serde::{Deserialize, Serialize};

/// A description of a dataset and a URL for accessing it.
///
/// This is the value a host payload carries under the dataset content type.
/// It never contains the data itself, only a typed pointer to it: the mime
/// type acts as the primary key for deciding which renderer to dispatch,
/// and the URL may point to a static file or to an API endpoint with the
/// ability to do complex queries. The URL is interpreted entirely by the
/// concrete renderer; the dispatch core never resolves it.
///
/// Wire field names (`mimeType`, `url`) match the JSON payload format
/// delivered by hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLocation {
    /// Mime type of the dataset. The dispatch key.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// URL for accessing the dataset.
    pub url: String,
}

impl DataLocation {
    /// Create a new data location.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_equality() {
        let a = DataLocation::new("image/png", "https://x/a.png");
        let b = DataLocation::new("image/png", "https://x/a.png");
        assert_eq!(a, b);
        assert_ne!(a, DataLocation::new("image/png", "https://x/b.png"));
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::json!({
            "mimeType": "audio/mp3",
            "url": "https://x/a.mp3"
        });
        let location: DataLocation = serde_json::from_value(value).unwrap();
        assert_eq!(location, DataLocation::new("audio/mp3", "https://x/a.mp3"));

        let back = serde_json::to_value(&location).unwrap();
        assert_eq!(back["mimeType"], "audio/mp3");
        assert_eq!(back["url"], "https://x/a.mp3");
    }
}
