//! Host registration descriptor.

use crate::bridge::DATASET_MIME_TYPE;

/// Registration record for a host engine's extension mechanism.
///
/// Describes how the bridge should be wired into a host: the payload
/// content type it answers for, and the dataset descriptor file extensions
/// whose contents carry such payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostExtension {
    /// Stable extension identifier.
    pub id: &'static str,
    /// Content types routed to the bridge.
    pub mime_types: &'static [&'static str],
    /// Dataset descriptor file extensions.
    pub file_extensions: &'static [&'static str],
}

/// The bridge's registration record.
#[must_use]
pub fn extension() -> HostExtension {
    HostExtension {
        id: "rdv-bridge",
        mime_types: &[DATASET_MIME_TYPE],
        file_extensions: &[".big"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_routes_dataset_mime_type() {
        let ext = extension();
        assert_eq!(ext.mime_types, &[DATASET_MIME_TYPE]);
        assert_eq!(ext.file_extensions, &[".big"]);
    }
}
