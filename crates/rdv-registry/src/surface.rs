//! Minimal visual node renderers draw into.

/// The visual node a renderer owns.
///
/// Stands in for the host toolkit's widget node: a CSS class list plus an
/// HTML fragment. The bridge dispatcher mounts and unmounts whole
/// renderers; the surface only carries what its renderer last drew.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Surface {
    classes: Vec<String>,
    html: String,
}

impl Surface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface with an initial CSS class.
    #[must_use]
    pub fn with_class(class: &str) -> Self {
        let mut surface = Self::default();
        surface.add_class(class);
        surface
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Whether the class is set.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Replace the surface content.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    /// The current content fragment.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Drop the content. Classes are kept.
    pub fn clear(&mut self) {
        self.html.clear();
    }
}
