//! Renderers for directly embeddable media: images, video, audio and PDF.
//!
//! These are the simplest renderers in the family: render completes
//! synchronously by pointing an embed element at the dataset URL. The
//! browser-side host streams the bytes itself; nothing is fetched here.

use std::sync::Arc;

use rdv_registry::{
    DataLocation, RenderFuture, Renderer, RendererFactory, StaticFactory, Surface,
};

use crate::util::escape_html;

/// Mime types handled by [`ImageRenderer`].
pub const IMAGE_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/svg",
    "image/gif",
    "image/jpeg",
    "image/bmp",
    "image/tiff",
];

/// Mime types handled by [`VideoRenderer`].
pub const VIDEO_MIME_TYPES: &[&str] = &["video/mp4", "video/ogg", "video/webm"];

/// Mime types handled by [`AudioRenderer`].
pub const AUDIO_MIME_TYPES: &[&str] = &["audio/ogg", "audio/webm", "audio/mp3"];

/// Mime types handled by [`PdfRenderer`].
pub const PDF_MIME_TYPES: &[&str] = &["application/pdf"];

/// A renderer for images.
pub struct ImageRenderer {
    surface: Surface,
    disposed: bool,
}

impl ImageRenderer {
    /// Create an image renderer with an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
            disposed: false,
        }
    }
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ImageRenderer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn render<'a>(&'a mut self, location: &'a DataLocation) -> RenderFuture<'a> {
        self.surface
            .set_html(format!("<img src=\"{}\">", escape_html(&location.url)));
        Box::pin(async { Ok(()) })
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.surface.clear();
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// A renderer for videos.
pub struct VideoRenderer {
    surface: Surface,
    disposed: bool,
}

impl VideoRenderer {
    /// Create a video renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: Surface::with_class("rdv-VideoPlayer"),
            disposed: false,
        }
    }
}

impl Default for VideoRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for VideoRenderer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn render<'a>(&'a mut self, location: &'a DataLocation) -> RenderFuture<'a> {
        self.surface.set_html(format!(
            "<video controls src=\"{}\" type=\"{}\"></video>",
            escape_html(&location.url),
            escape_html(&location.mime_type)
        ));
        Box::pin(async { Ok(()) })
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.surface.clear();
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// A renderer for audio.
pub struct AudioRenderer {
    surface: Surface,
    disposed: bool,
}

impl AudioRenderer {
    /// Create an audio renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: Surface::with_class("rdv-AudioPlayer"),
            disposed: false,
        }
    }
}

impl Default for AudioRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AudioRenderer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn render<'a>(&'a mut self, location: &'a DataLocation) -> RenderFuture<'a> {
        self.surface.set_html(format!(
            "<audio controls src=\"{}\" type=\"{}\"></audio>",
            escape_html(&location.url),
            escape_html(&location.mime_type)
        ));
        Box::pin(async { Ok(()) })
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.surface.clear();
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// A renderer for PDFs.
pub struct PdfRenderer {
    surface: Surface,
    disposed: bool,
}

impl PdfRenderer {
    /// Create a PDF renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: Surface::with_class("rdv-PdfContainer"),
            disposed: false,
        }
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PdfRenderer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn render<'a>(&'a mut self, location: &'a DataLocation) -> RenderFuture<'a> {
        self.surface.set_html(format!(
            "<embed class=\"rdv-PdfViewer\" type=\"application/pdf\" src=\"{}\">",
            escape_html(&location.url)
        ));
        Box::pin(async { Ok(()) })
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.surface.clear();
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Factory for [`ImageRenderer`].
#[must_use]
pub fn image_factory() -> Arc<dyn RendererFactory> {
    Arc::new(StaticFactory::new(IMAGE_MIME_TYPES, |_options| {
        Box::new(ImageRenderer::new())
    }))
}

/// Factory for [`VideoRenderer`].
#[must_use]
pub fn video_factory() -> Arc<dyn RendererFactory> {
    Arc::new(StaticFactory::new(VIDEO_MIME_TYPES, |_options| {
        Box::new(VideoRenderer::new())
    }))
}

/// Factory for [`AudioRenderer`].
#[must_use]
pub fn audio_factory() -> Arc<dyn RendererFactory> {
    Arc::new(StaticFactory::new(AUDIO_MIME_TYPES, |_options| {
        Box::new(AudioRenderer::new())
    }))
}

/// Factory for [`PdfRenderer`].
#[must_use]
pub fn pdf_factory() -> Arc<dyn RendererFactory> {
    Arc::new(StaticFactory::new(PDF_MIME_TYPES, |_options| {
        Box::new(PdfRenderer::new())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rdv_registry::RendererOptions;

    #[tokio::test]
    async fn test_image_renderer_escapes_url() {
        let mut renderer = ImageRenderer::new();
        let location = DataLocation::new("image/png", "https://x/a.png?name=\"q\"");
        renderer.render(&location).await.unwrap();
        assert_eq!(
            renderer.surface().html(),
            "<img src=\"https://x/a.png?name=&quot;q&quot;\">"
        );
    }

    #[tokio::test]
    async fn test_video_renderer_sets_src_and_type() {
        let mut renderer = VideoRenderer::new();
        assert!(renderer.surface().has_class("rdv-VideoPlayer"));
        let location = DataLocation::new("video/mp4", "https://x/v.mp4");
        renderer.render(&location).await.unwrap();
        assert_eq!(
            renderer.surface().html(),
            "<video controls src=\"https://x/v.mp4\" type=\"video/mp4\"></video>"
        );
    }

    #[tokio::test]
    async fn test_audio_renderer_sets_src_and_type() {
        let mut renderer = AudioRenderer::new();
        assert!(renderer.surface().has_class("rdv-AudioPlayer"));
        let location = DataLocation::new("audio/mp3", "https://x/a.mp3");
        renderer.render(&location).await.unwrap();
        assert_eq!(
            renderer.surface().html(),
            "<audio controls src=\"https://x/a.mp3\" type=\"audio/mp3\"></audio>"
        );
    }

    #[tokio::test]
    async fn test_pdf_renderer_embeds_viewer() {
        let mut renderer = PdfRenderer::new();
        assert!(renderer.surface().has_class("rdv-PdfContainer"));
        let location = DataLocation::new("application/pdf", "https://x/d.pdf");
        renderer.render(&location).await.unwrap();
        assert_eq!(
            renderer.surface().html(),
            "<embed class=\"rdv-PdfViewer\" type=\"application/pdf\" src=\"https://x/d.pdf\">"
        );
    }

    #[tokio::test]
    async fn test_dispose_clears_surface() {
        let mut renderer = ImageRenderer::new();
        let location = DataLocation::new("image/png", "https://x/a.png");
        renderer.render(&location).await.unwrap();
        assert!(!renderer.is_disposed());

        renderer.dispose();
        assert!(renderer.is_disposed());
        assert_eq!(renderer.surface().html(), "");
    }

    #[test]
    fn test_factories_advertise_expected_types() {
        assert_eq!(image_factory().mime_types(), IMAGE_MIME_TYPES);
        assert_eq!(video_factory().mime_types(), VIDEO_MIME_TYPES);
        assert_eq!(audio_factory().mime_types(), AUDIO_MIME_TYPES);
        assert_eq!(pdf_factory().mime_types(), PDF_MIME_TYPES);
    }

    #[test]
    fn test_factory_creates_fresh_instances() {
        let factory = image_factory();
        let options = RendererOptions::new("image/png");
        let a = factory.create(&options);
        let b = factory.create(&options);
        assert!(!a.is_disposed());
        assert!(!b.is_disposed());
    }
}
