//! Turning image references into something the FO processor can load.

use base64::Engine;
use folio_traits::ResourceProvider;
use folio_types::ResourceUri;
use std::sync::Arc;

pub trait ImageResolver: Send + Sync {
    /// The value for `src="url('...')"`, or `None` when the image is unavailable.
    fn resolve(&self, uri: &ResourceUri) -> Option<String>;
}

/// Passes every URI through unchanged; the FO processor loads it itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughImageResolver;

impl ImageResolver for PassThroughImageResolver {
    fn resolve(&self, uri: &ResourceUri) -> Option<String> {
        Some(uri.as_str().to_string())
    }
}

/// Loads image bytes through a [`ResourceProvider`] and inlines them as a
/// base64 `data:` URI.
#[derive(Debug, Clone)]
pub struct ResourceImageResolver {
    provider: Arc<dyn ResourceProvider>,
}

impl ResourceImageResolver {
    pub fn new(provider: Arc<dyn ResourceProvider>) -> Self {
        Self { provider }
    }
}

impl ImageResolver for ResourceImageResolver {
    fn resolve(&self, uri: &ResourceUri) -> Option<String> {
        let data = self.provider.fetch(uri.as_str())?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(data.as_slice());
        Some(format!("data:{};base64,{}", mime_type(uri.as_str()), encoded))
    }
}

fn mime_type(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_traits::InMemoryResourceProvider;

    #[test]
    fn inlines_known_images() {
        let provider = InMemoryResourceProvider::new();
        provider.add("img/dot.PNG", vec![1, 2, 3]).unwrap();
        let resolver = ResourceImageResolver::new(Arc::new(provider));
        assert_eq!(
            resolver.resolve(&ResourceUri::from("img/dot.PNG")).as_deref(),
            Some("data:image/png;base64,AQID")
        );
        assert_eq!(resolver.resolve(&ResourceUri::from("missing.jpg")), None);
    }

    #[test]
    fn pass_through_keeps_uri() {
        let uri = ResourceUri::from("charts/q3.svg");
        assert_eq!(PassThroughImageResolver.resolve(&uri).as_deref(), Some("charts/q3.svg"));
    }
}
