//! Image loader backed by a fixed table of image sizes.

use std::collections::HashMap;

use quilt_components::{Image, ImageCompletion, ImageLoader};
use quilt_core::{ImageLoadError, Size};

/// Completes every load immediately. Entries registered with an empty size
/// fail to decode.
#[derive(Debug, Default)]
pub struct StaticImageLoader {
    images: HashMap<String, Size>,
}

impl StaticImageLoader {
    pub fn with_image(mut self, url: impl Into<String>, width: f64, height: f64) -> Self {
        self.images.insert(url.into(), Size::new(width, height));
        self
    }
}

impl ImageLoader for StaticImageLoader {
    fn load_image(&self, url: &str, completion: ImageCompletion) {
        let result = match self.images.get(url) {
            Some(size) if size.is_empty() => Err(ImageLoadError::Decode {
                url: url.to_string(),
                reason: format!("empty image ({}x{})", size.width, size.height),
            }),
            Some(size) => Ok(Image::new(url, *size)),
            None => Err(ImageLoadError::NotFound { url: url.to_string() }),
        };
        completion(result);
    }
}
