//! Image decoding and resizing ahead of recognition.

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::error::OcrError;

/// Image preprocessor for the OCR pipeline.
pub struct ImagePreprocessor {
    /// Maximum image dimension.
    max_size: u32,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self { max_size: 2048 }
    }

    /// Set maximum image dimension.
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size;
        self
    }

    /// Decode an in-memory payload in any format the `image` crate knows.
    pub fn decode(&self, data: &[u8]) -> Result<DynamicImage, OcrError> {
        image::load_from_memory(data).map_err(|e| OcrError::InvalidImage(e.to_string()))
    }

    /// Decode a payload and shrink it to fit within the maximum size.
    pub fn prepare(&self, data: &[u8]) -> Result<DynamicImage, OcrError> {
        let image = self.decode(data)?;
        Ok(self.fit(image))
    }

    /// Downscale so the longer side is at most the maximum size.
    pub fn fit(&self, image: DynamicImage) -> DynamicImage {
        let (width, height) = image.dimensions();
        let (new_width, new_height) = self.calculate_resize_dimensions(width, height);

        if (new_width, new_height) == (width, height) {
            return image;
        }

        debug!(
            "Resizing image {}x{} -> {}x{}",
            width, height, new_width, new_height
        );
        image.resize_exact(
            new_width,
            new_height,
            image::imageops::FilterType::Lanczos3,
        )
    }

    fn calculate_resize_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let max_dim = width.max(height);

        if self.max_size == 0 || max_dim <= self.max_size {
            return (width, height);
        }

        let scale = self.max_size as f32 / max_dim as f32;
        let new_width = (width as f32 * scale) as u32;
        let new_height = (height as f32 * scale) as u32;

        (new_width.max(1), new_height.max(1))
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
