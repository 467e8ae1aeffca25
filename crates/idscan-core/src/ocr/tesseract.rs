//! Tesseract recognition through `leptess`.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::IdScanConfig;

use super::{OcrEngine, Recognizer};

/// Engine handing out one Tesseract instance per acquire.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    tessdata_dir: Option<PathBuf>,
}

impl TesseractEngine {
    /// Use the system tessdata location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from configuration.
    pub fn from_config(config: &IdScanConfig) -> Self {
        Self {
            tessdata_dir: config.models.tessdata_dir.clone(),
        }
    }
}

#[async_trait(?Send)]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn acquire(&self, language: &str) -> Result<Box<dyn Recognizer>, OcrError> {
        let data_path = self
            .tessdata_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().into_owned());

        let tess = leptess::LepTess::new(data_path.as_deref(), language).map_err(|e| {
            OcrError::Acquire {
                language: language.to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!("Initialized Tesseract for '{}'", language);

        Ok(Box::new(TesseractRecognizer { tess: Some(tess) }))
    }
}

/// An initialized Tesseract instance.
pub struct TesseractRecognizer {
    tess: Option<leptess::LepTess>,
}

#[async_trait(?Send)]
impl Recognizer for TesseractRecognizer {
    async fn recognize(&mut self, image: &[u8]) -> Result<String, OcrError> {
        let tess = self
            .tess
            .as_mut()
            .ok_or_else(|| OcrError::Recognition("recognizer already released".to_string()))?;

        // Leptonica decodes the payload itself.
        tess.set_image_from_mem(image)
            .map_err(|e| OcrError::InvalidImage(format!("failed to set image for OCR: {}", e)))?;

        let text = tess
            .get_utf8_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        info!("OCR complete: {} chars", text.len());

        Ok(text)
    }

    async fn release(&mut self) {
        if self.tess.take().is_some() {
            debug!("Dropped Tesseract instance");
        }
    }
}
