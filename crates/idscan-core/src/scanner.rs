//! Recognition followed by field extraction.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::{IdScanError, Result};
use crate::identity::{IdentityParser, LabelParser};
use crate::models::config::{IdScanConfig, OcrBackend};
use crate::models::identity::{IdentityField, IdentityRecord};
use crate::ocr::{recognize_image, OcrEngine};

/// Outcome of scanning one image.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Extracted identity fields.
    pub record: IdentityRecord,
    /// Fields whose label was not found in the recognized text.
    pub missing: Vec<IdentityField>,
    /// Recognition plus extraction time in milliseconds.
    pub processing_time_ms: u64,
}

/// Reads identity documents with an OCR engine.
pub struct IdScanner<E: OcrEngine> {
    engine: E,
    language: String,
    parser: LabelParser,
}

impl<E: OcrEngine> IdScanner<E> {
    /// Create a scanner acquiring recognizers for `language`.
    pub fn new(engine: E, language: impl Into<String>) -> Self {
        Self {
            engine,
            language: language.into(),
            parser: LabelParser::new(),
        }
    }

    /// Language recognizers are acquired for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Recognize an image and extract its identity record.
    pub async fn process_image(&self, image: &[u8]) -> Result<IdentityRecord> {
        Ok(self.scan(image).await?.record)
    }

    /// Like [`process_image`](Self::process_image), also reporting missing labels and timing.
    pub async fn scan(&self, image: &[u8]) -> Result<ScanResult> {
        let start = Instant::now();

        let text = recognize_image(&self.engine, &self.language, image).await?;
        debug!("Recognized {} lines", text.split('\n').count());

        let extraction = self.parser.parse(&text);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Extracted {}/{} fields in {}ms",
            IdentityField::ALL.len() - extraction.missing.len(),
            IdentityField::ALL.len(),
            processing_time_ms
        );

        Ok(ScanResult {
            record: extraction.record,
            missing: extraction.missing,
            processing_time_ms,
        })
    }
}

/// Build the engine selected in the configuration.
pub fn create_engine(config: &IdScanConfig) -> Result<Box<dyn OcrEngine>> {
    match config.ocr.backend {
        #[cfg(feature = "native")]
        OcrBackend::Onnx => Ok(Box::new(crate::ocr::OnnxEngine::from_config(config))),
        #[cfg(feature = "tesseract")]
        OcrBackend::Tesseract => Ok(Box::new(crate::ocr::TesseractEngine::from_config(config))),
        #[allow(unreachable_patterns)]
        backend => Err(IdScanError::Config(format!(
            "OCR backend {:?} is not compiled into this build",
            backend
        ))),
    }
}
