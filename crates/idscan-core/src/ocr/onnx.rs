//! PaddleOCR models through `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use image::GenericImageView;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::IdScanConfig;

use super::{join_in_reading_order, ImagePreprocessor, OcrEngine, Recognizer, TextBox};

/// Engine loading one detection model plus a per-language recognition model.
pub struct OnnxEngine {
    model_dir: PathBuf,
    detection_model: String,
    max_image_size: u32,
    keep_unk: bool,
}

impl OnnxEngine {
    /// Create an engine reading models from a directory.
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            detection_model: "det.onnx".to_string(),
            max_image_size: 2048,
            keep_unk: false,
        }
    }

    /// Create an engine from configuration.
    pub fn from_config(config: &IdScanConfig) -> Self {
        Self {
            model_dir: config.models.model_dir.clone(),
            detection_model: config.models.detection_model.clone(),
            max_image_size: config.ocr.max_image_size,
            keep_unk: config.ocr.keep_unk,
        }
    }

    /// Paths of the detection model, recognition model and dictionary for a language.
    pub fn model_paths(&self, language: &str) -> (PathBuf, PathBuf, PathBuf) {
        (
            self.model_dir.join(&self.detection_model),
            self.model_dir.join(format!("{}_rec.onnx", language)),
            self.model_dir.join(format!("{}_dict.txt", language)),
        )
    }
}

#[async_trait(?Send)]
impl OcrEngine for OnnxEngine {
    fn name(&self) -> &'static str {
        "pure-onnx-ocr"
    }

    async fn acquire(&self, language: &str) -> Result<Box<dyn Recognizer>, OcrError> {
        let (det_path, rec_path, dict_path) = self.model_paths(language);

        for path in [&det_path, &rec_path, &dict_path] {
            ensure_exists(path, language)?;
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!(
            "Loaded pure-onnx-ocr '{}' models from {}",
            language,
            self.model_dir.display()
        );

        Ok(Box::new(OnnxRecognizer {
            engine: Some(engine),
            preprocessor: ImagePreprocessor::new().with_max_size(self.max_image_size),
            keep_unk: self.keep_unk,
        }))
    }
}

fn ensure_exists(path: &Path, language: &str) -> Result<(), OcrError> {
    if path.exists() {
        Ok(())
    } else {
        Err(OcrError::Acquire {
            language: language.to_string(),
            reason: format!("model file not found: {}", path.display()),
        })
    }
}

/// Loaded models for one language.
pub struct OnnxRecognizer {
    engine: Option<pure_onnx_ocr::engine::OcrEngine>,
    preprocessor: ImagePreprocessor,
    keep_unk: bool,
}

#[async_trait(?Send)]
impl Recognizer for OnnxRecognizer {
    async fn recognize(&mut self, image: &[u8]) -> Result<String, OcrError> {
        let engine = self
            .engine
            .as_ref()
            .ok_or_else(|| OcrError::Recognition("recognizer already released".to_string()))?;

        let start = Instant::now();
        let image = self.preprocessor.prepare(image)?;
        let (width, height) = image.dimensions();

        let results = engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let boxes = results
            .iter()
            .map(|r| TextBox {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                },
            })
            .collect();

        let text = join_in_reading_order(boxes);

        info!(
            "OCR complete: {}x{} image, {} regions in {}ms",
            width,
            height,
            results.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }

    async fn release(&mut self) {
        if self.engine.take().is_some() {
            debug!("Dropped pure-onnx-ocr models");
        }
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
///
/// Extracts the first 4 exterior points (quadrilateral) as
/// `[x1, y1, x2, y2, x3, y3, x4, y4]`.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::recognize_image;

    #[test]
    fn test_model_paths_follow_language() {
        let engine = OnnxEngine::new("/models");
        let (det, rec, dict) = engine.model_paths("latin");
        assert_eq!(det, PathBuf::from("/models/det.onnx"));
        assert_eq!(rec, PathBuf::from("/models/latin_rec.onnx"));
        assert_eq!(dict, PathBuf::from("/models/latin_dict.txt"));
    }

    #[test]
    fn test_from_config() {
        let mut config = IdScanConfig::default();
        config.models.model_dir = PathBuf::from("/srv/ocr");
        config.models.detection_model = "det_v5.onnx".to_string();

        let engine = OnnxEngine::from_config(&config);
        let (det, _, _) = engine.model_paths("eng");
        assert_eq!(det, PathBuf::from("/srv/ocr/det_v5.onnx"));
    }

    #[tokio::test]
    async fn test_missing_models_fail_acquire() {
        let dir = tempfile::tempdir().unwrap();
        let engine = OnnxEngine::new(dir.path());

        let result = recognize_image(&engine, "latin", b"img").await;
        match result {
            Err(OcrError::Acquire { language, reason }) => {
                assert_eq!(language, "latin");
                assert!(reason.contains("det.onnx"));
            }
            other => panic!("expected acquire error, got {:?}", other),
        }
    }
}
