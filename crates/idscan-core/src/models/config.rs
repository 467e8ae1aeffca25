//! Configuration structures for the scanning pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::IdScanError;

/// Main configuration for the idscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdScanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Model configuration.
    pub models: ModelConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition backend.
    pub backend: OcrBackend,

    /// Language the recognizer is acquired for.
    ///
    /// For the ONNX backend this is the recognition model prefix
    /// (`latin` loads `latin_rec.onnx` and `latin_dict.txt`); for Tesseract
    /// it is the traineddata code (`eng`).
    pub language: String,

    /// Maximum image dimension (longer side) for processing.
    pub max_image_size: u32,

    /// Keep `[UNK]` tokens in recognized text instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackend::default(),
            language: "latin".to_string(),
            max_image_size: 2048,
            keep_unk: false,
        }
    }
}

/// Which OCR engine recognizes text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackend {
    /// PaddleOCR models run by `pure-onnx-ocr`.
    #[default]
    Onnx,
    /// Tesseract through `leptess`.
    Tesseract,
}

/// Model file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Tesseract traineddata directory (system default when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            tessdata_dir: None,
        }
    }
}

impl IdScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, IdScanError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IdScanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), IdScanError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| IdScanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IdScanConfig::default();
        assert_eq!(config.ocr.backend, OcrBackend::Onnx);
        assert_eq!(config.ocr.language, "latin");
        assert_eq!(config.ocr.max_image_size, 2048);
        assert_eq!(config.models.model_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IdScanConfig =
            serde_json::from_str(r#"{"ocr": {"backend": "tesseract", "language": "eng"}}"#)
                .unwrap();
        assert_eq!(config.ocr.backend, OcrBackend::Tesseract);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.max_image_size, 2048);
        assert_eq!(config.models.detection_model, "det.onnx");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = IdScanConfig::default();
        config.ocr.keep_unk = true;
        config.models.model_dir = PathBuf::from("/opt/models");
        config.save(&path).unwrap();

        let loaded = IdScanConfig::from_file(&path).unwrap();
        assert!(loaded.ocr.keep_unk);
        assert_eq!(loaded.models.model_dir, PathBuf::from("/opt/models"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            IdScanConfig::from_file(&path),
            Err(IdScanError::Config(_))
        ));
    }
}
