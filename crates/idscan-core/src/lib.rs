//! Core library for identity document OCR.
//!
//! This crate provides:
//! - A recognition adapter over external OCR engines (pure-Rust ONNX models,
//!   Tesseract) that always releases the recognizer it acquired
//! - Labeled field extraction into a fixed identity record
//! - An [`IdScanner`] composing the two

pub mod error;
pub mod identity;
pub mod models;
pub mod ocr;
mod scanner;

pub use error::{IdScanError, OcrError, Result};
pub use identity::{parse_identity, ExtractionResult, IdentityParser, LabelParser};
pub use models::config::{IdScanConfig, OcrBackend};
pub use models::identity::{IdentityField, IdentityRecord};
pub use ocr::{recognize_image, OcrEngine, Recognizer};
pub use scanner::{create_engine, IdScanner, ScanResult};

#[cfg(feature = "native")]
pub use ocr::OnnxEngine;

#[cfg(feature = "tesseract")]
pub use ocr::TesseractEngine;
