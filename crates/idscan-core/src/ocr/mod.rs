//! Recognition adapter over external OCR engines.
//!
//! An [`OcrEngine`] hands out one [`Recognizer`] per language. Callers go
//! through [`recognize_image`], which releases the recognizer whether or not
//! recognition succeeded.

#[cfg(feature = "native")]
mod onnx;
mod preprocessing;
#[cfg(feature = "tesseract")]
mod tesseract;

#[cfg(feature = "native")]
pub use onnx::{OnnxEngine, OnnxRecognizer};
pub use preprocessing::ImagePreprocessor;
#[cfg(feature = "tesseract")]
pub use tesseract::{TesseractEngine, TesseractRecognizer};

use async_trait::async_trait;
use tracing::debug;

use crate::error::OcrError;

/// Source of recognizers.
#[async_trait(?Send)]
pub trait OcrEngine {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    /// Acquire a recognizer configured for a single language.
    async fn acquire(&self, language: &str) -> Result<Box<dyn Recognizer>, OcrError>;
}

/// An acquired recognition resource.
#[async_trait(?Send)]
pub trait Recognizer {
    /// Recognize the text in an encoded image payload.
    async fn recognize(&mut self, image: &[u8]) -> Result<String, OcrError>;

    /// Release the underlying resource. Called exactly once per acquire.
    async fn release(&mut self);
}

#[async_trait(?Send)]
impl<E: OcrEngine + ?Sized> OcrEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn acquire(&self, language: &str) -> Result<Box<dyn Recognizer>, OcrError> {
        (**self).acquire(language).await
    }
}

/// Recognize an image with a freshly acquired recognizer.
///
/// The recognizer is released before this returns, on success and on
/// failure alike; a recognition error is returned after the release.
pub async fn recognize_image<E: OcrEngine + ?Sized>(
    engine: &E,
    language: &str,
    image: &[u8],
) -> Result<String, OcrError> {
    let mut recognizer = engine.acquire(language).await?;
    debug!("Acquired {} recognizer for '{}'", engine.name(), language);

    let outcome = recognizer.recognize(image).await;
    recognizer.release().await;
    debug!("Released {} recognizer", engine.name());

    outcome
}

/// A recognized text region.
#[derive(Debug, Clone)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Group boxes into rows and join them in reading order.
///
/// Boxes are taken top edge first. A box belongs to the current row when its
/// vertical center falls within the span of the box that opened the row.
/// Each row is read left to right with single spaces; rows are joined with
/// newlines, so a label and its value on the same printed line stay together.
pub fn join_in_reading_order(boxes: Vec<TextBox>) -> String {
    let mut placed: Vec<((f32, f32, f32, f32), String)> =
        boxes.into_iter().map(|b| (b.rect(), b.text)).collect();
    placed.sort_by(|(a, _), (b, _)| a.1.total_cmp(&b.1));

    let mut rows: Vec<Row> = Vec::new();
    for ((min_x, min_y, _, max_y), text) in placed {
        let center = (min_y + max_y) / 2.0;
        match rows.last_mut() {
            Some(row) if row.top <= center && center <= row.bottom => {
                row.cells.push((min_x, text));
            }
            _ => rows.push(Row {
                top: min_y,
                bottom: max_y,
                cells: vec![(min_x, text)],
            }),
        }
    }

    rows.into_iter()
        .map(|mut row| {
            row.cells.sort_by(|a, b| a.0.total_cmp(&b.0));
            row.cells
                .into_iter()
                .map(|(_, text)| text)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

struct Row {
    top: f32,
    bottom: f32,
    cells: Vec<(f32, String)>,
}
