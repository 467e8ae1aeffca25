//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use idscan_core::{create_engine, IdScanConfig, IdScanner, IdentityRecord, OcrBackend, OcrEngine};

/// OCR engine selection shared by `process` and `batch`.
#[derive(Args)]
pub struct EngineArgs {
    /// Model directory (ONNX backend)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Recognition language (model prefix for ONNX, traineddata code for Tesseract)
    #[arg(short, long)]
    language: Option<String>,

    /// OCR backend
    #[arg(short, long, value_enum)]
    backend: Option<BackendArg>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BackendArg {
    /// PaddleOCR models via pure-onnx-ocr
    Onnx,
    /// Tesseract via leptess
    Tesseract,
}

impl From<BackendArg> for OcrBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Onnx => OcrBackend::Onnx,
            BackendArg::Tesseract => OcrBackend::Tesseract,
        }
    }
}

impl EngineArgs {
    /// Apply command line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut IdScanConfig) {
        if let Some(dir) = &self.model_dir {
            config.models.model_dir = dir.clone();
        }
        if let Some(language) = &self.language {
            config.ocr.language = language.clone();
        }
        if let Some(backend) = self.backend {
            config.ocr.backend = backend.into();
        }
    }
}

/// Load the explicit config file, else the default one, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IdScanConfig> {
    if let Some(path) = config_path {
        return Ok(IdScanConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(IdScanConfig::from_file(&default_path)?)
    } else {
        Ok(IdScanConfig::default())
    }
}

/// Build a scanner for the configured backend and language.
pub fn build_scanner(config: &IdScanConfig) -> anyhow::Result<IdScanner<Box<dyn OcrEngine>>> {
    let engine = create_engine(config)?;
    debug!(
        "Using {} engine, language '{}'",
        engine.name(),
        config.ocr.language
    );
    Ok(IdScanner::new(engine, config.ocr.language.clone()))
}

/// File extensions accepted as document images.
pub fn is_image_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(
        ext.to_lowercase().as_str(),
        "png" | "jpg" | "jpeg" | "webp" | "tiff" | "tif" | "bmp"
    )
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_record(record: &IdentityRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &IdentityRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(record.fields().map(|(field, _)| field.key()))?;
    wtr.write_record(record.fields().map(|(_, value)| value))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &IdentityRecord) -> String {
    let mut output = String::new();

    for (field, value) in record.fields() {
        output.push_str(&format!("{} {}\n", field.label(), value));
    }

    output
}
