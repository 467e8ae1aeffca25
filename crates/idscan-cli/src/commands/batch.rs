//! Batch processing command for multiple document images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use idscan_core::{IdScanner, IdentityRecord, OcrEngine, ScanResult};

use super::{build_scanner, format_record, is_image_file, load_config, EngineArgs, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    scan: Option<ScanResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.engine.apply(&mut config);

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_image_file(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let scanner = build_scanner(&config)?;
    let mut results = Vec::with_capacity(files.len());

    // Sequential: every file acquires and releases its own recognizer.
    for path in files {
        let file_start = Instant::now();
        let outcome = scan_file(&scanner, &path).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(scan) => {
                results.push(FileResult {
                    path,
                    scan: Some(scan),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        scan: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful = results.iter().filter(|r| r.scan.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Some(scan) = &result.scan {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_record(&scan.record, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn scan_file(
    scanner: &IdScanner<Box<dyn OcrEngine>>,
    path: &Path,
) -> anyhow::Result<ScanResult> {
    let image = fs::read(path)?;
    Ok(scanner.scan(&image).await?)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(IdentityRecord::default().fields().map(|(field, _)| field.key()));
    header.extend(["missing_fields", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let mut row = vec![filename.to_string()];
        match &result.scan {
            Some(scan) => {
                row.push("success".to_string());
                row.extend(scan.record.fields().map(|(_, value)| value.to_string()));
                row.push(scan.missing.len().to_string());
                row.push(result.processing_time_ms.to_string());
                row.push(String::new());
            }
            None => {
                row.push("error".to_string());
                row.extend(std::iter::repeat_n(String::new(), 9));
                row.push(result.processing_time_ms.to_string());
                row.push(result.error.clone().unwrap_or_default());
            }
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rows_align_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let results = vec![
            FileResult {
                path: PathBuf::from("a.png"),
                scan: Some(ScanResult {
                    record: IdentityRecord {
                        first_name: "Jane".to_string(),
                        ..Default::default()
                    },
                    missing: vec![idscan_core::IdentityField::Sex],
                    processing_time_ms: 12,
                }),
                error: None,
                processing_time_ms: 15,
            },
            FileResult {
                path: PathBuf::from("b.png"),
                scan: None,
                error: Some("invalid image".to_string()),
                processing_time_ms: 3,
            },
        ];

        write_summary(&path, &results).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header_len = reader.headers().unwrap().len();
        assert_eq!(header_len, 13);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == header_len));
        assert_eq!(&rows[0][2], "Jane");
        assert_eq!(&rows[0][10], "1");
        assert_eq!(&rows[1][1], "error");
        assert_eq!(&rows[1][12], "invalid image");
    }
}
