//! Process command - extract identity fields from a single image.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::{build_scanner, format_record, is_image_file, load_config, EngineArgs, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(flatten)]
    engine: EngineArgs,

    /// List labels that were not found in the recognized text
    #[arg(long)]
    show_missing: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    args.engine.apply(&mut config);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if !is_image_file(&args.input) {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    pb.set_message("Loading image...");
    let image = fs::read(&args.input)?;

    pb.set_message("Running OCR...");
    let scanner = build_scanner(&config)?;
    let result = scanner.scan(&image).await;

    pb.finish_and_clear();
    let result = result?;

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing {
        if result.missing.is_empty() {
            eprintln!("{} All labels found", style("ℹ").blue());
        } else {
            eprintln!("{}", style("Labels not found:").yellow());
            for field in &result.missing {
                eprintln!("  - {}", field.label());
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
