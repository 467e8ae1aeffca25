//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use idscan_core::IdScanConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "ocr.language")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a bare string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("idscan")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<IdScanConfig> {
    if path.exists() {
        Ok(IdScanConfig::from_file(path)?)
    } else {
        Ok(IdScanConfig::default())
    }
}

/// `ocr.language` -> `/ocr/language`
fn json_pointer(key: &str) -> String {
    format!("/{}", key.replace('.', "/"))
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    IdScanConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;

    let value = json
        .pointer(&json_pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;

    let parsed_value: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;

    // Optional sections are omitted when unset, so allow creating the leaf.
    let (parent_key, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (json_pointer(parent), leaf),
        None => (String::new(), key),
    };

    let parent = json
        .pointer_mut(&parent_key)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    parent.insert(leaf.to_string(), parsed_value.clone());

    let config: IdScanConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'idscan config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_pointer() {
        assert_eq!(json_pointer("ocr.language"), "/ocr/language");
        assert_eq!(json_pointer("models"), "/models");
    }

    #[test]
    fn test_set_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        set_config(&path, "ocr.language", "eng").unwrap();
        set_config(&path, "ocr.max_image_size", "1024").unwrap();
        set_config(&path, "models.tessdata_dir", "/usr/share/tessdata").unwrap();

        let config = IdScanConfig::from_file(&path).unwrap();
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.max_image_size, 1024);
        assert_eq!(
            config.models.tessdata_dir,
            Some(PathBuf::from("/usr/share/tessdata"))
        );
    }

    #[test]
    fn test_set_rejects_bad_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(set_config(&path, "ocr.max_image_size", "large").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_set_unknown_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(set_config(&path, "pdf.render_dpi", "300").is_err());
    }
}
