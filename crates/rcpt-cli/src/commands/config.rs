//! Config command - manage configuration and the reference vendor list.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use rcpt_core::RcptConfig;

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
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "validation.vendor_max_len")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a bare string)
        value: String,
    },

    /// List known vendors in match-priority order
    Vendors,

    /// Add a known vendor
    AddVendor {
        /// Vendor name as it should appear in records
        name: String,
        /// Insert at this position instead of appending (0 = highest priority)
        #[arg(long)]
        position: Option<usize>,
    },

    /// Remove a known vendor (case-insensitive)
    RemoveVendor {
        name: String,
    },

    /// Show configuration file path
    Path,
}

/// Load configuration from `config_path`, else the default location, else defaults.
pub fn load(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    let path = resolve_path(config_path);
    if config_path.is_some() || path.exists() {
        Ok(RcptConfig::from_file(&path)?)
    } else {
        Ok(RcptConfig::default())
    }
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_path(config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Vendors => list_vendors(&path),
        ConfigCommand::AddVendor { name, position } => add_vendor(&path, &name, position),
        ConfigCommand::RemoveVendor { name } => remove_vendor(&path, &name),
        ConfigCommand::Path => show_path(&path),
    }
}

fn resolve_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rcpt")
        .join("config.json")
}

fn read_or_default(path: &Path) -> anyhow::Result<RcptConfig> {
    if path.exists() {
        Ok(RcptConfig::from_file(path)?)
    } else {
        Ok(RcptConfig::default())
    }
}

fn write(path: &Path, config: &RcptConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = read_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write(path, &RcptConfig::default())?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(read_or_default(path)?)?;

    let mut current = &json;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(read_or_default(path)?)?;

    let (parents, last) = match key.rsplit_once('.') {
        Some((parents, last)) => (Some(parents), last),
        None => (None, key),
    };

    let mut current = &mut json;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        current = current
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }

    let object = current
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !object.contains_key(last) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    object.insert(last.to_string(), parsed_value.clone());

    let config: RcptConfig = serde_json::from_value(json)?;
    write(path, &config)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn list_vendors(path: &Path) -> anyhow::Result<()> {
    let config = read_or_default(path)?;
    for (i, vendor) in config.extraction.vendors.iter().enumerate() {
        println!("{:>3}. {}", i + 1, vendor);
    }
    Ok(())
}

fn add_vendor(path: &Path, name: &str, position: Option<usize>) -> anyhow::Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Vendor name cannot be empty");
    }

    let mut config = read_or_default(path)?;
    let vendors = &mut config.extraction.vendors;

    if vendors.iter().any(|v| v.eq_ignore_ascii_case(name)) {
        anyhow::bail!("Vendor already known: {}", name);
    }

    let index = position.unwrap_or(vendors.len()).min(vendors.len());
    vendors.insert(index, name.to_string());
    write(path, &config)?;

    println!(
        "{} Added {} at position {}",
        style("✓").green(),
        name,
        index + 1
    );

    Ok(())
}

fn remove_vendor(path: &Path, name: &str) -> anyhow::Result<()> {
    let mut config = read_or_default(path)?;
    let before = config.extraction.vendors.len();
    config
        .extraction
        .vendors
        .retain(|v| !v.eq_ignore_ascii_case(name.trim()));

    if config.extraction.vendors.len() == before {
        anyhow::bail!("Vendor not found: {}", name);
    }

    write(path, &config)?;
    println!("{} Removed {}", style("✓").green(), name.trim());

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'rcpt config init' to create a configuration file.");
    }

    Ok(())
}
