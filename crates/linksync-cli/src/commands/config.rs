//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use linksync_core::Config;

use crate::output::{Output, OutputFormat};

const NOT_SET: &str = "(not set)";

/// Show current configuration
///
/// The API key is never printed in full.
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let api_key = config.masked_api_key();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_url": config.api_url,
                    "api_key": api_key,
                    "links_file": config.links_file,
                    "concurrency": config.concurrency,
                    "timeout_secs": config.timeout_secs
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.links_file.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  api_url:      {}", config.api_url);
            println!("  api_key:      {}", api_key.as_deref().unwrap_or(NOT_SET));
            println!("  links_file:   {}", config.links_file.display());
            println!("  concurrency:  {}", config.concurrency);
            println!("  timeout_secs: {}", config.timeout_secs);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);

    // Environment overrides stay out of the file
    let mut config = Config::load_file_only(&save_path).context("Failed to load configuration")?;

    apply_setting(&mut config, &key, &value)?;

    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    let shown = if key == "api_key" {
        config.masked_api_key().unwrap_or_else(|| NOT_SET.to_string())
    } else {
        value
    };
    output.success(&format!("Set {} = {}", key, shown));

    Ok(())
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "api_url" => {
            if value.is_empty() {
                bail!("api_url cannot be empty");
            }
            config.api_url = value.to_string();
        }
        "api_key" => {
            config.api_key = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.to_string())
            };
        }
        "links_file" => {
            if value.is_empty() {
                bail!("links_file cannot be empty");
            }
            config.links_file = value.into();
        }
        "concurrency" => {
            let n: usize = value
                .parse()
                .context("Invalid value for concurrency. Use a positive integer.")?;
            if n == 0 {
                bail!("Invalid value for concurrency. Use a positive integer.");
            }
            config.concurrency = n;
        }
        "timeout_secs" => {
            let secs: u64 = value
                .parse()
                .context("Invalid value for timeout_secs. Use a positive number of seconds.")?;
            if secs == 0 {
                bail!("Invalid value for timeout_secs. Use a positive number of seconds.");
            }
            config.timeout_secs = secs;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: api_url, api_key, links_file, concurrency, timeout_secs",
                key
            );
        }
    }
    Ok(())
}
