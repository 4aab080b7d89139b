//! Command handlers

pub mod config;
pub mod diff;
pub mod sync;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use linksync_core::{load_links, Config, LinkConfig};

/// Everything a command needs before it talks to the service
#[derive(Debug)]
pub struct Desired {
    pub config: Config,
    pub path: PathBuf,
    pub links: LinkConfig,
}

/// Load settings and the links file
///
/// An explicit `file` wins over the configured `links_file`.
pub fn load_desired(settings: Option<&PathBuf>, file: Option<PathBuf>) -> Result<Desired> {
    let config =
        Config::load_with_cli_override(settings).context("Failed to load configuration")?;
    let path = file.unwrap_or_else(|| config.links_file.clone());
    let links = load_links(&path)?;

    Ok(Desired {
        config,
        path,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_desired_explicit_file() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("config.toml");
        let file = dir.path().join("links.yaml");
        std::fs::write(
            &file,
            "domain: s.io\nlinks:\n  docs:\n    url: https://docs.rs\n",
        )
        .unwrap();

        let desired = load_desired(Some(&settings), Some(file.clone())).unwrap();
        assert_eq!(desired.path, file);
        assert_eq!(desired.links.link_count(), 1);
    }

    #[test]
    fn test_load_desired_reports_invalid_file() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("config.toml");
        let file = dir.path().join("links.yaml");
        std::fs::write(&file, "links:\n  docs:\n    url: https://docs.rs\n").unwrap();

        let err = load_desired(Some(&settings), Some(file)).unwrap_err();
        assert!(err.to_string().contains("domain"));
    }
}
