//! Validate command handler

use std::path::PathBuf;

use anyhow::Result;

use super::load_desired;
use crate::output::Output;

/// Check a links file without contacting the service
pub fn run(settings: Option<&PathBuf>, file: Option<PathBuf>, output: &Output) -> Result<()> {
    let desired = load_desired(settings, file)?;
    output.print_validation(&desired.path.display().to_string(), &desired.links);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_validate_accepts_multi_document_file() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("config.toml");
        let file = dir.path().join("links.yaml");
        std::fs::write(
            &file,
            "domain: a.io\nlinks:\n  x:\n    url: https://x.com\n---\n\
             domain: b.io\nlinks: {}\n",
        )
        .unwrap();

        let output = Output::new(OutputFormat::Quiet);
        assert!(run(Some(&settings), Some(file), &output).is_ok());
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("config.toml");
        let file = dir.path().join("links.yaml");
        std::fs::write(&file, "domain: a.io\nlinks:\n  x:\n    url: /relative\n").unwrap();

        let output = Output::new(OutputFormat::Quiet);
        assert!(run(Some(&settings), Some(file), &output).is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = TempDir::new().unwrap();
        let settings = dir.path().join("config.toml");

        let output = Output::new(OutputFormat::Quiet);
        let err = run(
            Some(&settings),
            Some(dir.path().join("missing.yaml")),
            &output,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }
}
