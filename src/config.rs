// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading the application
//! configuration with environment overrides applied.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;

/// Load configuration from a TOML file, falling back to defaults when the
/// file is absent or invalid, then apply environment overrides.
pub fn load(path: &Path) -> Config {
    let mut config = if path.exists() {
        Config::load_or_default(path)
    } else {
        log::debug!("No config file at {}, using defaults", path.display());
        Config::default()
    };
    config.apply_env_override();
    config
}

/// Load and validate, for the `validate` command.
pub fn load_validated(path: &Path) -> Result<Config> {
    let config = load(path);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_missing_file_defaults() {
        let config = load(Path::new("/nonexistent/uniadvise.toml"));
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_load_reads_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://backend:9000\"").unwrap();
        let config = load(file.path());
        assert_eq!(config.api.base_url, "http://backend:9000");
    }
}
