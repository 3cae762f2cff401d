//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use super::schema::DoctorConfig;
use crate::error::{DoctorError, Result};

/// Default location: `~/.mobile-doctor/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".mobile-doctor").join("config.yml"))
}

/// Load and parse a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DoctorConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DoctorError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DoctorError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content, using `source_path` in error messages.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DoctorConfig> {
    if content.trim().is_empty() {
        return Ok(DoctorConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DoctorError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config from an explicit path, or from the default location.
///
/// An explicit path must exist. A missing default file yields the default
/// configuration.
pub fn load_config(config_override: Option<&Path>) -> Result<DoctorConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        _ => Ok(DoctorConfig::default()),
    }
}
