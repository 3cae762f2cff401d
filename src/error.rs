//! Error types for mobile-doctor operations.
//!
//! This module defines [`DoctorError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probe failures never surface here; probes turn them into absent values
//! - Invalid caller input (an unknown platform name) is a `DoctorError`
//! - Missing or outdated tools are reported as [`Warning`](crate::doctor::Warning)
//!   data, not as errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mobile-doctor operations.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// No platform name was given to a platform-specific operation.
    #[error("You must specify a platform. The supported platforms are: {supported}")]
    MissingPlatform { supported: String },

    /// The platform name is not one of the supported mobile platforms.
    #[error("Platform {platform} is not supported. The supported platforms are: {supported}")]
    UnsupportedPlatform { platform: String, supported: String },

    /// External command exited with a non-zero status.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// External command could not be started at all.
    #[error("Failed to execute '{command}': {message}")]
    CommandSpawn { command: String, message: String },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DoctorError {
    /// Whether this error was caused by invalid caller input rather than I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DoctorError::MissingPlatform { .. } | DoctorError::UnsupportedPlatform { .. }
        )
    }
}

/// Result type alias for mobile-doctor operations.
pub type Result<T> = std::result::Result<T, DoctorError>;
