//! Error types for HidGuardian configuration access

use hidguardian_hwid::HwidError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`RegistryStore`](crate::registry::RegistryStore) backend.
///
/// A missing key or value is not an error; backends report it as `None`/`false`.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The caller lacks rights to read or write the key
    #[error("Access denied to registry key {0}")]
    AccessDenied(String),

    /// A value exists but holds a different registry type than expected
    #[error("Registry value {name} under {path} has an unexpected type (expected {expected})")]
    UnexpectedType {
        /// Key path
        path: String,
        /// Value name
        name: String,
        /// Expected registry type
        expected: &'static str,
    },

    /// The key path is empty or malformed
    #[error("Invalid registry path: {0:?}")]
    InvalidPath(String),

    /// Any other OS-level failure
    #[error("Registry I/O error at {path}: {source}")]
    Io {
        /// Key path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    /// Wrap an I/O error with the key path it occurred on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        RegistryError::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the failure is a permissions problem.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, RegistryError::AccessDenied(_))
    }
}

/// Top-level error for HidGuardian configuration operations.
#[derive(Error, Debug)]
pub enum GuardianError {
    /// Registry backend failure
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Hardware ID rejected or pattern failure
    #[error(transparent)]
    HardwareId(#[from] HwidError),

    /// Settings file could not be read
    #[error("Failed to read settings from {path}: {source}")]
    SettingsIo {
        /// Settings file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be parsed
    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings parsed but are unusable
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl GuardianError {
    /// Check if the operation was rejected because of caller input.
    ///
    /// Rejected calls never write to the registry.
    pub fn is_rejected_input(&self) -> bool {
        matches!(self, GuardianError::HardwareId(e) if e.is_invalid_input())
    }

    /// Check if the underlying registry refused access.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, GuardianError::Registry(e) if e.is_access_denied())
    }
}
