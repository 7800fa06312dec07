//! Driver parameter locations and registry view selection

use crate::{GuardianError, ProcessId, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Driver parameters key under `HKEY_LOCAL_MACHINE`.
pub const DEFAULT_PARAMETERS_KEY: &str = r"SYSTEM\CurrentControlSet\Services\HidGuardian\Parameters";

/// Subkey holding one child key per whitelisted process ID.
pub const WHITELIST_SUBKEY: &str = "Whitelist";

/// REG_MULTI_SZ value listing hidden hardware IDs.
pub const AFFECTED_DEVICES_VALUE: &str = "AffectedDevices";

/// REG_DWORD value enabling forced hiding.
pub const FORCE_VALUE: &str = "Force";

/// Which registry view to open on 64-bit Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryView {
    /// Always the 64-bit view, even from a 32-bit process
    #[default]
    Registry64,
    /// Always the 32-bit (WOW6432Node) view
    Registry32,
    /// Whatever view matches the calling process
    Native,
}

/// Where the driver configuration lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardianSettings {
    /// Parameters key path relative to `HKEY_LOCAL_MACHINE`
    pub parameters_key: String,
    /// Registry view used for every operation
    pub registry_view: RegistryView,
}

impl Default for GuardianSettings {
    fn default() -> Self {
        Self {
            parameters_key: DEFAULT_PARAMETERS_KEY.to_string(),
            registry_view: RegistryView::default(),
        }
    }
}

impl GuardianSettings {
    /// Settings rooted at a different parameters key.
    pub fn with_parameters_key(mut self, key: impl Into<String>) -> Self {
        self.parameters_key = key.into();
        self
    }

    /// Settings using a different registry view.
    pub fn with_registry_view(mut self, view: RegistryView) -> Self {
        self.registry_view = view;
        self
    }

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!(path = ?path, "Loading HidGuardian settings");
        let content = std::fs::read_to_string(path).map_err(|source| GuardianError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Reject empty keys and keys with leading, trailing, or doubled separators.
    pub fn validate(&self) -> Result<()> {
        let key = self.parameters_key.as_str();
        if key.trim().is_empty() {
            return Err(GuardianError::InvalidSettings(
                "parameters_key must not be empty".to_string(),
            ));
        }
        if key.starts_with('\\') || key.ends_with('\\') || key.contains(r"\\") {
            return Err(GuardianError::InvalidSettings(format!(
                "parameters_key has a stray separator: {key:?}"
            )));
        }
        Ok(())
    }

    /// Path of the whitelist key.
    pub fn whitelist_key(&self) -> String {
        format!(r"{}\{}", self.parameters_key, WHITELIST_SUBKEY)
    }

    /// Path of the key marking `pid` as whitelisted.
    pub fn whitelist_entry_key(&self, pid: ProcessId) -> String {
        format!(r"{}\{}\{}", self.parameters_key, WHITELIST_SUBKEY, pid)
    }
}
