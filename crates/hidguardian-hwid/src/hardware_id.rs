//! Hardware ID extraction and validation

use crate::patterns::{DevicePathNotation, patterns};
use crate::{HwidError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// A HID hardware ID such as `HID\VID_054C&PID_05C4`.
///
/// Values built with [`HardwareId::parse`] keep the caller's spelling and are
/// guaranteed to pass [`is_valid_hardware_id`]. Values returned by
/// [`extract_hardware_id`] are the upper-cased `class\identifier` form of a
/// device path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HardwareId(String);

impl HardwareId {
    /// Validate `candidate` and wrap it.
    pub fn parse(candidate: impl Into<String>) -> Result<Self> {
        let candidate = candidate.into();
        if is_valid_hardware_id(&candidate)? {
            Ok(Self(candidate))
        } else {
            Err(HwidError::Invalid(candidate))
        }
    }

    /// Borrow the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID and return the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HardwareId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for HardwareId {
    type Err = HwidError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HardwareId {
    type Error = HwidError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<HardwareId> for String {
    fn from(id: HardwareId) -> Self {
        id.0
    }
}

/// Check whether `candidate` contains a USB or Bluetooth HID hardware ID.
///
/// The check is unanchored: the ID may be embedded in a longer string.
pub fn is_valid_hardware_id(candidate: &str) -> Result<bool> {
    Ok(patterns()?.hardware_id().is_match(candidate))
}

/// Validate every candidate, failing on the first invalid one.
///
/// Nothing is returned unless all candidates pass, so callers can validate a
/// whole batch before mutating anything.
pub fn validate_all<I, S>(candidates: I) -> Result<Vec<HardwareId>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|candidate| HardwareId::parse(candidate.as_ref()))
        .collect()
}

/// Derive the hardware ID from a Windows device interface path.
///
/// USB notation is tried first, then Bluetooth. Returns `Ok(None)` when the
/// path matches neither.
pub fn extract_hardware_id(device_path: &str) -> Result<Option<HardwareId>> {
    let patterns = patterns()?;
    for notation in DevicePathNotation::ALL {
        let Some(caps) = patterns.notation(notation).captures(device_path) else {
            continue;
        };
        let class = caps.get(1).map_or("", |m| m.as_str());
        let identifier = caps.get(2).map_or("", |m| m.as_str());
        let id = format!("{class}\\{identifier}").to_uppercase();
        trace!(notation = notation.name(), hardware_id = %id, "Extracted hardware ID");
        return Ok(Some(HardwareId(id)));
    }
    trace!(device_path, "Device path matches no known notation");
    Ok(None)
}

/// Like [`extract_hardware_id`], but returns an empty string when nothing matches.
pub fn extract_hardware_id_or_empty(device_path: &str) -> Result<String> {
    Ok(extract_hardware_id(device_path)?
        .map(HardwareId::into_string)
        .unwrap_or_default())
}

/// Split a newline separated list of hardware IDs.
///
/// Accepts `\r\n` and `\n` line endings and drops empty lines. Entries are
/// not trimmed or validated.
pub fn split_hardware_id_lines(text: &str) -> Vec<&str> {
    text.split("\r\n")
        .flat_map(|chunk| chunk.split('\n'))
        .filter(|line| !line.is_empty())
        .collect()
}
