//! Platform independent pieces of the Windows backend
//!
//! Error mapping and `REG_MULTI_SZ` encoding live here so they can be
//! tested on every host.

use super::RegistryResult;
use crate::RegistryError;
use std::io;

// Win32 ERROR_BAD_FILE_TYPE, returned by winreg when a value has the wrong type.
const ERROR_BAD_FILE_TYPE: i32 = 222;

pub(crate) fn map_error(path: &str, e: io::Error) -> RegistryError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        RegistryError::AccessDenied(path.to_string())
    } else {
        RegistryError::io(path, e)
    }
}

pub(crate) fn map_value_error(
    path: &str,
    name: &str,
    expected: &'static str,
    e: io::Error,
) -> RegistryError {
    if e.raw_os_error() == Some(ERROR_BAD_FILE_TYPE) {
        unexpected_type(path, name, expected)
    } else {
        map_error(path, e)
    }
}

pub(crate) fn unexpected_type(path: &str, name: &str, expected: &'static str) -> RegistryError {
    RegistryError::UnexpectedType {
        path: path.to_string(),
        name: name.to_string(),
        expected,
    }
}

/// Missing values become `Ok(None)`, other failures go through [`map_value_error`].
pub(crate) fn absent_as_none<T>(
    path: &str,
    name: &str,
    expected: &'static str,
    read: io::Result<T>,
) -> RegistryResult<Option<T>> {
    match read {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(map_value_error(path, name, expected, e)),
    }
}

/// Decode raw little-endian `REG_MULTI_SZ` bytes.
///
/// The list ends at the first empty string, so empty data, a lone NUL and
/// the double-NUL terminator all yield no entries. A trailing odd byte is
/// ignored.
pub(crate) fn decode_multi_sz(bytes: &[u8]) -> Vec<String> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .filter_map(|pair| <[u8; 2]>::try_from(pair).ok())
        .map(u16::from_le_bytes)
        .collect();
    units
        .split(|&unit| unit == 0)
        .take_while(|entry| !entry.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}

/// Encode entries as `REG_MULTI_SZ` bytes: each entry NUL terminated, then a
/// closing NUL.
///
/// Empty entries cannot be represented and are skipped. Embedded NULs are
/// dropped from each entry.
pub(crate) fn encode_multi_sz(values: &[String]) -> Vec<u8> {
    let mut units: Vec<u16> = values
        .iter()
        .filter(|value| !value.is_empty())
        .flat_map(|value| {
            value
                .encode_utf16()
                .filter(|&unit| unit != 0)
                .chain(std::iter::once(0))
        })
        .collect();
    if units.is_empty() {
        units.push(0);
    }
    units.push(0);
    units.iter().flat_map(|unit| unit.to_le_bytes()).collect()
}
