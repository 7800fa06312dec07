//! Registry access seam
//!
//! The facade talks to the registry only through [`RegistryStore`]. Paths are
//! backslash separated and relative to `HKEY_LOCAL_MACHINE`. Backends treat
//! names case-insensitively, like the Windows registry.
//!
//! - [`WindowsRegistry`]: the real registry via `winreg` (Windows only)
//! - [`MemoryRegistry`]: an in-process tree for tests and other platforms

mod memory;
#[cfg(any(windows, test))]
mod win32;
#[cfg(windows)]
mod windows;

pub use memory::{MemoryRegistry, MemoryValue};
#[cfg(windows)]
pub use windows::WindowsRegistry;

use crate::RegistryError;

/// Result type for registry backends
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Minimal key/value operations the facade needs.
///
/// Absent keys and values are reported as `None` or `false`, never as errors.
pub trait RegistryStore: Send + Sync {
    /// Whether the key exists.
    fn key_exists(&self, path: &str) -> RegistryResult<bool>;

    /// Create the key and any missing parents. Existing keys are left alone.
    fn create_key(&self, path: &str) -> RegistryResult<()>;

    /// Delete a key without children. Returns `false` if it did not exist.
    fn delete_key(&self, path: &str) -> RegistryResult<bool>;

    /// Names of the direct subkeys, or `None` if the key does not exist.
    fn subkey_names(&self, path: &str) -> RegistryResult<Option<Vec<String>>>;

    /// Read a REG_DWORD value.
    fn read_dword(&self, path: &str, name: &str) -> RegistryResult<Option<u32>>;

    /// Write a REG_DWORD value, creating the key if needed.
    fn write_dword(&self, path: &str, name: &str, value: u32) -> RegistryResult<()>;

    /// Read a REG_MULTI_SZ value.
    fn read_multi_string(&self, path: &str, name: &str) -> RegistryResult<Option<Vec<String>>>;

    /// Write a REG_MULTI_SZ value, creating the key if needed.
    fn write_multi_string(&self, path: &str, name: &str, values: &[String]) -> RegistryResult<()>;
}

impl<T: RegistryStore + ?Sized> RegistryStore for &T {
    fn key_exists(&self, path: &str) -> RegistryResult<bool> {
        (**self).key_exists(path)
    }

    fn create_key(&self, path: &str) -> RegistryResult<()> {
        (**self).create_key(path)
    }

    fn delete_key(&self, path: &str) -> RegistryResult<bool> {
        (**self).delete_key(path)
    }

    fn subkey_names(&self, path: &str) -> RegistryResult<Option<Vec<String>>> {
        (**self).subkey_names(path)
    }

    fn read_dword(&self, path: &str, name: &str) -> RegistryResult<Option<u32>> {
        (**self).read_dword(path, name)
    }

    fn write_dword(&self, path: &str, name: &str, value: u32) -> RegistryResult<()> {
        (**self).write_dword(path, name, value)
    }

    fn read_multi_string(&self, path: &str, name: &str) -> RegistryResult<Option<Vec<String>>> {
        (**self).read_multi_string(path, name)
    }

    fn write_multi_string(&self, path: &str, name: &str, values: &[String]) -> RegistryResult<()> {
        (**self).write_multi_string(path, name, values)
    }
}
