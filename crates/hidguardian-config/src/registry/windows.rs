//! Windows registry backend

use super::win32::{
    absent_as_none, decode_multi_sz, encode_multi_sz, map_error, unexpected_type,
};
use super::{RegistryResult, RegistryStore};
use crate::settings::RegistryView;
use std::io;
use tracing::trace;
use winreg::enums::{
    HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY, KEY_WRITE,
    RegType,
};
use winreg::{RegKey, RegValue};

#[derive(Debug, Clone, Copy)]
enum Hive {
    LocalMachine,
    // Writable without elevation; used by the round-trip tests.
    #[cfg_attr(not(test), allow(dead_code))]
    CurrentUser,
}

/// `HKEY_LOCAL_MACHINE` through `winreg`. Each call opens and closes its own handle.
#[derive(Debug, Clone, Copy)]
pub struct WindowsRegistry {
    hive: Hive,
    view_flags: u32,
}

impl WindowsRegistry {
    /// Open keys in the given view.
    pub fn new(view: RegistryView) -> Self {
        let view_flags = match view {
            RegistryView::Registry64 => KEY_WOW64_64KEY,
            RegistryView::Registry32 => KEY_WOW64_32KEY,
            RegistryView::Native => 0,
        };
        Self {
            hive: Hive::LocalMachine,
            view_flags,
        }
    }

    fn root(&self) -> RegKey {
        match self.hive {
            Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
            Hive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
        }
    }

    /// Open for reading; `None` if the key is absent.
    fn open_read(&self, path: &str) -> RegistryResult<Option<RegKey>> {
        match self.root().open_subkey_with_flags(path, KEY_READ | self.view_flags) {
            Ok(key) => Ok(Some(key)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_error(path, e)),
        }
    }

    fn create_write(&self, path: &str) -> RegistryResult<RegKey> {
        self.root()
            .create_subkey_with_flags(path, KEY_READ | KEY_WRITE | self.view_flags)
            .map(|(key, _disposition)| key)
            .map_err(|e| map_error(path, e))
    }
}

impl Default for WindowsRegistry {
    fn default() -> Self {
        Self::new(RegistryView::default())
    }
}

impl RegistryStore for WindowsRegistry {
    fn key_exists(&self, path: &str) -> RegistryResult<bool> {
        Ok(self.open_read(path)?.is_some())
    }

    fn create_key(&self, path: &str) -> RegistryResult<()> {
        trace!(path, "RegCreateKeyEx");
        self.create_write(path).map(drop)
    }

    fn delete_key(&self, path: &str) -> RegistryResult<bool> {
        trace!(path, "RegDeleteKeyEx");
        match self.root().delete_subkey_with_flags(path, self.view_flags) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_error(path, e)),
        }
    }

    fn subkey_names(&self, path: &str) -> RegistryResult<Option<Vec<String>>> {
        let Some(key) = self.open_read(path)? else {
            return Ok(None);
        };
        key.enum_keys()
            .collect::<io::Result<Vec<String>>>()
            .map(Some)
            .map_err(|e| map_error(path, e))
    }

    fn read_dword(&self, path: &str, name: &str) -> RegistryResult<Option<u32>> {
        let Some(key) = self.open_read(path)? else {
            return Ok(None);
        };
        absent_as_none(path, name, "REG_DWORD", key.get_value::<u32, _>(name))
    }

    fn write_dword(&self, path: &str, name: &str, value: u32) -> RegistryResult<()> {
        trace!(path, name, value, "RegSetValueEx REG_DWORD");
        self.create_write(path)?
            .set_value(name, &value)
            .map_err(|e| map_error(path, e))
    }

    fn read_multi_string(&self, path: &str, name: &str) -> RegistryResult<Option<Vec<String>>> {
        let Some(key) = self.open_read(path)? else {
            return Ok(None);
        };
        let Some(raw) = absent_as_none(path, name, "REG_MULTI_SZ", key.get_raw_value(name))? else {
            return Ok(None);
        };
        if !matches!(raw.vtype, RegType::REG_MULTI_SZ) {
            return Err(unexpected_type(path, name, "REG_MULTI_SZ"));
        }
        Ok(Some(decode_multi_sz(&raw.bytes)))
    }

    fn write_multi_string(&self, path: &str, name: &str, values: &[String]) -> RegistryResult<()> {
        trace!(path, name, count = values.len(), "RegSetValueEx REG_MULTI_SZ");
        self.create_write(path)?
            .set_raw_value(
                name,
                &RegValue {
                    bytes: encode_multi_sz(values),
                    vtype: RegType::REG_MULTI_SZ,
                },
            )
            .map_err(|e| map_error(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryError;

    struct ScratchKey {
        registry: WindowsRegistry,
        path: String,
    }

    impl ScratchKey {
        fn new(test: &str) -> Self {
            Self {
                registry: WindowsRegistry {
                    hive: Hive::CurrentUser,
                    view_flags: 0,
                },
                path: format!(r"Software\hidguardian-config-tests\{test}-{}", std::process::id()),
            }
        }
    }

    impl Drop for ScratchKey {
        fn drop(&mut self) {
            if let Err(e) = RegKey::predef(HKEY_CURRENT_USER).delete_subkey_all(&self.path) {
                trace!(error = %e, "Scratch key cleanup failed");
            }
        }
    }

    #[test]
    fn test_empty_multi_string_reads_back_empty() -> RegistryResult<()> {
        let scratch = ScratchKey::new("empty");
        let reg = &scratch.registry;

        reg.write_multi_string(&scratch.path, "AffectedDevices", &[])?;
        assert_eq!(
            reg.read_multi_string(&scratch.path, "AffectedDevices")?,
            Some(Vec::new())
        );
        Ok(())
    }

    #[test]
    fn test_multi_string_round_trip() -> RegistryResult<()> {
        let scratch = ScratchKey::new("list");
        let reg = &scratch.registry;
        let ids = vec![
            r"HID\VID_045E&PID_028E".to_string(),
            r"HID\VID_054C&PID_05C4&MI_00".to_string(),
        ];

        reg.write_multi_string(&scratch.path, "AffectedDevices", &ids)?;
        assert_eq!(reg.read_multi_string(&scratch.path, "AffectedDevices")?, Some(ids));
        assert_eq!(reg.read_multi_string(&scratch.path, "Missing")?, None);
        Ok(())
    }

    #[test]
    fn test_absent_keys_and_wrong_types() -> RegistryResult<()> {
        let scratch = ScratchKey::new("types");
        let reg = &scratch.registry;

        assert!(!reg.key_exists(&scratch.path)?);
        assert_eq!(reg.read_dword(&scratch.path, "Force")?, None);
        assert_eq!(reg.subkey_names(&scratch.path)?, None);
        assert!(!reg.delete_key(&format!(r"{}\Whitelist\1", scratch.path))?);

        reg.write_dword(&scratch.path, "Force", 1)?;
        assert_eq!(reg.read_dword(&scratch.path, "Force")?, Some(1));
        assert!(matches!(
            reg.read_multi_string(&scratch.path, "Force"),
            Err(RegistryError::UnexpectedType { expected: "REG_MULTI_SZ", .. })
        ));

        let entry = format!(r"{}\Whitelist\42", scratch.path);
        reg.create_key(&entry)?;
        assert_eq!(
            reg.subkey_names(&format!(r"{}\Whitelist", scratch.path))?,
            Some(vec!["42".to_string()])
        );
        assert!(reg.delete_key(&entry)?);
        Ok(())
    }
}
