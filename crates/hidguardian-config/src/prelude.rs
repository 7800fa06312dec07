//! Convenience re-exports for common types

pub use crate::error::{GuardianError, RegistryError};
pub use crate::guardian::HidGuardian;
pub use crate::process::{ProcessTable, StaticProcessTable, SystemProcessTable};
#[cfg(windows)]
pub use crate::registry::WindowsRegistry;
pub use crate::registry::{MemoryRegistry, MemoryValue, RegistryStore};
pub use crate::settings::{GuardianSettings, RegistryView};
pub use crate::whitelist::ClearWhitelistOptions;
pub use crate::ProcessId;

pub use hidguardian_hwid::{HardwareId, extract_hardware_id, extract_hardware_id_or_empty};
