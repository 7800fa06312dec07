//! Registry configuration for the HidGuardian HID filter driver
//!
//! HidGuardian hides selected HID devices from every process except those on
//! its whitelist. It reads its configuration from
//! `HKLM\SYSTEM\CurrentControlSet\Services\HidGuardian\Parameters`:
//!
//! - `Whitelist\<pid>`: one subkey per process allowed to see hidden devices
//! - `AffectedDevices` (REG_MULTI_SZ): hardware IDs to hide
//! - `Force` (REG_DWORD): hide devices even from exempt processes
//!
//! This crate reads and writes those entries through [`HidGuardian`].
//!
//! # Architecture
//!
//! - [`registry`]: the [`RegistryStore`] seam, with a `winreg` backend on
//!   Windows and an in-memory backend everywhere
//! - [`process`]: the [`ProcessTable`] seam, backed by `sysinfo`
//! - [`settings`]: key locations and registry view
//! - [`guardian`]: the facade, with operations split across the whitelist,
//!   force, and affected modules
//!
//! Missing keys and values read as empty or `false`. A batch containing an
//! invalid hardware ID is rejected before anything is written.
//!
//! # Example
//!
//! ```
//! use hidguardian_config::prelude::*;
//!
//! # fn main() -> hidguardian_config::Result<()> {
//! let guardian = HidGuardian::new(
//!     MemoryRegistry::new(),
//!     StaticProcessTable::new(4242),
//!     GuardianSettings::default(),
//! )?;
//!
//! guardian.insert_to_affected([r"HID\VID_054C&PID_05C4"])?;
//! guardian.add_current_process_to_whitelist()?;
//! guardian.set_force(true)?;
//!
//! assert_eq!(guardian.affected()?, vec![r"HID\VID_054C&PID_05C4"]);
//! assert_eq!(guardian.whitelist()?, vec![4242]);
//! assert!(guardian.force()?);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod affected;
pub mod error;
pub mod force;
pub mod guardian;
pub mod prelude;
pub mod process;
pub mod registry;
pub mod settings;
pub mod whitelist;

pub use error::{GuardianError, RegistryError};
pub use guardian::HidGuardian;
pub use process::{ProcessTable, StaticProcessTable, SystemProcessTable};
pub use registry::{MemoryRegistry, MemoryValue, RegistryStore};
#[cfg(windows)]
pub use registry::WindowsRegistry;
pub use settings::{GuardianSettings, RegistryView};
pub use whitelist::ClearWhitelistOptions;

pub use hidguardian_hwid::{HardwareId, extract_hardware_id, extract_hardware_id_or_empty};

/// Windows process identifier.
pub type ProcessId = u32;

/// A specialized `Result` type for HidGuardian configuration operations.
pub type Result<T> = std::result::Result<T, GuardianError>;
