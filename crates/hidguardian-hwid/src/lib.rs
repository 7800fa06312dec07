//! Hardware ID handling for the HidGuardian driver
//!
//! HidGuardian identifies the devices it hides by hardware ID strings such as
//! `HID\VID_054C&PID_05C4` or `HID\{00001124-0000-1000-8000-00805F9B34FB}_VID&0002054C_PID&05C4`.
//! This crate turns raw Windows device interface paths into those IDs and
//! validates IDs supplied by callers before they are written to the driver's
//! configuration.
//!
//! # Example
//!
//! ```
//! use hidguardian_hwid::{extract_hardware_id, HardwareId};
//!
//! # fn main() -> hidguardian_hwid::Result<()> {
//! let path = r"\\?\hid#vid_054c&pid_05c4#7&1b5ab0a6&0&0000#{4d1e55b2-f16f-11cf-88cb-001111000030}";
//! let id = extract_hardware_id(path)?;
//! assert_eq!(id.as_ref().map(HardwareId::as_str), Some(r"HID\VID_054C&PID_05C4"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod hardware_id;
pub mod patterns;

pub use error::HwidError;
pub use hardware_id::{
    HardwareId, extract_hardware_id, extract_hardware_id_or_empty, is_valid_hardware_id,
    split_hardware_id_lines, validate_all,
};
pub use patterns::DevicePathNotation;

/// A specialized `Result` type for hardware ID operations.
pub type Result<T> = std::result::Result<T, HwidError>;
