//! Built-in device path and hardware ID patterns
//!
//! Patterns are case-sensitive and unanchored. Device interface paths are
//! reported by Windows in lower case (`\\?\hid#vid_054c&pid_05c4#...`),
//! hardware IDs in upper case (`HID\VID_054C&PID_05C4`).

use crate::{HwidError, Result};
use regex::Regex;
use std::sync::OnceLock;

const USB_PATTERN: &str = r"\\{2}\?\\(hid)#(vid_[a-z0-9]{4}&pid_[a-z0-9]{4}[^#]*)";

const BLUETOOTH_PATTERN: &str = r"\\{2}\?\\(hid)#([{(]?[0-9A-Fa-z]{8}[-]?([0-9A-Fa-z]{4}[-]?){3}[0-9A-Fa-z]{12}[)}]?_vid&[a-z0-9]{8}_pid&[^#]*)";

const HARDWARE_ID_PATTERN: &str = r"HID\\[{(]?[0-9A-Fa-z]{8}[-]?([0-9A-Fa-z]{4}[-]?){3}[0-9A-Fa-z]{12}[)}]?|HID\\VID_[a-zA-Z0-9]{4}&PID_[a-zA-Z0-9]{4}";

/// Device path notations understood by the extractor, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DevicePathNotation {
    /// `\\?\hid#vid_XXXX&pid_XXXX...#...`
    Usb,
    /// `\\?\hid#{service-guid}_vid&XXXXXXXX_pid&XXXX...#...`
    Bluetooth,
}

impl DevicePathNotation {
    /// All notations in the order they are tried. First match wins.
    pub const ALL: [DevicePathNotation; 2] = [DevicePathNotation::Usb, DevicePathNotation::Bluetooth];

    /// Short name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            DevicePathNotation::Usb => "usb",
            DevicePathNotation::Bluetooth => "bluetooth",
        }
    }

    /// Regular expression source for this notation.
    ///
    /// Capture group 1 is the device class token, group 2 the identifier token.
    pub fn pattern(self) -> &'static str {
        match self {
            DevicePathNotation::Usb => USB_PATTERN,
            DevicePathNotation::Bluetooth => BLUETOOTH_PATTERN,
        }
    }
}

pub(crate) struct Patterns {
    usb: Regex,
    bluetooth: Regex,
    hardware_id: Regex,
}

impl Patterns {
    fn compile() -> Result<Self> {
        Ok(Self {
            usb: compile_notation(DevicePathNotation::Usb)?,
            bluetooth: compile_notation(DevicePathNotation::Bluetooth)?,
            hardware_id: compile("hardware id", HARDWARE_ID_PATTERN)?,
        })
    }

    pub(crate) fn notation(&self, notation: DevicePathNotation) -> &Regex {
        match notation {
            DevicePathNotation::Usb => &self.usb,
            DevicePathNotation::Bluetooth => &self.bluetooth,
        }
    }

    pub(crate) fn hardware_id(&self) -> &Regex {
        &self.hardware_id
    }
}

fn compile_notation(notation: DevicePathNotation) -> Result<Regex> {
    compile(notation.name(), notation.pattern())
}

fn compile(name: &'static str, source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| HwidError::Pattern {
        name,
        message: e.to_string(),
    })
}

static PATTERNS: OnceLock<Result<Patterns>> = OnceLock::new();

/// Compiled patterns, built on first use.
pub(crate) fn patterns() -> Result<&'static Patterns> {
    PATTERNS
        .get_or_init(Patterns::compile)
        .as_ref()
        .map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_patterns_compile() -> Result<()> {
        let patterns = patterns()?;
        assert!(patterns.notation(DevicePathNotation::Usb).captures_len() >= 3);
        assert!(patterns.notation(DevicePathNotation::Bluetooth).captures_len() >= 3);
        Ok(())
    }

    #[test]
    fn test_notation_order_is_usb_first() {
        assert_eq!(
            DevicePathNotation::ALL,
            [DevicePathNotation::Usb, DevicePathNotation::Bluetooth]
        );
        assert_eq!(DevicePathNotation::Usb.name(), "usb");
        assert_eq!(DevicePathNotation::Bluetooth.name(), "bluetooth");
    }

    #[test]
    fn test_notation_pattern_sources() {
        assert_eq!(DevicePathNotation::Usb.pattern(), USB_PATTERN);
        assert_eq!(DevicePathNotation::Bluetooth.pattern(), BLUETOOTH_PATTERN);
        for notation in DevicePathNotation::ALL {
            assert!(notation.pattern().starts_with(r"\\{2}\?\\(hid)#"));
        }
    }

    #[test]
    fn test_patterns_are_case_sensitive() -> Result<()> {
        let usb = patterns()?.notation(DevicePathNotation::Usb);
        assert!(usb.is_match(r"\\?\hid#vid_054c&pid_05c4#x"));
        assert!(!usb.is_match(r"\\?\HID#VID_054C&PID_05C4#x"));
        Ok(())
    }
}
