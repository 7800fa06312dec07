//! Fuzzes hardware ID extraction from device interface paths.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_device_path
#![no_main]
use hidguardian_hwid::{extract_hardware_id, is_valid_hardware_id, split_hardware_id_lines};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Extracted IDs always carry the upper-case class prefix.
    if let Ok(Some(id)) = extract_hardware_id(text) {
        assert!(id.as_str().starts_with("HID\\"));
    }
    for line in split_hardware_id_lines(text) {
        assert!(!line.is_empty());
        assert!(is_valid_hardware_id(line).is_ok());
    }
});
