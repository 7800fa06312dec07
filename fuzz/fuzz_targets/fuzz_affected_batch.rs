//! Fuzzes affected-list mutation with arbitrary hardware ID batches.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_affected_batch
#![no_main]
use hidguardian_config::prelude::*;
use hidguardian_hwid::split_hardware_id_lines;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(guardian) = HidGuardian::new(
        MemoryRegistry::new(),
        StaticProcessTable::new(1),
        GuardianSettings::default(),
    ) else {
        return;
    };
    let batch = split_hardware_id_lines(text);
    if guardian.insert_to_affected(&batch).is_ok() {
        let Ok(stored) = guardian.affected() else {
            return;
        };
        assert!(stored.windows(2).all(|w| matches!(w, [a, b] if a < b)));
        assert!(stored.iter().all(|s| !s.trim().is_empty()));
    } else {
        // Rejected batches never write.
        assert_eq!(guardian.affected().ok(), Some(Vec::new()));
    }
});
