//! Affected device list
//!
//! `AffectedDevices` is a REG_MULTI_SZ of hardware IDs the driver hides. Every
//! write stores a list with no blank entries and no duplicates, sorted
//! ascending by ordinal string comparison.

use crate::Result;
use crate::guardian::HidGuardian;
use crate::process::ProcessTable;
use crate::registry::RegistryStore;
use crate::settings::AFFECTED_DEVICES_VALUE;
use hidguardian_hwid::{HardwareId, validate_all};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

/// Drop blank entries, deduplicate, sort.
fn normalize(entries: impl IntoIterator<Item = String>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

impl<S: RegistryStore, P: ProcessTable> HidGuardian<S, P> {
    /// Add hardware IDs to the affected list. Returns the list as written.
    ///
    /// If any ID is invalid the whole call is rejected and nothing is written.
    pub fn insert_to_affected<I, T>(&self, hardware_ids: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let ids = self.validate_batch(hardware_ids)?;
        let current = self.stored_affected()?;
        let updated = normalize(
            current
                .into_iter()
                .chain(ids.into_iter().map(HardwareId::into_string)),
        );
        self.write_affected(&updated)?;
        Ok(updated)
    }

    /// Remove hardware IDs (exact matches) from the affected list. Returns the
    /// list as written.
    ///
    /// If any ID is invalid the whole call is rejected and nothing is written.
    pub fn remove_from_affected<I, T>(&self, hardware_ids: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let ids: HashSet<String> = self
            .validate_batch(hardware_ids)?
            .into_iter()
            .map(HardwareId::into_string)
            .collect();
        let current = self.stored_affected()?;
        let updated = normalize(current.into_iter().filter(|entry| !ids.contains(entry)));
        self.write_affected(&updated)?;
        Ok(updated)
    }

    /// The affected list exactly as stored, or empty if absent.
    pub fn affected(&self) -> Result<Vec<String>> {
        self.stored_affected()
    }

    /// Empty the affected list. Does nothing if the parameters key is absent.
    pub fn clear_affected(&self) -> Result<()> {
        if !self.store.key_exists(&self.settings.parameters_key)? {
            debug!("No parameters key, affected list already empty");
            return Ok(());
        }
        self.write_affected(&[])
    }

    fn validate_batch<I, T>(&self, hardware_ids: I) -> Result<Vec<HardwareId>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Ok(validate_all(hardware_ids)
            .inspect_err(|e| warn!(error = %e, "Rejected hardware ID batch"))?)
    }

    fn stored_affected(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .read_multi_string(&self.settings.parameters_key, AFFECTED_DEVICES_VALUE)?
            .unwrap_or_default())
    }

    fn write_affected(&self, entries: &[String]) -> Result<()> {
        self.store.write_multi_string(
            &self.settings.parameters_key,
            AFFECTED_DEVICES_VALUE,
            entries,
        )?;
        info!(count = entries.len(), "Wrote affected device list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::StaticProcessTable;
    use crate::registry::{MemoryRegistry, MemoryValue};
    use crate::settings::GuardianSettings;
    use tracing_test::traced_test;

    const DS4: &str = r"HID\VID_054C&PID_05C4";
    const DS4_V2: &str = r"HID\VID_054C&PID_09CC";
    const XBOX: &str = r"HID\VID_045E&PID_028E";
    const DS4_BT: &str = r"HID\{00001124-0000-1000-8000-00805F9B34FB}_VID&0002054C_PID&05C4";

    fn guardian() -> Result<HidGuardian<MemoryRegistry, StaticProcessTable>> {
        HidGuardian::new(
            MemoryRegistry::new(),
            StaticProcessTable::new(1),
            GuardianSettings::default(),
        )
    }

    #[test]
    fn test_normalize() {
        let input = ["b", " ", "a", "", "b", "\t", "C"].map(String::from);
        assert_eq!(normalize(input), vec!["C", "a", "b"]);
    }

    #[test]
    fn test_empty_when_absent() -> Result<()> {
        let g = guardian()?;
        assert!(g.affected()?.is_empty());
        g.clear_affected()?;
        assert!(!g.store().key_exists(&g.settings().parameters_key)?);
        Ok(())
    }

    #[test]
    fn test_insert_sorts_and_dedups() -> Result<()> {
        let g = guardian()?;
        g.insert_to_affected([XBOX, DS4])?;
        let written = g.insert_to_affected([DS4_V2, DS4])?;

        assert_eq!(written, vec![XBOX, DS4, DS4_V2]);
        assert_eq!(g.affected()?, written);
        Ok(())
    }

    #[test]
    fn test_insert_accepts_bluetooth_ids() -> Result<()> {
        let g = guardian()?;
        g.insert_to_affected([DS4_BT, DS4])?;
        assert_eq!(g.affected()?, vec![DS4, DS4_BT]);
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_invalid_batch_rejected_without_write() -> Result<()> {
        let g = guardian()?;
        g.insert_to_affected([DS4])?;

        let err = g.insert_to_affected([XBOX, "USB\\VID_045E&PID_028E"]);
        assert!(err.is_err_and(|e| e.is_rejected_input()));
        assert_eq!(g.affected()?, vec![DS4]);
        assert!(logs_contain("Rejected hardware ID batch"));

        let err = g.remove_from_affected([DS4, ""]);
        assert!(err.is_err_and(|e| e.is_rejected_input()));
        assert_eq!(g.affected()?, vec![DS4]);
        Ok(())
    }

    #[test]
    fn test_remove_exact_matches() -> Result<()> {
        let g = guardian()?;
        g.insert_to_affected([DS4, DS4_V2, XBOX])?;

        let written = g.remove_from_affected([DS4_V2, r"HID\VID_054c&PID_05c4"])?;
        assert_eq!(written, vec![XBOX, DS4]);
        assert_eq!(g.affected()?, written);
        Ok(())
    }

    #[test]
    fn test_remove_renormalizes_existing_list() -> Result<()> {
        let g = guardian()?;
        let key = g.settings().parameters_key.clone();
        let raw = [XBOX, "", DS4, XBOX].map(String::from).to_vec();
        g.store()
            .set_value(&key, AFFECTED_DEVICES_VALUE, MemoryValue::MultiString(raw.clone()))?;

        assert_eq!(g.affected()?, raw);
        assert_eq!(g.remove_from_affected([DS4_V2])?, vec![XBOX, DS4]);
        Ok(())
    }

    #[test]
    fn test_clear() -> Result<()> {
        let g = guardian()?;
        g.insert_to_affected([DS4])?;
        g.clear_affected()?;
        assert!(g.affected()?.is_empty());
        assert_eq!(
            g.store()
                .value(&g.settings().parameters_key, AFFECTED_DEVICES_VALUE)?,
            Some(MemoryValue::MultiString(Vec::new()))
        );
        Ok(())
    }

    #[test]
    fn test_empty_batch_still_normalizes() -> Result<()> {
        let g = guardian()?;
        let key = g.settings().parameters_key.clone();
        g.store().set_value(
            &key,
            AFFECTED_DEVICES_VALUE,
            MemoryValue::MultiString([XBOX, XBOX].map(String::from).to_vec()),
        )?;
        assert_eq!(g.insert_to_affected(Vec::<&str>::new())?, vec![XBOX]);
        Ok(())
    }
}
