//! The configuration facade

use crate::Result;
use crate::process::{ProcessTable, SystemProcessTable};
use crate::registry::RegistryStore;
use crate::settings::GuardianSettings;

#[cfg(windows)]
use crate::registry::WindowsRegistry;

/// Reads and writes HidGuardian's driver parameters.
///
/// Every operation goes straight to the registry store; nothing is cached, so
/// changes made by other processes are visible on the next call. Operations
/// are grouped by concern:
///
/// - whitelist: [`insert_to_whitelist`](Self::insert_to_whitelist), [`whitelist`](Self::whitelist), [`clear_whitelist`](Self::clear_whitelist), ...
/// - force flag: [`force`](Self::force), [`set_force`](Self::set_force)
/// - affected devices: [`insert_to_affected`](Self::insert_to_affected), [`affected`](Self::affected), ...
#[derive(Debug)]
pub struct HidGuardian<S, P = SystemProcessTable> {
    pub(crate) store: S,
    pub(crate) processes: P,
    pub(crate) settings: GuardianSettings,
}

impl<S: RegistryStore, P: ProcessTable> HidGuardian<S, P> {
    /// Build a facade over an arbitrary store and process table.
    pub fn new(store: S, processes: P, settings: GuardianSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            store,
            processes,
            settings,
        })
    }

    /// Active settings.
    pub fn settings(&self) -> &GuardianSettings {
        &self.settings
    }

    /// Underlying registry store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process table used for the current and running process IDs.
    pub fn processes(&self) -> &P {
        &self.processes
    }
}

#[cfg(windows)]
impl HidGuardian<WindowsRegistry, SystemProcessTable> {
    /// The real registry at the default driver location.
    pub fn system() -> Result<Self> {
        Self::with_settings(GuardianSettings::default())
    }

    /// The real registry at a configured location.
    pub fn with_settings(settings: GuardianSettings) -> Result<Self> {
        let store = WindowsRegistry::new(settings.registry_view);
        Self::new(store, SystemProcessTable, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GuardianError;
    use crate::process::StaticProcessTable;
    use crate::registry::MemoryRegistry;

    #[test]
    fn test_new_validates_settings() {
        let settings = GuardianSettings::default().with_parameters_key("");
        let result = HidGuardian::new(MemoryRegistry::new(), StaticProcessTable::new(1), settings);
        assert!(matches!(result, Err(GuardianError::InvalidSettings(_))));
    }

    #[test]
    fn test_facade_accepts_borrowed_store() -> Result<()> {
        let registry = MemoryRegistry::new();
        let guardian = HidGuardian::new(
            &registry,
            StaticProcessTable::new(1),
            GuardianSettings::default(),
        )?;
        assert_eq!(guardian.processes().current_process_id(), 1);
        assert!(!guardian.store().key_exists(&guardian.settings().parameters_key)?);
        Ok(())
    }
}
