//! Global force flag
//!
//! When `Force` is 1 the driver hides affected devices even from processes
//! that would otherwise be exempt.

use crate::Result;
use crate::guardian::HidGuardian;
use crate::process::ProcessTable;
use crate::registry::RegistryStore;
use crate::settings::FORCE_VALUE;
use tracing::{debug, info};

impl<S: RegistryStore, P: ProcessTable> HidGuardian<S, P> {
    /// Whether forced hiding is on. Absent key or value reads as `false`.
    pub fn force(&self) -> Result<bool> {
        let raw = self
            .store
            .read_dword(&self.settings.parameters_key, FORCE_VALUE)?;
        debug!(raw = ?raw, "Read force flag");
        Ok(raw == Some(1))
    }

    /// Turn forced hiding on or off, creating the parameters key if needed.
    pub fn set_force(&self, enabled: bool) -> Result<()> {
        self.store.write_dword(
            &self.settings.parameters_key,
            FORCE_VALUE,
            u32::from(enabled),
        )?;
        info!(enabled, "Set force flag");
        Ok(())
    }
}
