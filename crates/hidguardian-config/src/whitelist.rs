//! Process whitelist
//!
//! A process is whitelisted while `<parameters>\Whitelist\<pid>` exists. The
//! driver lets whitelisted processes see hidden devices.

use crate::guardian::HidGuardian;
use crate::process::ProcessTable;
use crate::registry::RegistryStore;
use crate::{ProcessId, Result};
use std::collections::HashSet;
use tracing::{debug, info};

/// Which entries survive [`HidGuardian::clear_whitelist`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearWhitelistOptions {
    /// Keep the calling process
    pub keep_current_process: bool,
    /// Keep every process that is still running
    pub keep_running_processes: bool,
}

impl ClearWhitelistOptions {
    /// Remove every entry.
    pub fn remove_all() -> Self {
        Self::default()
    }

    /// Remove everything except the calling process.
    pub fn keep_current() -> Self {
        Self {
            keep_current_process: true,
            keep_running_processes: false,
        }
    }

    /// Remove only entries for processes that have exited.
    pub fn keep_running() -> Self {
        Self {
            keep_current_process: false,
            keep_running_processes: true,
        }
    }
}

fn parse_process_id(name: &str) -> Option<ProcessId> {
    name.parse().ok()
}

impl<S: RegistryStore, P: ProcessTable> HidGuardian<S, P> {
    /// Whitelist the calling process. Returns its ID.
    pub fn add_current_process_to_whitelist(&self) -> Result<ProcessId> {
        let pid = self.processes.current_process_id();
        self.insert_to_whitelist(pid)?;
        Ok(pid)
    }

    /// Remove the calling process from the whitelist.
    pub fn remove_current_process_from_whitelist(&self) -> Result<bool> {
        self.remove_from_whitelist(self.processes.current_process_id())
    }

    /// Whitelist `pid`. Inserting an existing entry is a no-op.
    pub fn insert_to_whitelist(&self, pid: ProcessId) -> Result<()> {
        self.store.create_key(&self.settings.whitelist_entry_key(pid))?;
        info!(pid, "Whitelisted process");
        Ok(())
    }

    /// Remove `pid` from the whitelist. Returns `false` if it was not listed.
    pub fn remove_from_whitelist(&self, pid: ProcessId) -> Result<bool> {
        let removed = self
            .store
            .delete_key(&self.settings.whitelist_entry_key(pid))?;
        if removed {
            info!(pid, "Removed process from whitelist");
        } else {
            debug!(pid, "Process was not whitelisted");
        }
        Ok(removed)
    }

    /// Whether `pid` is whitelisted.
    pub fn is_whitelisted(&self, pid: ProcessId) -> Result<bool> {
        Ok(self
            .store
            .key_exists(&self.settings.whitelist_entry_key(pid))?)
    }

    /// All whitelisted process IDs, ascending. Non-numeric entries are skipped.
    pub fn whitelist(&self) -> Result<Vec<ProcessId>> {
        let Some(names) = self.store.subkey_names(&self.settings.whitelist_key())? else {
            return Ok(Vec::new());
        };
        let mut pids: Vec<ProcessId> = names
            .iter()
            .filter_map(|name| {
                let pid = parse_process_id(name);
                if pid.is_none() {
                    debug!(entry = %name, "Skipping malformed whitelist entry");
                }
                pid
            })
            .collect();
        pids.sort_unstable();
        pids.dedup();
        Ok(pids)
    }

    /// Delete whitelist entries, except those retained by `options`.
    ///
    /// Non-numeric entries are always deleted. Returns how many entries were
    /// removed.
    pub fn clear_whitelist(&self, options: ClearWhitelistOptions) -> Result<usize> {
        let whitelist_key = self.settings.whitelist_key();
        let Some(names) = self.store.subkey_names(&whitelist_key)? else {
            debug!("No whitelist key, nothing to clear");
            return Ok(0);
        };

        let mut keep: HashSet<ProcessId> = HashSet::new();
        if options.keep_current_process {
            keep.insert(self.processes.current_process_id());
        }
        if options.keep_running_processes {
            keep.extend(self.processes.running_process_ids());
        }

        let mut removed = Vec::new();
        for name in names {
            if parse_process_id(&name).is_some_and(|pid| keep.contains(&pid)) {
                continue;
            }
            if self.store.delete_key(&format!(r"{whitelist_key}\{name}"))? {
                removed.push(name);
            }
        }

        info!(
            removed = removed.len(),
            keep_current = options.keep_current_process,
            keep_running = options.keep_running_processes,
            "Cleared process whitelist"
        );
        Ok(removed.len())
    }
}
