//! Process table access used to resolve and retain whitelist entries

use crate::ProcessId;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

/// Source of process IDs.
pub trait ProcessTable: Send + Sync {
    /// ID of the calling process.
    fn current_process_id(&self) -> ProcessId;

    /// IDs of all processes currently running.
    fn running_process_ids(&self) -> Vec<ProcessId>;
}

/// The live OS process table, read through `sysinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessTable;

impl ProcessTable for SystemProcessTable {
    fn current_process_id(&self) -> ProcessId {
        std::process::id()
    }

    fn running_process_ids(&self) -> Vec<ProcessId> {
        let mut system = System::new();
        let refreshed = system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        let pids: Vec<ProcessId> = system.processes().keys().map(|pid| pid.as_u32()).collect();
        debug!(refreshed, count = pids.len(), "Enumerated running processes");
        pids
    }
}

/// A fixed process table.
///
/// Useful when the caller already knows the process set, and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticProcessTable {
    current: ProcessId,
    running: Vec<ProcessId>,
}

impl StaticProcessTable {
    /// A table where `current` is the only running process.
    pub fn new(current: ProcessId) -> Self {
        Self {
            current,
            running: vec![current],
        }
    }

    /// Add more running processes.
    pub fn with_running(mut self, pids: impl IntoIterator<Item = ProcessId>) -> Self {
        self.running.extend(pids);
        self
    }
}

impl ProcessTable for StaticProcessTable {
    fn current_process_id(&self) -> ProcessId {
        self.current
    }

    fn running_process_ids(&self) -> Vec<ProcessId> {
        self.running.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_table_contains_self() {
        let table = SystemProcessTable;
        let me = table.current_process_id();
        assert_eq!(me, std::process::id());
        assert!(table.running_process_ids().contains(&me));
    }

    #[test]
    fn test_static_table() {
        let table = StaticProcessTable::new(10).with_running([11, 12]);
        assert_eq!(table.current_process_id(), 10);
        assert_eq!(table.running_process_ids(), vec![10, 11, 12]);
    }
}
