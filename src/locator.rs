use sysinfo::System;

/// Looks up the PID of the external process we signal.
pub trait ProcessLocator: Send + Sync {
    /// Returns the PID of the first process whose executable path ends with
    /// `name`, or `None` when nothing matches.
    fn locate(&self, name: &str) -> Option<u32>;
}

/// Scans the live process table on every call.
pub struct SystemProcessTable;

impl ProcessLocator for SystemProcessTable {
    fn locate(&self, name: &str) -> Option<u32> {
        let mut system = System::new();
        system.refresh_processes();
        system.processes().iter().find_map(|(pid, process)| {
            let matches = match process.exe() {
                Some(path) => path.to_string_lossy().ends_with(name),
                // Kernel threads and the like expose no executable path.
                None => process.name().ends_with(name),
            };
            matches.then(|| pid.as_u32())
        })
    }
}
