// Kill-eligibility policy: severity tiers, protection rules, reclaim rules

mod level;
mod protect;
mod reclaim;

pub use level::{SeverityLevel, Thresholds};
pub use protect::{is_protected, protection_verdict};
pub use reclaim::{is_safe_to_kill, reclaim_verdict};

use crate::monitor::ProcessRecord;
use std::collections::{HashMap, HashSet};

/// Marker identifying the automation gateway process
pub const GATEWAY_MARKER: &str = "gateway";

/// Name of the protected messaging app
pub const MESSAGING_APP: &str = "whatsapp";

/// Mail-bridge identifiers: product name, GUI helper, gRPC invocation
pub const MAIL_BRIDGE_MARKERS: &[&str] = &["proton mail bridge", "bridge-gui", "bridge --grpc"];

/// Core OS processes that are never touched
pub const CORE_OS_PROCESSES: &[&str] = &[
    "kernel_task",
    "loginwindow",
    "windowserver",
    "launchd",
    "systemstats",
    "sshd",
];

/// Priority-kill targets, attempted in this order at critical severity
pub const PRIORITY_TARGETS: &[(&str, &str)] = &[("Brave", "brave"), ("iTerm", "iterm")];

/// Ambient facts the eligibility rules consult, built once per run
pub struct PolicyContext<'a> {
    /// Pid of the first process matching the gateway marker, if any
    pub gateway_pid: Option<i32>,
    /// Pids of the messaging app and all of its descendants
    pub messaging_pids: HashSet<i32>,
    /// Process snapshot indexed by pid
    pub by_pid: HashMap<i32, &'a ProcessRecord>,
    /// Child pids indexed by parent pid
    pub by_ppid: HashMap<i32, Vec<i32>>,
}

impl<'a> PolicyContext<'a> {
    /// Build the context from a full process snapshot.
    ///
    /// The messaging pid set is seeded by name match and then closed over
    /// descendants, so the app's helper children stay protected even when
    /// their command strings never mention it.
    pub fn build(processes: &'a [ProcessRecord]) -> Self {
        let by_pid: HashMap<i32, &ProcessRecord> =
            processes.iter().map(|p| (p.pid, p)).collect();

        let mut by_ppid: HashMap<i32, Vec<i32>> = HashMap::new();
        for p in processes {
            by_ppid.entry(p.ppid).or_default().push(p.pid);
        }

        let gateway_pid = processes
            .iter()
            .find(|p| matches_insensitive(p, GATEWAY_MARKER))
            .map(|p| p.pid);

        let mut messaging_pids: HashSet<i32> = HashSet::new();
        let mut frontier: Vec<i32> = processes
            .iter()
            .filter(|p| matches_insensitive(p, MESSAGING_APP))
            .map(|p| p.pid)
            .collect();

        while let Some(pid) = frontier.pop() {
            if !messaging_pids.insert(pid) {
                continue;
            }
            if let Some(children) = by_ppid.get(&pid) {
                frontier.extend(children);
            }
        }

        Self {
            gateway_pid,
            messaging_pids,
            by_pid,
            by_ppid,
        }
    }
}

/// Case-insensitive substring match against the process name or command line
pub(crate) fn matches_insensitive(record: &ProcessRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.command.to_lowercase().contains(needle)
}

/// Case-sensitive substring match against the process name or command line
pub(crate) fn matches_exact(record: &ProcessRecord, needle: &str) -> bool {
    record.name.contains(needle) || record.command.contains(needle)
}

#[cfg(test)]
pub(crate) fn test_record(pid: i32, ppid: i32, user: &str, command: &str) -> ProcessRecord {
    ProcessRecord {
        pid,
        ppid,
        user: user.to_string(),
        mem_percent: 1.0,
        name: command.split('/').next_back().unwrap_or(command).to_string(),
        command: command.to_string(),
        elapsed_seconds: 60,
    }
}
