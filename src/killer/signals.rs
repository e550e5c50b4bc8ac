// Forceful termination via SIGKILL

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

/// Outcome of a single termination attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminateStatus {
    /// Signal delivered
    Killed,
    /// Dry-run mode; nothing was signalled
    WouldKill,
    /// Attempt failed; the orchestrator logs and moves on
    Failed(String),
}

/// Capability that takes a pid and attempts forceful termination
pub trait Terminator {
    fn terminate(&self, pid: i32) -> TerminateStatus;
}

/// Real terminator: delivers SIGKILL
pub struct SigkillTerminator;

impl Terminator for SigkillTerminator {
    fn terminate(&self, pid: i32) -> TerminateStatus {
        log::debug!("Sending SIGKILL to process {pid}");

        match signal::kill(Pid::from_raw(pid), Signal::SIGKILL) {
            Ok(()) => TerminateStatus::Killed,
            // A pid that is already gone fails the attempt; never retried
            Err(nix::errno::Errno::ESRCH) => {
                TerminateStatus::Failed("no such process".to_string())
            }
            Err(nix::errno::Errno::EPERM) => {
                TerminateStatus::Failed("permission denied".to_string())
            }
            Err(e) => TerminateStatus::Failed(format!("signal error: {e}")),
        }
    }
}

/// Dry-run terminator: a no-op that always reports "would terminate"
pub struct DryRunTerminator;

impl Terminator for DryRunTerminator {
    fn terminate(&self, pid: i32) -> TerminateStatus {
        log::debug!("Dry run: would send SIGKILL to process {pid}");
        TerminateStatus::WouldKill
    }
}
