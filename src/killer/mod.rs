// Termination records and the terminator capability

mod signals;

pub use signals::{DryRunTerminator, SigkillTerminator, TerminateStatus, Terminator};

use serde::Serialize;

/// How a termination attempt concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// The process was actually terminated
    Killed,
    /// Dry-run mode; the process would have been terminated
    WouldKill,
}

impl std::fmt::Display for KillOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Killed => write!(f, "killed"),
            Self::WouldKill => write!(f, "would-kill"),
        }
    }
}

/// Audit record of one completed (or simulated) termination.
///
/// Failed attempts never produce a record; they are reported on the
/// operator channel only.
#[derive(Debug, Clone, Serialize)]
pub struct KillRecord {
    pub pid: i32,
    pub name: String,
    pub ram_mb: f64,
    pub reason: String,
    #[serde(skip)]
    pub outcome: KillOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(KillOutcome::Killed.to_string(), "killed");
        assert_eq!(KillOutcome::WouldKill.to_string(), "would-kill");
    }

    #[test]
    fn test_record_json_shape() {
        let record = KillRecord {
            pid: 1234,
            name: "brave".to_string(),
            ram_mb: 2048.0,
            reason: "critical - priority kill: Brave".to_string(),
            outcome: KillOutcome::Killed,
        };

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        // Outcome stays internal; the snapshot schema carries four fields
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["pid"], 1234);
        assert_eq!(obj["reason"], "critical - priority kill: Brave");
    }
}
