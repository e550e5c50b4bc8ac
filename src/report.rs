// Snapshot assembly: the JSON result consumed by the heartbeat caller

use crate::killer::KillRecord;
use crate::monitor::{MemSnapshot, ProcessRecord};
use crate::policy::SeverityLevel;
use serde::Serialize;

/// The sole externally visible artifact of a run
#[derive(Debug, Serialize)]
pub struct RunResult {
    /// RFC3339 UTC, second precision
    pub timestamp: String,
    pub ram_pct: f64,
    pub ram_used_gb: f64,
    pub ram_total_gb: f64,
    pub level: SeverityLevel,
    pub top_processes: Vec<TopProcess>,
    /// In the order the attempts were made
    pub killed: Vec<KillRecord>,
}

/// One entry of the top-memory-consumers list
#[derive(Debug, Serialize)]
pub struct TopProcess {
    pub pid: i32,
    pub name: String,
    pub ram_mb: f64,
    pub user: String,
}

impl TopProcess {
    pub fn from_record(record: &ProcessRecord, snapshot: &MemSnapshot) -> Self {
        Self {
            pid: record.pid,
            name: record.name.clone(),
            ram_mb: record.ram_mb(snapshot),
            user: record.user.clone(),
        }
    }
}

/// Select the top-N memory consumers, sorted by memory share descending,
/// ties broken by pid ascending for determinism.
pub fn top_processes(processes: &[ProcessRecord], limit: usize) -> Vec<ProcessRecord> {
    let mut sorted: Vec<ProcessRecord> = processes.to_vec();
    sorted.sort_by(|a, b| {
        b.mem_percent
            .total_cmp(&a.mem_percent)
            .then_with(|| a.pid.cmp(&b.pid))
    });
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::killer::KillOutcome;

    fn record(pid: i32, mem_percent: f64) -> ProcessRecord {
        ProcessRecord {
            pid,
            ppid: 1,
            user: "alice".to_string(),
            mem_percent,
            name: format!("proc{pid}"),
            command: format!("/usr/bin/proc{pid}"),
            elapsed_seconds: 0,
        }
    }

    #[test]
    fn test_top_sorted_descending_with_pid_tiebreak() {
        let processes = vec![
            record(30, 5.0),
            record(10, 9.0),
            record(20, 5.0),
            record(40, 1.0),
        ];

        let top = top_processes(&processes, 3);
        let pids: Vec<i32> = top.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![10, 20, 30]);
    }

    #[test]
    fn test_top_respects_limit() {
        let processes: Vec<ProcessRecord> =
            (1..=25).map(|pid| record(pid, pid as f64)).collect();
        assert_eq!(top_processes(&processes, 10).len(), 10);
        assert_eq!(top_processes(&processes, 10)[0].pid, 25);
    }

    #[test]
    fn test_top_shorter_than_limit() {
        let processes = vec![record(1, 1.0)];
        assert_eq!(top_processes(&processes, 10).len(), 1);
    }

    #[test]
    fn test_result_json_schema() {
        let snapshot = MemSnapshot {
            used_bytes: 15 * 1024 * 1024 * 1024,
            total_bytes: 16 * 1024 * 1024 * 1024,
        };
        let top = vec![TopProcess::from_record(&record(42, 12.5), &snapshot)];

        let result = RunResult {
            timestamp: "2026-08-27T10:00:00Z".to_string(),
            ram_pct: snapshot.used_percent(),
            ram_used_gb: snapshot.used_gb(),
            ram_total_gb: snapshot.total_gb(),
            level: SeverityLevel::Warning,
            top_processes: top,
            killed: vec![KillRecord {
                pid: 7,
                name: "x".to_string(),
                ram_mb: 1.0,
                reason: "critical - safe to kill".to_string(),
                outcome: KillOutcome::WouldKill,
            }],
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["ram_pct"], 93.8);
        assert_eq!(value["ram_total_gb"], 16.0);
        assert_eq!(value["level"], "warning");
        assert_eq!(value["top_processes"][0]["pid"], 42);
        assert_eq!(value["top_processes"][0]["ram_mb"], 2048.0);
        assert_eq!(value["top_processes"][0]["user"], "alice");
        assert_eq!(value["killed"][0]["reason"], "critical - safe to kill");
        assert!(value["killed"][0].get("outcome").is_none());
    }
}
