// Append-only audit log of real kills

use crate::killer::KillRecord;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const HEADER: &str = "timestamp | pid | name | ram_mb | reason";

/// Handle to the audit log file. Injected into the orchestrator; the file
/// is created with a header on first append, then only ever appended to.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one pipe-delimited line for a successful real kill
    pub fn append(&self, timestamp: &str, record: &KillRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open audit log {}", self.path.display()))?;

        if file.metadata()?.len() == 0 {
            writeln!(file, "{HEADER}")?;
        }

        writeln!(
            file,
            "{} | {} | {} | {:.1} | {}",
            timestamp, record.pid, record.name, record.ram_mb, record.reason
        )
        .with_context(|| format!("Failed to append to audit log {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::killer::KillOutcome;
    use std::fs;

    fn record(pid: i32) -> KillRecord {
        KillRecord {
            pid,
            name: "brave".to_string(),
            ram_mb: 2048.0,
            reason: "critical - priority kill: Brave".to_string(),
            outcome: KillOutcome::Killed,
        }
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("kills.log"));

        log.append("2026-08-27T10:00:00Z", &record(100)).unwrap();
        log.append("2026-08-27T10:05:00Z", &record(101)).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "2026-08-27T10:00:00Z | 100 | brave | 2048.0 | critical - priority kill: Brave"
        );
        assert!(lines[2].starts_with("2026-08-27T10:05:00Z | 101"));
    }

    #[test]
    fn test_existing_file_is_only_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kills.log");
        fs::write(&path, format!("{HEADER}\nold line\n")).unwrap();

        let log = AuditLog::new(&path);
        log.append("2026-08-27T11:00:00Z", &record(200)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&format!("{HEADER}\nold line\n")));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let log = AuditLog::new("/nonexistent-dir/kills.log");
        assert!(log.append("2026-08-27T11:00:00Z", &record(1)).is_err());
    }
}
