// One-shot probe: sample, classify, remediate at critical, report

use crate::audit::AuditLog;
use crate::config::Config;
use crate::killer::{
    DryRunTerminator, KillOutcome, KillRecord, SigkillTerminator, TerminateStatus, Terminator,
};
use crate::monitor::{MemSnapshot, ProcessRecord};
use crate::policy::{self, PolicyContext, SeverityLevel};
use crate::report::{top_processes, RunResult, TopProcess};
use crate::sanitize_for_log;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Drives one probe run against the OS collaborators.
///
/// The terminator and audit sink are injected so tests can run the full
/// remediation pipeline against fixture snapshots.
pub struct ProbeService {
    config: Config,
    terminator: Box<dyn Terminator>,
    audit: AuditLog,
}

impl ProbeService {
    /// Create a service with the real collaborators for this configuration
    pub fn new(config: Config) -> Self {
        let terminator: Box<dyn Terminator> = if config.dry_run {
            Box::new(DryRunTerminator)
        } else {
            Box::new(SigkillTerminator)
        };
        let audit = AuditLog::new(&config.audit_log);

        Self {
            config,
            terminator,
            audit,
        }
    }

    /// Create a service with injected collaborators (test seam)
    pub fn with_collaborators(
        config: Config,
        terminator: Box<dyn Terminator>,
        audit: AuditLog,
    ) -> Self {
        Self {
            config,
            terminator,
            audit,
        }
    }

    /// Sample the OS and evaluate one run.
    ///
    /// Sampler or lister failures are fatal and propagate to the caller;
    /// everything past that point is recovered locally.
    pub fn run(&self) -> Result<RunResult> {
        let snapshot = MemSnapshot::read().context("Failed to sample memory")?;
        log::debug!("{snapshot}");

        let processes =
            ProcessRecord::all(&snapshot).context("Failed to list processes")?;
        log::debug!("Process snapshot: {} rows", processes.len());

        Ok(self.evaluate(&snapshot, &processes))
    }

    /// Classify a snapshot and remediate if critical. Infallible: every
    /// failure past sampling is logged and recovered.
    pub fn evaluate(&self, snapshot: &MemSnapshot, processes: &[ProcessRecord]) -> RunResult {
        let used_percent = snapshot.used_percent();
        let level = SeverityLevel::classify(used_percent, &self.config.thresholds);

        // Captured before any kill pass so remediated processes still
        // appear in this run's report
        let top = top_processes(processes, self.config.top);

        let killed = if level == SeverityLevel::Critical {
            log::warn!("Memory critical at {used_percent:.1}% used, starting remediation");
            self.remediate(snapshot, processes, &top)
        } else {
            log::info!("Memory at {used_percent:.1}% used, level {level}");
            Vec::new()
        };

        RunResult {
            timestamp: now_rfc3339(),
            ram_pct: used_percent,
            ram_used_gb: snapshot.used_gb(),
            ram_total_gb: snapshot.total_gb(),
            level,
            top_processes: top
                .iter()
                .map(|r| TopProcess::from_record(r, snapshot))
                .collect(),
            killed,
        }
    }

    /// Sequential remediation passes: priority targets first, in their
    /// fixed order, then the safe-kill sweep over the top consumers.
    fn remediate(
        &self,
        snapshot: &MemSnapshot,
        processes: &[ProcessRecord],
        top: &[ProcessRecord],
    ) -> Vec<KillRecord> {
        let ctx = PolicyContext::build(processes);
        let mut killed = Vec::new();

        for &(label, marker) in policy::PRIORITY_TARGETS {
            self.priority_pass(label, marker, snapshot, processes, &ctx, &mut killed);
        }
        self.safe_kill_pass(snapshot, top, &ctx, &mut killed);

        killed
    }

    /// Terminate every process matching a priority marker, in lister order.
    /// Matching the marker bypasses the reclaim rules but not protection:
    /// protection is absolute and re-checked per attempt.
    fn priority_pass(
        &self,
        label: &str,
        marker: &str,
        snapshot: &MemSnapshot,
        processes: &[ProcessRecord],
        ctx: &PolicyContext<'_>,
        killed: &mut Vec<KillRecord>,
    ) {
        for record in processes {
            if !policy::matches_insensitive(record, marker) {
                continue;
            }

            if let Some(rule) = policy::protection_verdict(record, ctx) {
                log::debug!(
                    "Skipping {} (pid {}): protected by rule '{rule}'",
                    sanitize_for_log(&record.name),
                    record.pid
                );
                continue;
            }

            let reason = format!("critical - priority kill: {label}");
            if let Some(kill) = self.attempt(record, snapshot, reason) {
                killed.push(kill);
            }
        }
    }

    /// Sweep the top consumers (excluding priority-marker matches, already
    /// handled) through the reclaim rules.
    fn safe_kill_pass(
        &self,
        snapshot: &MemSnapshot,
        top: &[ProcessRecord],
        ctx: &PolicyContext<'_>,
        killed: &mut Vec<KillRecord>,
    ) {
        for record in top {
            let priority_match = policy::PRIORITY_TARGETS
                .iter()
                .any(|&(_, marker)| policy::matches_insensitive(record, marker));
            if priority_match {
                continue;
            }

            match policy::reclaim_verdict(record, ctx, record.elapsed_seconds) {
                Some(rule) => {
                    log::debug!(
                        "{} (pid {}) reclaimable by rule '{rule}'",
                        sanitize_for_log(&record.name),
                        record.pid
                    );
                    let reason = "critical - safe to kill".to_string();
                    if let Some(kill) = self.attempt(record, snapshot, reason) {
                        killed.push(kill);
                    }
                }
                None => continue,
            }
        }
    }

    /// One termination attempt. Success and dry-run produce a record;
    /// failures are reported on the operator channel and skipped.
    fn attempt(
        &self,
        record: &ProcessRecord,
        snapshot: &MemSnapshot,
        reason: String,
    ) -> Option<KillRecord> {
        match self.terminator.terminate(record.pid) {
            TerminateStatus::Killed => {
                let kill = KillRecord {
                    pid: record.pid,
                    name: record.name.clone(),
                    ram_mb: record.ram_mb(snapshot),
                    reason,
                    outcome: KillOutcome::Killed,
                };
                log::info!(
                    "Killed {} (pid {}, {:.1} MiB): {}",
                    sanitize_for_log(&kill.name),
                    kill.pid,
                    kill.ram_mb,
                    kill.reason
                );

                // Best-effort: a dead audit log must not abort remediation
                if let Err(e) = self.audit.append(&now_rfc3339(), &kill) {
                    log::warn!("Failed to write audit log: {e:#}");
                }

                Some(kill)
            }
            TerminateStatus::WouldKill => {
                let kill = KillRecord {
                    pid: record.pid,
                    name: record.name.clone(),
                    ram_mb: record.ram_mb(snapshot),
                    reason,
                    outcome: KillOutcome::WouldKill,
                };
                log::info!(
                    "Dry run: would kill {} (pid {}): {}",
                    sanitize_for_log(&kill.name),
                    kill.pid,
                    kill.reason
                );
                Some(kill)
            }
            TerminateStatus::Failed(msg) => {
                log::warn!(
                    "Failed to kill {} (pid {}): {msg}",
                    sanitize_for_log(&record.name),
                    record.pid
                );
                None
            }
        }
    }
}
