// Process listing via /proc

use super::MemSnapshot;
use anyhow::{Context, Result};
use nix::unistd::{Uid, User};
use procfs::process::Process;
use std::fs;

/// One row of the process snapshot
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub pid: i32,
    pub ppid: i32,
    pub user: String,
    /// Share of total physical memory, 0-100
    pub mem_percent: f64,
    pub name: String,
    pub command: String,
    /// Seconds since the process started
    pub elapsed_seconds: u64,
}

impl ProcessRecord {
    /// Read information about a specific process
    pub fn read(pid: i32, snapshot: &MemSnapshot, uptime_secs: f64) -> Result<Self> {
        let process = Process::new(pid)?;
        let stat = process.stat()?;
        let status = process.status()?;

        let page_size = procfs::page_size();
        let rss_bytes = stat.rss * page_size;

        let mem_percent = if snapshot.total_bytes == 0 {
            0.0
        } else {
            (rss_bytes as f64 / snapshot.total_bytes as f64) * 100.0
        };

        let ticks = procfs::ticks_per_second();
        let started_secs = stat.starttime as f64 / ticks as f64;
        let elapsed_seconds = (uptime_secs - started_secs).max(0.0) as u64;

        let user = User::from_uid(Uid::from_raw(status.ruid))
            .ok()
            .flatten()
            .map_or_else(|| status.ruid.to_string(), |u| u.name);

        let cmdline = process.cmdline().unwrap_or_default().join(" ");
        let command = if cmdline.is_empty() {
            format!("[{}]", stat.comm)
        } else {
            cmdline
        };

        Ok(Self {
            pid,
            ppid: stat.ppid,
            user,
            mem_percent,
            name: stat.comm,
            command,
            elapsed_seconds,
        })
    }

    /// Snapshot all processes on the system, in /proc directory order.
    /// Rows that disappear mid-walk are silently skipped.
    pub fn all(snapshot: &MemSnapshot) -> Result<Vec<Self>> {
        let uptime_secs = read_uptime().context("Failed to read system uptime")?;
        let mut processes = Vec::new();

        for entry in fs::read_dir("/proc").context("Failed to read /proc")? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            if let Ok(pid) = name.parse::<i32>() {
                if let Ok(record) = Self::read(pid, snapshot, uptime_secs) {
                    processes.push(record);
                }
            }
        }

        if processes.is_empty() {
            anyhow::bail!("Process table is empty");
        }

        Ok(processes)
    }

    /// Memory share in MiB, one decimal place
    pub fn ram_mb(&self, snapshot: &MemSnapshot) -> f64 {
        let mb = self.mem_percent / 100.0 * snapshot.total_mb();
        (mb * 10.0).round() / 10.0
    }
}

fn read_uptime() -> Result<f64> {
    let raw = fs::read_to_string("/proc/uptime")?;
    raw.split_whitespace()
        .next()
        .context("Empty /proc/uptime")?
        .parse()
        .context("Failed to parse /proc/uptime")
}

impl std::fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PID {} ({}): {:.1}% RAM, user {}, up {}s",
            self.pid, self.name, self.mem_percent, self.user, self.elapsed_seconds
        )
    }
}
