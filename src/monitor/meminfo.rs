// Memory sampling from /proc/meminfo

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// One memory measurement, captured once per run
#[derive(Debug, Clone, Copy, Default)]
pub struct MemSnapshot {
    /// Bytes of physical memory in use (total minus available)
    pub used_bytes: u64,
    /// Total physical memory in bytes
    pub total_bytes: u64,
}

impl MemSnapshot {
    /// Sample current memory usage from /proc/meminfo
    pub fn read() -> Result<Self> {
        Self::read_from_path("/proc/meminfo")
    }

    /// Read memory information from a specific path (for testing)
    fn read_from_path(path: &str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
        let reader = BufReader::new(file);

        let mut mem_total_kb = 0u64;
        let mut mem_available_kb = 0u64;

        for line in reader.lines() {
            let line = line?;
            let parts: Vec<&str> = line.split_whitespace().collect();

            if parts.len() < 2 {
                continue;
            }

            let key = parts[0].trim_end_matches(':');
            let value: u64 = parts[1]
                .parse()
                .with_context(|| format!("Failed to parse value for {key}"))?;

            match key {
                "MemTotal" => mem_total_kb = value,
                "MemAvailable" => mem_available_kb = value,
                _ => {}
            }
        }

        if mem_total_kb == 0 {
            anyhow::bail!("Failed to read MemTotal from {path}");
        }

        Ok(Self {
            used_bytes: mem_total_kb.saturating_sub(mem_available_kb) * 1024,
            total_bytes: mem_total_kb * 1024,
        })
    }

    /// Used memory as a percentage of total, one decimal place.
    /// A zero total (no valid memory data) reads as 0%.
    pub fn used_percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        let pct = (self.used_bytes as f64 / self.total_bytes as f64) * 100.0;
        (pct * 10.0).round() / 10.0
    }

    /// Used memory in GiB, two decimal places
    pub fn used_gb(&self) -> f64 {
        round2(self.used_bytes as f64 / GIB)
    }

    /// Total memory in GiB, two decimal places
    pub fn total_gb(&self) -> f64 {
        round2(self.total_bytes as f64 / GIB)
    }

    /// Total memory in MiB (unrounded, used for per-process RAM shares)
    pub fn total_mb(&self) -> f64 {
        self.total_bytes as f64 / MIB
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl std::fmt::Display for MemSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Memory: {:.2}/{:.2} GiB ({:.1}% used)",
            self.used_gb(),
            self.total_gb(),
            self.used_percent(),
        )
    }
}
