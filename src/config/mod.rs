// Configuration module

mod args;
mod env;

pub use args::Args;

use crate::policy::Thresholds;
use anyhow::Result;
use std::path::PathBuf;

/// Default audit log location; override with --audit-log or RAMPROBE_AUDIT_LOG
const DEFAULT_AUDIT_LOG: &str = "/var/log/ramprobe_kills.log";

/// Default size of the top-memory-consumers list
const DEFAULT_TOP: usize = 10;

/// Main configuration struct for ramprobe
#[derive(Debug, Clone)]
pub struct Config {
    /// Severity thresholds in percent of used memory
    pub thresholds: Thresholds,
    /// Number of top memory consumers to report
    pub top: usize,
    /// Audit log path for successful kills
    pub audit_log: PathBuf,
    /// Simulate terminations without sending signals
    pub dry_run: bool,
    /// Enable debug logging
    pub debug: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = Self::default();

        if let Some(warn) = args.warn {
            config.thresholds.warn = warn;
        }
        if let Some(critical) = args.critical {
            config.thresholds.critical = critical;
        }
        if let Some(top) = args.top {
            config.top = top;
        }
        if let Some(path) = args.audit_log {
            config.audit_log = PathBuf::from(path);
        }

        config.dry_run = args.dry_run;
        config.debug = args.debug;

        // Apply environment variable overrides
        config = env::apply_env_overrides(config)?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.thresholds.warn < 0.0 || self.thresholds.warn > 100.0 {
            anyhow::bail!("warn threshold must be between 0 and 100");
        }
        if self.thresholds.critical < 0.0 || self.thresholds.critical > 100.0 {
            anyhow::bail!("critical threshold must be between 0 and 100");
        }

        // The tier ordering ok < warn <= p < critical must hold
        if self.thresholds.warn > self.thresholds.critical {
            anyhow::bail!(
                "warn threshold ({}) must not exceed critical threshold ({})",
                self.thresholds.warn,
                self.thresholds.critical
            );
        }

        if self.top == 0 {
            anyhow::bail!("top must be at least 1");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            top: DEFAULT_TOP,
            audit_log: PathBuf::from(DEFAULT_AUDIT_LOG),
            dry_run: false,
            debug: false,
        }
    }
}
