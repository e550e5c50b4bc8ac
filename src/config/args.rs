// Command-line argument parsing

use clap::Parser;

/// ramprobe - scheduled memory pressure probe
///
/// Invoked by a heartbeat caller: samples memory utilization, classifies it
/// into ok/warning/critical and, at critical, reclaims RAM from expendable
/// processes. Emits one JSON snapshot per run on stdout.
#[derive(Parser, Debug)]
#[command(name = "ramprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Memory pressure probe and process reclaimer", long_about = None)]
pub struct Args {
    /// Warning threshold in percent of used memory (default: 90)
    #[arg(short = 'w', long = "warn", value_name = "PERCENT")]
    pub warn: Option<f64>,

    /// Critical threshold in percent of used memory (default: 95)
    #[arg(short = 'c', long = "critical", value_name = "PERCENT")]
    pub critical: Option<f64>,

    /// Number of top memory consumers to report (default: 10)
    #[arg(short = 't', long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Audit log path for successful kills
    #[arg(long = "audit-log", value_name = "PATH")]
    pub audit_log: Option<String>,

    /// Dry run mode - report what would be killed without sending signals
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

impl Args {
    /// Parse arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
