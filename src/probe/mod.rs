// Probe module - one-shot sample/classify/remediate/report pipeline

mod service;

pub use service::ProbeService;

use crate::config::Config;
use crate::report::RunResult;
use anyhow::Result;

/// Run one probe with the given configuration
pub fn run(config: Config) -> Result<RunResult> {
    let service = ProbeService::new(config);
    service.run()
}
