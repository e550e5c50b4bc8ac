// Environment variable configuration support

use super::Config;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Apply environment variable overrides to configuration
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    // Severity thresholds
    if let Ok(val) = env::var("RAMPROBE_WARN") {
        config.thresholds.warn = val.parse()?;
    }
    if let Ok(val) = env::var("RAMPROBE_CRITICAL") {
        config.thresholds.critical = val.parse()?;
    }

    // Report size
    if let Ok(val) = env::var("RAMPROBE_TOP") {
        config.top = val.parse()?;
    }

    // Audit log path
    if let Ok(val) = env::var("RAMPROBE_AUDIT_LOG") {
        config.audit_log = PathBuf::from(val);
    }

    // Behavior flags
    if let Ok(val) = env::var("RAMPROBE_DRY_RUN") {
        config.dry_run = parse_bool(&val)?;
    }
    if let Ok(val) = env::var("RAMPROBE_DEBUG") {
        config.debug = parse_bool(&val)?;
    }

    Ok(config)
}

/// Parse boolean value from string
/// Accepts: true/false, 1/0, yes/no, on/off (case-insensitive)
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid boolean value: {}", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("yes").unwrap());
        assert!(parse_bool("on").unwrap());

        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(!parse_bool("off").unwrap());

        assert!(parse_bool("invalid").is_err());
    }
}
