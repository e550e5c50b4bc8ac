// ramprobe - Memory pressure probe and process reclaim library

pub mod audit;
pub mod config;
pub mod killer;
pub mod monitor;
pub mod policy;
pub mod probe;
pub mod report;

// Re-export commonly used types
pub use config::Config;
pub use monitor::{MemSnapshot, ProcessRecord};
pub use policy::SeverityLevel;
pub use report::RunResult;

/// Maximum length of a command string echoed into log lines
const LOG_FIELD_MAX: usize = 128;

/// Sanitize an untrusted process string before it reaches a log line.
///
/// Control characters are replaced and the value is capped so a hostile
/// command line cannot inject log records or flood the operator channel.
pub fn sanitize_for_log(value: &str) -> String {
    let mut out: String = value
        .chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .take(LOG_FIELD_MAX)
        .collect();

    if value.chars().count() > LOG_FIELD_MAX {
        out.push_str("...");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_control_chars() {
        assert_eq!(sanitize_for_log("bad\nname\t"), "bad?name?");
        assert_eq!(sanitize_for_log("plain"), "plain");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(LOG_FIELD_MAX + 50);
        let out = sanitize_for_log(&long);
        assert_eq!(out.chars().count(), LOG_FIELD_MAX + 3);
        assert!(out.ends_with("..."));
    }
}
