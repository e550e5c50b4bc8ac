// Severity classification from memory percentage

use serde::Serialize;

/// Memory pressure tier, totally ordered ok < warning < critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Ok,
    Warning,
    Critical,
}

/// Classification thresholds in percent of used memory
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub warn: f64,
    pub critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warn: 90.0,
            critical: 95.0,
        }
    }
}

impl SeverityLevel {
    /// Map a used-memory percentage to a severity tier.
    ///
    /// Total over the whole input domain: negative or non-finite values
    /// (no valid memory data) clamp to 0% and classify as ok.
    pub fn classify(used_percent: f64, thresholds: &Thresholds) -> Self {
        let pct = if used_percent.is_finite() {
            used_percent.max(0.0)
        } else {
            0.0
        };

        if pct >= thresholds.critical {
            Self::Critical
        } else if pct >= thresholds.warn {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}
