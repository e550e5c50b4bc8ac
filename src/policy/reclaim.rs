// Reclaim rules: non-protected processes that are safe to terminate

use super::{is_protected, matches_exact, matches_insensitive, PolicyContext};
use crate::monitor::ProcessRecord;

/// Command substrings marking test runners, caches and build artifacts.
/// Case-sensitive, as written in the reclaim policy.
const RECLAIM_PATTERNS: &[&str] = &["npm test", "jest", "/tmp/", "cache", "build"];

/// Interpreter processes older than this are considered reclaimable
const INTERPRETER_MAX_AGE_SECS: u64 = 3600;

/// A named reclaim predicate; the rules are additive, any match qualifies
struct ReclaimRule {
    name: &'static str,
    check: fn(&ProcessRecord, &PolicyContext<'_>, u64) -> bool,
}

const RECLAIM_RULES: &[ReclaimRule] = &[
    ReclaimRule {
        name: "artifact",
        check: |record, _, _| {
            RECLAIM_PATTERNS
                .iter()
                .any(|pattern| matches_exact(record, pattern))
        },
    },
    ReclaimRule {
        name: "orphaned-node",
        check: |record, ctx, _| {
            matches_insensitive(record, "node") && !ctx.by_pid.contains_key(&record.ppid)
        },
    },
    ReclaimRule {
        name: "old-python",
        check: |record, _, age_seconds| {
            matches_insensitive(record, "python") && age_seconds > INTERPRETER_MAX_AGE_SECS
        },
    },
];

/// Name of the first reclaim rule a non-protected process matches
pub fn reclaim_verdict(
    record: &ProcessRecord,
    ctx: &PolicyContext<'_>,
    age_seconds: u64,
) -> Option<&'static str> {
    if is_protected(record, ctx) {
        return None;
    }

    RECLAIM_RULES
        .iter()
        .find(|rule| (rule.check)(record, ctx, age_seconds))
        .map(|rule| rule.name)
}

/// Whether a process may be reclaimed under memory pressure.
/// Protection strictly dominates: a protected process is never safe to kill.
pub fn is_safe_to_kill(record: &ProcessRecord, ctx: &PolicyContext<'_>, age_seconds: u64) -> bool {
    reclaim_verdict(record, ctx, age_seconds).is_some()
}
