// Protection rules: processes that must never be terminated

use super::{
    matches_insensitive, PolicyContext, CORE_OS_PROCESSES, MAIL_BRIDGE_MARKERS, MESSAGING_APP,
};
use crate::monitor::ProcessRecord;

/// A named protection predicate
pub struct ProtectRule {
    pub name: &'static str,
    check: fn(&ProcessRecord, &PolicyContext<'_>) -> bool,
}

/// Protection rules in priority order; the first match wins
pub const PROTECT_RULES: &[ProtectRule] = &[
    ProtectRule {
        name: "init",
        check: |record, _| record.pid == 1,
    },
    ProtectRule {
        name: "gateway",
        check: |record, ctx| ctx.gateway_pid == Some(record.pid),
    },
    ProtectRule {
        name: "messaging-pid",
        check: |record, ctx| ctx.messaging_pids.contains(&record.pid),
    },
    ProtectRule {
        name: "messaging-name",
        check: |record, _| matches_insensitive(record, MESSAGING_APP),
    },
    ProtectRule {
        name: "mail-bridge",
        check: |record, _| {
            MAIL_BRIDGE_MARKERS
                .iter()
                .any(|marker| matches_insensitive(record, marker))
        },
    },
    ProtectRule {
        name: "system-account",
        check: |record, _| record.user.starts_with('_'),
    },
    ProtectRule {
        name: "core-os",
        check: |record, _| {
            CORE_OS_PROCESSES
                .iter()
                .any(|name| matches_insensitive(record, name))
        },
    },
];

/// Evaluate the ordered rule list; returns the first matching rule's name
pub fn protection_verdict(record: &ProcessRecord, ctx: &PolicyContext<'_>) -> Option<&'static str> {
    PROTECT_RULES
        .iter()
        .find(|rule| (rule.check)(record, ctx))
        .map(|rule| rule.name)
}

/// Whether any protection rule shields this process
pub fn is_protected(record: &ProcessRecord, ctx: &PolicyContext<'_>) -> bool {
    protection_verdict(record, ctx).is_some()
}

#[cfg(test)]
mod tests {
    use super::super::test_record;
    use super::*;

    fn empty_ctx() -> PolicyContext<'static> {
        PolicyContext {
            gateway_pid: None,
            messaging_pids: std::collections::HashSet::new(),
            by_pid: std::collections::HashMap::new(),
            by_ppid: std::collections::HashMap::new(),
        }
    }

    #[test]
    fn test_init_rule() {
        let record = test_record(1, 0, "root", "/sbin/init");
        assert_eq!(protection_verdict(&record, &empty_ctx()), Some("init"));
    }

    #[test]
    fn test_gateway_rule() {
        let record = test_record(200, 1, "alice", "some-service");
        let mut ctx = empty_ctx();
        ctx.gateway_pid = Some(200);
        assert_eq!(protection_verdict(&record, &ctx), Some("gateway"));
        assert!(!is_protected(&record, &empty_ctx()));
    }

    #[test]
    fn test_messaging_pid_rule() {
        // Command says nothing; membership in the pid set alone protects
        let record = test_record(11, 10, "alice", "helper-renderer");
        let mut ctx = empty_ctx();
        ctx.messaging_pids.insert(11);
        assert_eq!(protection_verdict(&record, &ctx), Some("messaging-pid"));
    }

    #[test]
    fn test_messaging_name_rule_case_insensitive() {
        let record = test_record(30, 1, "alice", "/Applications/WhatsApp.app/WhatsApp");
        assert_eq!(
            protection_verdict(&record, &empty_ctx()),
            Some("messaging-name")
        );
    }

    #[test]
    fn test_mail_bridge_rules() {
        for command in [
            "/Applications/Proton Mail Bridge.app/Contents/MacOS/bridge",
            "bridge-gui --launcher",
            "bridge --grpc --parent-pid 77",
        ] {
            let record = test_record(40, 1, "alice", command);
            assert_eq!(
                protection_verdict(&record, &empty_ctx()),
                Some("mail-bridge"),
                "command: {command}"
            );
        }
    }

    #[test]
    fn test_system_account_rule() {
        // Scenario C: underscore user is protected regardless of command
        let record = test_record(50, 1, "_spotlight", "anything at all");
        assert_eq!(
            protection_verdict(&record, &empty_ctx()),
            Some("system-account")
        );
    }

    #[test]
    fn test_core_os_rule() {
        for command in [
            "kernel_task",
            "loginwindow console",
            "/System/Library/.../WindowServer",
            "/sbin/launchd",
            "/usr/sbin/systemstats",
            "sshd: alice [priv]",
        ] {
            let record = test_record(60, 1, "alice", command);
            assert_eq!(
                protection_verdict(&record, &empty_ctx()),
                Some("core-os"),
                "command: {command}"
            );
        }
    }

    #[test]
    fn test_unmatched_process_is_not_protected() {
        let record = test_record(70, 1, "alice", "/usr/bin/vim notes.txt");
        assert_eq!(protection_verdict(&record, &empty_ctx()), None);
        assert!(!is_protected(&record, &empty_ctx()));
    }

    #[test]
    fn test_first_match_wins() {
        // pid 1 owned by an underscore account still reports the init rule
        let record = test_record(1, 0, "_system", "whatsapp");
        assert_eq!(protection_verdict(&record, &empty_ctx()), Some("init"));
    }
}
