//! The fixed heuristic rule list.
//!
//! Each rule is a compiled regex that either captures an explicit
//! permission-name token from matched text, or carries a fixed set of
//! permissions that a recognized API call shape implies. The list is
//! deliberately dumb: it reproduces a find-all regex pass, not real static
//! analysis, and rule order only affects the order of emitted detail
//! records, never the aggregated set.

use std::sync::LazyLock;

use regex::Regex;

/// What a rule produces when it matches.
#[derive(Debug, Clone, Copy)]
pub enum RuleKind {
    /// Group 1 of the regex is a raw permission-name token.
    Capture,
    /// Every match implies this fixed set of canonical permission names.
    Implied(&'static [&'static str]),
}

/// One entry in the fixed rule list.
#[derive(Debug)]
pub struct PatternRule {
    /// Short label for logging and the grouped usage narration.
    pub label: &'static str,
    /// Compiled match expression, run with find-all semantics.
    pub regex: Regex,
    /// Capture vs. implied behavior.
    pub kind: RuleKind,
}

impl PatternRule {
    fn capture(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).expect("valid regex"),
            kind: RuleKind::Capture,
        }
    }

    fn implied(label: &'static str, pattern: &str, permissions: &'static [&'static str]) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).expect("valid regex"),
            kind: RuleKind::Implied(permissions),
        }
    }
}

/// The fixed, ordered rule list.
pub static PATTERN_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        // Explicit permission checks; group 1 is the name as written.
        PatternRule::capture(
            "permissions.has()",
            r#"permissions\.has\(\s*['"`]([A-Za-z_]+)['"`]\s*\)"#,
        ),
        PatternRule::capture(
            "permissionsFor().has()",
            r#"permissionsFor\([^)]*\)\s*\.has\(\s*['"`]([A-Za-z_]+)['"`]\s*\)"#,
        ),
        PatternRule::capture("PermissionFlagsBits", r"PermissionFlagsBits\.([A-Za-z]+)"),
        // API call shapes that imply permissions without naming them.
        PatternRule::implied(
            "channel/message send",
            r"\.send\s*\(",
            &["SEND_MESSAGES", "EMBED_LINKS"],
        ),
        PatternRule::implied("message reply", r"\.reply\s*\(", &["SEND_MESSAGES"]),
        PatternRule::implied("message react", r"\.react\s*\(", &["ADD_REACTIONS"]),
        PatternRule::implied("member kick", r"\.kick\s*\(", &["KICK_MEMBERS"]),
        PatternRule::implied("member ban", r"\.ban\s*\(", &["BAN_MEMBERS"]),
        PatternRule::implied("member timeout", r"\.timeout\s*\(", &["MODERATE_MEMBERS"]),
        PatternRule::implied(
            "role add/remove",
            r"\.roles\.(?:add|remove)\s*\(",
            &["MANAGE_ROLES"],
        ),
        PatternRule::implied("set nickname", r"\.setNickname\s*\(", &["MANAGE_NICKNAMES"]),
        PatternRule::implied(
            "bulk delete",
            r"\.bulkDelete\s*\(",
            &["MANAGE_MESSAGES", "READ_MESSAGE_HISTORY"],
        ),
        PatternRule::implied(
            "message pin",
            r"\.(?:pin|unpin)\s*\(",
            &["MANAGE_MESSAGES"],
        ),
        PatternRule::implied(
            "history fetch",
            r"\.messages\.fetch\s*\(",
            &["READ_MESSAGE_HISTORY"],
        ),
        PatternRule::implied(
            "thread create",
            r"\.threads\.create\s*\(",
            &["CREATE_PUBLIC_THREADS"],
        ),
    ]
});
