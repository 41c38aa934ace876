//! Per-file pattern scanning and whole-tree aggregation.
//!
//! Runs every rule in [`PATTERN_RULES`] against file content with find-all
//! semantics. Capturing rules yield one detail per match with the raw
//! token; implied rules yield one detail per implied permission per match.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{ScanError, ScanResult};
use crate::patterns::{PATTERN_RULES, RuleKind};
use crate::permissions::normalize;
use crate::walker;

/// One successful rule match, tied to its source location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageDetail {
    /// Normalized canonical permission name.
    pub permission: String,
    /// The name as written in the source, for capturing rules only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_permission: Option<String>,
    /// Source file the match came from.
    pub file: Utf8PathBuf,
    /// 1-based line of the match start.
    pub line: usize,
    /// The matched text itself.
    #[serde(rename = "match")]
    pub matched: String,
    /// `true` when the permission was implied by a call shape rather than
    /// named explicitly.
    pub inferred: bool,
}

/// Result of scanning one file.
#[derive(Debug, Default)]
pub struct FileScan {
    /// Distinct permission names found in this file.
    pub permissions: BTreeSet<String>,
    /// One entry per match, in rule order then match order.
    pub details: Vec<UsageDetail>,
}

/// Result of scanning a whole tree.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Union of per-file permission sets.
    pub permissions: BTreeSet<String>,
    /// All detail records, in file order.
    pub details: Vec<UsageDetail>,
    /// Number of files read.
    pub files_scanned: usize,
}

/// 1-based line number of a byte offset: newlines before it, plus one.
fn line_at(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Scan already-read content, attributing matches to `file`.
pub fn scan_content(file: &Utf8Path, content: &str) -> FileScan {
    let mut scan = FileScan::default();

    for rule in PATTERN_RULES.iter() {
        match rule.kind {
            RuleKind::Capture => {
                for caps in rule.regex.captures_iter(content) {
                    let whole = caps.get(0).expect("group 0 always present");
                    let raw = &caps[1];
                    let permission = normalize(raw);
                    scan.permissions.insert(permission.clone());
                    scan.details.push(UsageDetail {
                        permission,
                        raw_permission: Some(raw.to_string()),
                        file: file.to_path_buf(),
                        line: line_at(content, whole.start()),
                        matched: whole.as_str().to_string(),
                        inferred: false,
                    });
                }
            }
            RuleKind::Implied(implied) => {
                for m in rule.regex.find_iter(content) {
                    let line = line_at(content, m.start());
                    for permission in implied {
                        scan.permissions.insert((*permission).to_string());
                        scan.details.push(UsageDetail {
                            permission: (*permission).to_string(),
                            raw_permission: None,
                            file: file.to_path_buf(),
                            line,
                            matched: m.as_str().to_string(),
                            inferred: true,
                        });
                    }
                }
            }
        }
    }

    scan
}

/// Read and scan a single file. An unreadable file is fatal.
pub fn scan_file(file: &Utf8Path) -> ScanResult<FileScan> {
    let content = std::fs::read_to_string(file.as_std_path()).map_err(|source| {
        ScanError::Read {
            path: file.to_path_buf(),
            source,
        }
    })?;
    Ok(scan_content(file, &content))
}

/// Walk `root` and scan every discovered source file.
#[tracing::instrument(skip_all, fields(root = %root))]
pub fn scan_tree(
    root: &Utf8Path,
    extra_excludes: &[String],
    extensions: Option<&[String]>,
) -> ScanResult<ScanOutcome> {
    let files = walker::discover_files(root, extra_excludes, extensions)?;

    let mut outcome = ScanOutcome::default();
    for file in &files {
        let scan = scan_file(file)?;
        if !scan.permissions.is_empty() {
            tracing::debug!(file = %file, found = scan.permissions.len(), "matches in file");
        }
        outcome.permissions.extend(scan.permissions);
        outcome.details.extend(scan.details);
    }
    outcome.files_scanned = files.len();

    tracing::info!(
        files = outcome.files_scanned,
        permissions = outcome.permissions.len(),
        "scan complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Utf8PathBuf {
        Utf8PathBuf::from("src/bot.js")
    }

    #[test]
    fn send_call_is_inferred_with_correct_line() {
        let content = "const x = 1;\nchannel.send(\"hi\");\n";
        let scan = scan_content(&path(), content);

        let detail = scan
            .details
            .iter()
            .find(|d| d.permission == "SEND_MESSAGES")
            .expect("send should imply SEND_MESSAGES");
        assert!(detail.inferred);
        assert!(detail.raw_permission.is_none());
        assert_eq!(detail.line, 2);
    }

    #[test]
    fn explicit_check_is_captured_with_raw_name() {
        let content = "if (member.permissions.has('BAN_MEMBERS')) { ban(); }";
        let scan = scan_content(&path(), content);

        let detail = scan
            .details
            .iter()
            .find(|d| d.permission == "BAN_MEMBERS")
            .expect("explicit check should be captured");
        assert!(!detail.inferred);
        assert_eq!(detail.raw_permission.as_deref(), Some("BAN_MEMBERS"));
        assert_eq!(detail.line, 1);
    }

    #[test]
    fn library_spelling_normalizes_through_the_alias_table() {
        let content = "member.permissions.has(PermissionFlagsBits.ModerateMembers)";
        let scan = scan_content(&path(), content);
        assert!(scan.permissions.contains("MODERATE_MEMBERS"));
        let detail = scan
            .details
            .iter()
            .find(|d| d.permission == "MODERATE_MEMBERS")
            .unwrap();
        assert_eq!(detail.raw_permission.as_deref(), Some("ModerateMembers"));
    }

    #[test]
    fn permissions_deduplicate_but_details_do_not() {
        let content = "a.send(x);\nb.send(y);\n";
        let scan = scan_content(&path(), content);
        assert!(scan.permissions.contains("SEND_MESSAGES"));
        let sends: Vec<_> = scan
            .details
            .iter()
            .filter(|d| d.permission == "SEND_MESSAGES")
            .collect();
        assert_eq!(sends.len(), 2);
        assert_eq!(sends[0].line, 1);
        assert_eq!(sends[1].line, 2);
    }

    #[test]
    fn implied_rule_emits_one_detail_per_implied_permission() {
        let content = "channel.bulkDelete(50);";
        let scan = scan_content(&path(), content);
        assert!(scan.permissions.contains("MANAGE_MESSAGES"));
        assert!(scan.permissions.contains("READ_MESSAGE_HISTORY"));
        assert_eq!(
            scan.details
                .iter()
                .filter(|d| d.matched.contains("bulkDelete"))
                .count(),
            2
        );
    }

    #[test]
    fn clean_content_yields_nothing() {
        let scan = scan_content(&path(), "const answer = 42;\n");
        assert!(scan.permissions.is_empty());
        assert!(scan.details.is_empty());
    }

    #[test]
    fn unknown_captured_token_still_surfaces() {
        let content = "member.permissions.has('FOO_BAR')";
        let scan = scan_content(&path(), content);
        assert!(scan.permissions.contains("FOO_BAR"));
    }

    #[test]
    fn scan_tree_aggregates_across_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.js"), "channel.send('x');\n").unwrap();
        std::fs::write(
            tmp.path().join("b.js"),
            "member.permissions.has('KICK_MEMBERS');\n",
        )
        .unwrap();
        std::fs::write(tmp.path().join("ignored.txt"), "channel.send('x');\n").unwrap();

        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let outcome = scan_tree(&root, &[], None).unwrap();
        assert_eq!(outcome.files_scanned, 2);
        assert!(outcome.permissions.contains("SEND_MESSAGES"));
        assert!(outcome.permissions.contains("KICK_MEMBERS"));
    }

    #[test]
    fn scan_tree_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.js"), "channel.send('x');\n").unwrap();
        std::fs::write(tmp.path().join("b.js"), "member.kick();\n").unwrap();

        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let first = scan_tree(&root, &[], None).unwrap();
        let second = scan_tree(&root, &[], None).unwrap();
        assert_eq!(first.permissions, second.permissions);
        assert_eq!(first.details, second.details);
    }
}
