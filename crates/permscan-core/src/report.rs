//! Report assembly and the JSON output document.
//!
//! Pure transformation of a [`ScanOutcome`] + [`MaskResult`] into the
//! structures the CLI renders, plus the single side effect of writing the
//! JSON document to disk.

use std::collections::BTreeMap;

use camino::Utf8Path;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::calc::MaskResult;
use crate::error::{ScanError, ScanResult};
use crate::permissions::all_names;
use crate::scanner::{ScanOutcome, UsageDetail};

/// Placeholder substituted into the invite URL when no client id is set.
pub const CLIENT_ID_PLACEHOLDER: &str = "YOUR_CLIENT_ID";

/// Default path for the JSON report.
pub const DEFAULT_REPORT_PATH: &str = "discord-permissions-report.json";

/// The JSON document written at the end of a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// ISO-8601 generation time.
    pub timestamp: String,
    /// Sorted discovered permission names.
    pub permissions: Vec<String>,
    /// Decimal permission mask.
    pub permission_integer: String,
    /// Every rule match, in file order.
    pub details: Vec<UsageDetail>,
    /// Number of files read.
    pub files_scanned: usize,
    /// Bot-invite URL embedding the mask.
    pub invite_url: String,
}

/// Everything the console rendering needs beyond the JSON document.
#[derive(Debug)]
pub struct ReportBundle {
    /// The document as written to disk.
    pub document: ScanReport,
    /// Table names absent from the discovered set, sorted.
    pub unused: Vec<String>,
    /// Details grouped by canonical permission name.
    pub by_permission: BTreeMap<String, Vec<UsageDetail>>,
    /// Raw → canonical spellings that actually differed during the scan.
    pub normalizations: BTreeMap<String, String>,
    /// Valid/invalid partition from the calculator.
    pub mask: MaskResult,
}

/// Build the invite URL for a decimal mask, with the client id placeholder
/// unless a real id is supplied.
pub fn invite_url(permission_integer: &str, client_id: Option<&str>) -> String {
    let id = client_id.unwrap_or(CLIENT_ID_PLACEHOLDER);
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={id}&permissions={permission_integer}&scope=bot%20applications.commands"
    )
}

/// Assemble the full report bundle from scan and calculation results.
pub fn assemble(outcome: ScanOutcome, mask: MaskResult, client_id: Option<&str>) -> ReportBundle {
    let discovered: Vec<String> = outcome.permissions.iter().cloned().collect();

    let unused: Vec<String> = all_names()
        .into_iter()
        .filter(|name| !outcome.permissions.contains(*name))
        .map(str::to_string)
        .collect();

    let mut by_permission: BTreeMap<String, Vec<UsageDetail>> = BTreeMap::new();
    let mut normalizations = BTreeMap::new();
    for detail in &outcome.details {
        if let Some(ref raw) = detail.raw_permission
            && raw != &detail.permission
        {
            normalizations.insert(raw.clone(), detail.permission.clone());
        }
        by_permission
            .entry(detail.permission.clone())
            .or_default()
            .push(detail.clone());
    }

    let document = ScanReport {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        permissions: discovered,
        permission_integer: mask.permission_integer.clone(),
        details: outcome.details,
        files_scanned: outcome.files_scanned,
        invite_url: invite_url(&mask.permission_integer, client_id),
    };

    ReportBundle {
        document,
        unused,
        by_permission,
        normalizations,
        mask,
    }
}

/// Write the JSON document to `path`, pretty-printed.
pub fn write_report(path: &Utf8Path, report: &ScanReport) -> ScanResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path.as_std_path(), json).map_err(|source| ScanError::WriteReport {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path, "report written");
    Ok(())
}
