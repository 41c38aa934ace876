//! Scan command — analyze a source tree and calculate its permission mask.
//!
//! Walks the tree, runs the pattern rules over every source file, ORs the
//! discovered permission bits together, prints the multi-section console
//! report, and writes the JSON report document.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use permscan_core::report::DEFAULT_REPORT_PATH;
use permscan_core::{Config, ReportBundle, calc, report, scanner};

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root directory to scan.
    #[arg(default_value = ".")]
    pub root: Utf8PathBuf,

    /// Where to write the JSON report.
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Discord application id to embed in the invite URL.
    #[arg(long)]
    pub client_id: Option<String>,
}

/// Run the scan pipeline and render the report.
#[instrument(name = "cmd_scan", skip_all, fields(root = %args.root))]
pub fn cmd_scan(args: ScanArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(root = %args.root, "executing scan command");

    let extra_excludes = config.exclude.clone().unwrap_or_default();
    let outcome = scanner::scan_tree(&args.root, &extra_excludes, config.extensions.as_deref())
        .with_context(|| format!("failed to scan {}", args.root))?;

    let mask = calc::calculate(&outcome.permissions);
    let client_id = args.client_id.as_deref().or(config.client_id.as_deref());
    let bundle = report::assemble(outcome, mask, client_id);

    let output = args
        .output
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_REPORT_PATH));
    report::write_report(&output, &bundle.document)
        .with_context(|| format!("failed to write {output}"))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&bundle.document)?);
        return Ok(());
    }

    render_text(&args.root, &output, &bundle);
    Ok(())
}

/// Human-readable multi-section report.
fn render_text(root: &camino::Utf8Path, output: &camino::Utf8Path, bundle: &ReportBundle) {
    let doc = &bundle.document;
    let table_size = permscan_core::permissions::all_names().len();

    println!("{}", root.bold());
    println!(
        "  {} {} files scanned",
        "Scanned:".cyan(),
        doc.files_scanned
    );

    // --- used vs. available ---
    println!(
        "\n  {} {} of {} known permissions",
        "Used:".cyan(),
        bundle.mask.valid_permissions.len(),
        table_size,
    );
    for name in &bundle.mask.valid_permissions {
        let bit = permscan_core::permissions::bit_for(name).unwrap_or(0);
        println!("    {} {name} ({bit})", "+".green());
    }

    // --- per-permission usage examples ---
    if !bundle.by_permission.is_empty() {
        println!("\n  {}", "Usage examples:".cyan());
        for (name, details) in &bundle.by_permission {
            println!("    {}", name.bold());
            for detail in details.iter().take(3) {
                let origin = if detail.inferred { "inferred" } else { "explicit" };
                println!(
                    "      {}:{} {} ({origin})",
                    detail.file,
                    detail.line,
                    detail.matched.trim().dimmed(),
                );
            }
            if details.len() > 3 {
                println!("      {} {} more", "…".dimmed(), details.len() - 3);
            }
        }
    }

    // --- normalized spellings ---
    if !bundle.normalizations.is_empty() {
        println!("\n  {}", "Normalized spellings:".cyan());
        for (raw, canonical) in &bundle.normalizations {
            println!("    {raw} {} {canonical}", "->".dimmed());
        }
    }

    // --- invalid names ---
    if !bundle.mask.invalid_permissions.is_empty() {
        println!(
            "\n  {} {} unrecognized name(s), excluded from the mask:",
            "Warning:".yellow(),
            bundle.mask.invalid_permissions.len(),
        );
        for name in &bundle.mask.invalid_permissions {
            println!("    {} {name}", "?".yellow());
        }
    }

    // --- unused ---
    println!(
        "\n  {} {} permissions not referenced anywhere",
        "Unused:".cyan(),
        bundle.unused.len(),
    );
    for name in &bundle.unused {
        println!("    {} {name}", "-".dimmed());
    }

    // --- mask and invite URL ---
    println!(
        "\n  {} {}",
        "Permission integer:".cyan(),
        doc.permission_integer.bold(),
    );
    println!("  {} {}", "Invite URL:".cyan(), doc.invite_url);

    // --- next steps ---
    println!("\n  {}", "Next steps:".cyan());
    println!("    1. Review {output} for the full match list");
    println!("    2. Update your bot invite URLs with the calculated permission integer");
    println!("    3. Re-invite the bot to your servers so the new permissions apply");
}
