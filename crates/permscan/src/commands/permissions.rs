//! Permissions command — print the canonical permission table.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use permscan_core::permissions::{ALIASES, all_names, bit_for};

/// Arguments for the `permissions` subcommand.
#[derive(Args, Debug, Default)]
pub struct PermissionsArgs {
    /// Also list the client-library alias spellings.
    #[arg(long)]
    pub aliases: bool,
}

#[derive(Serialize)]
struct TableEntry {
    name: &'static str,
    bit: u32,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<&'static str>,
}

fn table_entries() -> Vec<TableEntry> {
    all_names()
        .into_iter()
        .map(|name| {
            let value = bit_for(name).unwrap_or(0);
            let alias = ALIASES
                .iter()
                .find(|(_, canonical)| **canonical == name)
                .map(|(alias, _)| *alias);
            TableEntry {
                name,
                bit: value.trailing_zeros(),
                value: value.to_string(),
                alias,
            }
        })
        .collect()
}

/// Print the permission table.
#[instrument(name = "cmd_permissions", skip_all)]
pub fn cmd_permissions(args: PermissionsArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(aliases = args.aliases, "executing permissions command");

    let entries = table_entries();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!(
        "{} ({} entries)",
        "Known permissions".bold(),
        entries.len()
    );
    for entry in &entries {
        if args.aliases
            && let Some(alias) = entry.alias
        {
            println!(
                "  {:<28} bit {:>2}  {:>14}  {}",
                entry.name,
                entry.bit,
                entry.value,
                alias.dimmed(),
            );
        } else {
            println!(
                "  {:<28} bit {:>2}  {:>14}",
                entry.name, entry.bit, entry.value,
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_known_permission() {
        assert_eq!(table_entries().len(), all_names().len());
    }

    #[test]
    fn every_entry_has_an_alias() {
        for entry in table_entries() {
            assert!(entry.alias.is_some(), "{} has no alias", entry.name);
        }
    }

    #[test]
    fn bit_positions_match_values() {
        for entry in table_entries() {
            assert_eq!(entry.value, (1u64 << entry.bit).to_string());
        }
    }

    #[test]
    fn text_and_json_render_without_error() {
        assert!(cmd_permissions(PermissionsArgs::default(), false).is_ok());
        assert!(cmd_permissions(PermissionsArgs { aliases: true }, true).is_ok());
    }
}
