//! Core library for permscan.
//!
//! Statically scans a source tree for textual patterns that imply usage of
//! Discord API permission bits, aggregates the discovered set into a single
//! bitmask, and assembles a used/unused report plus a bot-invite URL.
//!
//! # Modules
//!
//! - [`permissions`] - Canonical bit table, alias table, name normalization
//! - [`patterns`] - The fixed heuristic rule list
//! - [`walker`] - Source-file discovery
//! - [`scanner`] - Per-file matching and tree aggregation
//! - [`calc`] - Bitmask calculation
//! - [`report`] - Report assembly and JSON output
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8Path;
//! use permscan_core::{calc, report, scanner};
//!
//! let outcome = scanner::scan_tree(Utf8Path::new("."), &[], None).expect("scan failed");
//! let mask = calc::calculate(&outcome.permissions);
//! let bundle = report::assemble(outcome, mask, None);
//! println!("{}", bundle.document.permission_integer);
//! ```
#![deny(unsafe_code)]

pub mod calc;
pub mod config;
pub mod error;
pub mod patterns;
pub mod permissions;
pub mod report;
pub mod scanner;
pub mod walker;

pub use calc::MaskResult;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, ScanError, ScanResult};
pub use report::{ReportBundle, ScanReport};
pub use scanner::{ScanOutcome, UsageDetail};
