//! Error types for permscan-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while scanning a source tree.
///
/// A read or traversal failure aborts the whole run; there is no per-file
/// skip policy.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A file could not be read during the scan.
    #[error("failed to read {path}")]
    Read {
        /// The file that failed to read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("directory traversal failed")]
    Walk(#[from] walkdir::Error),

    /// A path under the scan root is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(std::path::PathBuf),

    /// A configured exclusion glob did not compile.
    #[error("invalid exclusion pattern: {0}")]
    ExcludePattern(#[from] globset::Error),

    /// The JSON report could not be written.
    #[error("failed to write report to {path}")]
    WriteReport {
        /// The report output path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Report serialization failed.
    #[error("failed to serialize report")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias using [`ScanError`].
pub type ScanResult<T> = Result<T, ScanError>;
