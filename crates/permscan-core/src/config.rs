//! Configuration loading and discovery.
//!
//! Config file discovery works by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from the XDG config directory
//! 3. Merging with defaults, then environment variables
//!
//! # Config file locations (in order of precedence, highest first):
//! - `permscan.<ext>` in current directory or any parent
//! - `.permscan.<ext>` in current directory or any parent
//! - `~/.config/permscan/config.<ext>` (user config)
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`. When multiple
//! files exist in the same directory, all are merged via figment; later
//! extensions override earlier.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// The configuration for permscan.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON), then overridden by `PERMSCAN_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Path for the JSON scan report (default: `discord-permissions-report.json`).
    pub output: Option<Utf8PathBuf>,
    /// Discord application client id substituted into the invite URL.
    pub client_id: Option<String>,
    /// Extra directory-exclusion globs appended to the built-in set.
    pub exclude: Option<Vec<String>>,
    /// Source extensions to scan, replacing the built-in set when present.
    pub extensions: Option<Vec<String>>,
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from the XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from the `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "permscan";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from the XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/permscan/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Disable the boundary marker (search all the way to the filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. `PERMSCAN_*` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest to search root)
    /// 4. User config (`~/.config/permscan/config.<ext>`)
    /// 5. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = Self::find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // PERMSCAN_LOG_LEVEL=debug, PERMSCAN_CLIENT_ID=..., etc.
        figment = figment.merge(Env::prefixed("PERMSCAN_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(log_level = config.log_level.as_str(), "configuration loaded");
        Ok((config, sources))
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching config files from the closest directory that has
    /// any match, ordered low-to-high precedence: dotfiles before regular
    /// files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    found.push(dotfile);
                }
            }
            for ext in CONFIG_EXTENSIONS {
                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    found.push(regular);
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Check for the boundary marker AFTER checking config files,
            // so a config in the same directory as the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in the XDG config directory.
    fn find_user_config() -> Option<Utf8PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
        let config_dir = proj_dirs.config_dir();

        for ext in CONFIG_EXTENSIONS {
            let config_path = config_dir.join(format!("config.{ext}"));
            if config_path.is_file() {
                return Utf8PathBuf::from_path_buf(config_path).ok();
            }
        }

        None
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the user config directory path.
///
/// Returns `~/.config/permscan/` on Linux, `~/Library/Application Support/permscan/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.output.is_none());
        assert!(config.client_id.is_none());
    }

    #[test]
    fn loader_builds_with_defaults() {
        let loader = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker();

        let (config, sources) = loader.load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn single_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"log_level = "debug"
output = "out/report.json"
client_id = "123456789012345678"
"#,
        )
        .unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.output.as_ref().map(|p| p.as_str()),
            Some("out/report.json")
        );
        assert_eq!(config.client_id.as_deref(), Some("123456789012345678"));
        assert_eq!(sources.primary_file(), Some(config_path.as_path()));
    }

    #[test]
    fn project_config_discovered_in_search_root() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".permscan.toml"),
            "exclude = [\"**/fixtures\"]\n",
        )
        .unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(&root)
            .load()
            .unwrap();

        assert_eq!(config.exclude, Some(vec!["**/fixtures".to_string()]));
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn yaml_config_supported() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        fs::write(&config_path, "log_level: warn\nextensions: [py]\n").unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.extensions, Some(vec!["py".to_string()]));
    }

    #[test]
    fn later_explicit_file_wins() {
        let tmp = TempDir::new().unwrap();
        let low = tmp.path().join("low.toml");
        let high = tmp.path().join("high.toml");
        fs::write(&low, "client_id = \"low\"\n").unwrap();
        fs::write(&high, "client_id = \"high\"\n").unwrap();

        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(Utf8PathBuf::try_from(low).unwrap())
            .with_file(Utf8PathBuf::try_from(high).unwrap())
            .load()
            .unwrap();

        assert_eq!(config.client_id.as_deref(), Some("high"));
    }
}
