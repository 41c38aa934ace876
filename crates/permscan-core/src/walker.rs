//! Source-file discovery.
//!
//! Walks a root directory, prunes dependency/build/VCS directories, and
//! keeps files carrying one of the recognized source extensions. The walk
//! does not follow symlinks.

use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{ScanError, ScanResult};

/// Directory patterns pruned from every walk.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/node_modules",
    "**/.git",
    "**/target",
    "**/dist",
    "**/build",
    "**/coverage",
    "**/.next",
    "**/vendor",
];

/// Extensions treated as scannable source code.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Compile the exclusion set: defaults plus any extra globs from config.
fn exclusion_set(extra: &[String]) -> ScanResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_EXCLUDES.iter().copied().chain(extra.iter().map(String::as_str)) {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Recursively list scannable source files under `root`, sorted.
///
/// `extra_excludes` appends to [`DEFAULT_EXCLUDES`]; `extensions` replaces
/// [`SOURCE_EXTENSIONS`] when present. A traversal error or a non-UTF-8
/// path aborts the walk.
#[tracing::instrument(skip_all, fields(root = %root))]
pub fn discover_files(
    root: &Utf8Path,
    extra_excludes: &[String],
    extensions: Option<&[String]>,
) -> ScanResult<Vec<Utf8PathBuf>> {
    let excluded = exclusion_set(extra_excludes)?;

    let matches_extension = |path: &Utf8Path| -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        extensions.map_or_else(
            || SOURCE_EXTENSIONS.contains(&ext),
            |exts| exts.iter().any(|e| e == ext),
        )
    };

    let mut files = Vec::new();
    let walk = WalkDir::new(root.as_std_path())
        .into_iter()
        .filter_entry(|entry| !excluded.is_match(entry.path()));
    for entry in walk {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(ScanError::NonUtf8Path)?;
        if matches_extension(&path) {
            files.push(path);
        }
    }

    files.sort_unstable();
    tracing::debug!(count = files.len(), "discovered source files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
    }

    #[test]
    fn finds_source_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("src/commands")).unwrap();
        fs::write(tmp.path().join("index.js"), "").unwrap();
        fs::write(tmp.path().join("src/bot.ts"), "").unwrap();
        fs::write(tmp.path().join("src/commands/ban.js"), "").unwrap();

        let files = discover_files(&utf8(tmp.path()), &[], None).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn skips_unrecognized_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("README.md"), "").unwrap();
        fs::write(tmp.path().join("data.json"), "{}").unwrap();
        fs::write(tmp.path().join("bot.js"), "").unwrap();

        let files = discover_files(&utf8(tmp.path()), &[], None).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].as_str().ends_with("bot.js"));
    }

    #[test]
    fn prunes_dependency_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("node_modules/discord.js")).unwrap();
        fs::write(tmp.path().join("node_modules/discord.js/index.js"), "").unwrap();
        fs::write(tmp.path().join("bot.js"), "").unwrap();

        let files = discover_files(&utf8(tmp.path()), &[], None).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].as_str().ends_with("bot.js"));
    }

    #[test]
    fn extra_excludes_prune_more() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("generated")).unwrap();
        fs::write(tmp.path().join("generated/out.js"), "").unwrap();
        fs::write(tmp.path().join("bot.js"), "").unwrap();

        let files =
            discover_files(&utf8(tmp.path()), &["**/generated".to_string()], None).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn extension_override_replaces_the_default_set() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("bot.py"), "").unwrap();
        fs::write(tmp.path().join("bot.js"), "").unwrap();

        let files =
            discover_files(&utf8(tmp.path()), &[], Some(&["py".to_string()])).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].as_str().ends_with("bot.py"));
    }

    #[test]
    fn output_is_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("z.js"), "").unwrap();
        fs::write(tmp.path().join("a.js"), "").unwrap();
        fs::write(tmp.path().join("m.js"), "").unwrap();

        let files = discover_files(&utf8(tmp.path()), &[], None).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name().unwrap()).collect();
        assert_eq!(names, vec!["a.js", "m.js", "z.js"]);
    }

    #[test]
    fn invalid_extra_glob_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = discover_files(&utf8(tmp.path()), &["[invalid".to_string()], None);
        assert!(matches!(result, Err(ScanError::ExcludePattern(_))));
    }
}
