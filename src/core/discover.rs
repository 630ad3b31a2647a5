// Vitrine - core/discover.rs
//
// Recursive directory traversal for folder imports.
//
// `walkdir` is treated here the way std::path::Path is: an OS
// abstraction the core layer may use. Only file *metadata* (size,
// mtime) is read here; parsing and installing candidate catalogues
// belongs to the app layer (app::catalog_mgr).
//
// Bounds:
//   - A file that cannot be read is a warning, never a failure.
//   - max_files has a named-constant ceiling it cannot exceed.
//   - Excluded directory names stop the walk at the directory itself
//     (filter_entry), so node_modules/ and friends are never entered.

use crate::core::model::CandidateFile;
use crate::util::constants;
use crate::util::error::DiscoverError;
use chrono::{DateTime, Utc};
use std::path::Path;

// =============================================================================
// Configuration
// =============================================================================

/// Settings for one folder import pass.
///
/// Defaults and ceilings both come from `util::constants`, keeping every
/// limit auditable in one place.
#[derive(Debug, Clone)]
pub struct DiscoverConfig {
    /// How deep the walk may recurse.
    pub max_depth: usize,

    /// Cap on returned files; overflow keeps the most recently modified.
    pub max_files: usize,

    /// Filename globs a file must match to count. Empty admits every
    /// file that is not excluded.
    pub include_patterns: Vec<String>,

    /// Globs applied to filenames; entries without wildcards also prune
    /// matching directory names from the walk.
    pub exclude_patterns: Vec<String>,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            max_depth: constants::DEFAULT_MAX_DEPTH,
            max_files: constants::DEFAULT_MAX_FILES,
            include_patterns: constants::DEFAULT_INCLUDE_PATTERNS
                .iter()
                .copied()
                .map(str::to_owned)
                .collect(),
            exclude_patterns: constants::DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .copied()
                .map(str::to_owned)
                .collect(),
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Walk `root` for candidate catalogue files, honouring the include and
/// exclude globs in `config`.
///
/// Unreadable files and directories inside the tree become
/// human-readable strings in the warnings vector; they never fail the
/// call. `Err` is reserved for an unusable root (`RootNotFound`,
/// `NotADirectory`, `PermissionDenied`, `Timeout`).
///
/// Returns `(files, warnings, total_found)`; `total_found` counts every
/// match before the `max_files` cap was applied.
pub fn discover_catalog_files(
    root: &Path,
    config: &DiscoverConfig,
) -> Result<(Vec<CandidateFile>, Vec<String>, usize), DiscoverError> {
    // --- Pre-flight validation ---
    // The metadata probe runs on a helper thread with a deadline: on a
    // network path whose host is down, `fs::metadata()` can sit for 30+
    // seconds in the OS retry cycle, and the UI thread must not.
    //
    // `fs::metadata()` rather than `Path::exists()` / `Path::is_dir()`
    // because those collapse every error, PermissionDenied included,
    // into `false`; access-denied and absent paths deserve different
    // messages.
    {
        /// What the probe thread reports back.
        enum PreflightResult {
            /// Root exists and is a directory; proceed.
            IsDirectory,
            /// Root exists but is a file or symlink, not a directory.
            IsFile,
            /// Root does not exist.
            NotFound,
            /// Root exists but access was refused.
            AccessDenied(std::io::Error),
            /// Any other I/O error (bad name, dangling symlink); shown
            /// to the user the same way as not-found.
            OtherError,
        }

        let root_buf = root.to_path_buf();
        let (tx, rx) = std::sync::mpsc::channel::<PreflightResult>();
        std::thread::spawn(move || {
            let result = match std::fs::metadata(&root_buf) {
                Ok(meta) if meta.is_dir() => PreflightResult::IsDirectory,
                Ok(_) => PreflightResult::IsFile,
                Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                    PreflightResult::AccessDenied(e)
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => PreflightResult::NotFound,
                Err(_) => PreflightResult::OtherError,
            };
            let _ = tx.send(result);
        });

        match rx.recv_timeout(std::time::Duration::from_secs(
            constants::PREFLIGHT_TIMEOUT_SECS,
        )) {
            Ok(PreflightResult::IsDirectory) => {} // proceed
            Ok(PreflightResult::IsFile) => {
                return Err(DiscoverError::NotADirectory {
                    path: root.to_path_buf(),
                });
            }
            Ok(PreflightResult::NotFound) | Ok(PreflightResult::OtherError) => {
                return Err(DiscoverError::RootNotFound {
                    path: root.to_path_buf(),
                });
            }
            Ok(PreflightResult::AccessDenied(source)) => {
                return Err(DiscoverError::PermissionDenied {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(_) => {
                // Timed out or thread panicked. The host is likely
                // unreachable rather than the path not existing, so surface
                // a specific timeout error instead of "path does not exist".
                tracing::warn!(
                    root = %root.display(),
                    timeout_secs = constants::PREFLIGHT_TIMEOUT_SECS,
                    "Pre-flight path check timed out (unreachable network host?)"
                );
                return Err(DiscoverError::Timeout {
                    path: root.to_path_buf(),
                    waited_secs: constants::PREFLIGHT_TIMEOUT_SECS,
                });
            }
        }
    }

    // Clamp config limits to absolute bounds.
    let max_files = config.max_files.min(constants::ABSOLUTE_MAX_FILES);
    let max_depth = config.max_depth.min(constants::ABSOLUTE_MAX_DEPTH);

    tracing::debug!(
        root = %root.display(),
        include = ?config.include_patterns,
        exclude = ?config.exclude_patterns,
        max_depth,
        max_files,
        "Folder import discovery starting"
    );

    // Compile the globs up front; any that fail to parse are logged and dropped.
    let include_pats = compile_patterns(&config.include_patterns, "include");
    let exclude_pats = compile_patterns(&config.exclude_patterns, "exclude");

    let mut files: Vec<CandidateFile> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // The walker prunes excluded directory names via filter_entry, so an
    // excluded subtree (node_modules/, .git/) costs nothing to skip.
    let walker = walkdir::WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            // Directories are dropped when their own name matches a
            // wildcard-free exclude ("node_modules"); globbed excludes
            // ("*.bak") apply to filenames only.
            if e.file_type().is_dir() {
                let name = e.file_name().to_str().unwrap_or("");
                // The root is never excluded from its own walk.
                if e.depth() == 0 {
                    return true;
                }
                return !is_literal_dir_exclude(name, &exclude_pats);
            }
            true // Files are filtered individually below
        });

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                // Inaccessible entry: non-fatal, record warning.
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Import discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        // Directories were handled by filter_entry; only files remain.
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();

        // Pattern matching happens on the bare filename.
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            warnings.push(format!("Skipping '{}': non-UTF-8 filename", path.display()));
            continue;
        };

        // Filename-level excludes (*.bak, *.tmp) go first.
        if matches_any(&exclude_pats, file_name) {
            tracing::trace!(file = file_name, "Excluded by pattern");
            continue;
        }

        // Then the file must match an include pattern; an empty include
        // list admits everything.
        if !include_pats.is_empty() && !matches_any(&include_pats, file_name) {
            tracing::trace!(file = file_name, "Not matched by include patterns");
            continue;
        }

        // Record size and mtime for the candidate.
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                let msg = format!("Cannot read metadata for '{}': {e}", path.display());
                tracing::debug!(warning = %msg, "Import discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        let modified: Option<DateTime<Utc>> = metadata.modified().ok().map(DateTime::<Utc>::from);

        files.push(CandidateFile {
            path: path.to_path_buf(),
            size: metadata.len(),
            modified,
        });
    }

    let total_found = files.len();

    // Over the cap: keep the `max_files` newest files so the user gets
    // the freshest packs rather than an arbitrary subset.
    if total_found > max_files {
        // Newest first. `Option` orders None below Some, so files with
        // no mtime land at the end and are dropped first.
        files.sort_unstable_by(|a, b| b.modified.cmp(&a.modified));
        files.truncate(max_files);

        warnings.push(format!(
            "{total_found} catalogue files were found but the import limit is {max_files}. \
             Only the {max_files} most recently modified files were considered. \
             Raise the limit in Options if you need more."
        ));

        tracing::info!(
            total_found,
            limit = max_files,
            "Candidate list truncated to most recently modified files"
        );
    }

    tracing::debug!(
        total_found,
        candidates = files.len(),
        warnings = warnings.len(),
        "Folder import discovery complete"
    );

    Ok((files, warnings, total_found))
}

// =============================================================================
// Pattern helpers
// =============================================================================

/// Compile pattern strings, logging and dropping any that do not parse.
fn compile_patterns(patterns: &[String], kind: &str) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                tracing::warn!(pattern = p, kind, error = %e, "Glob pattern does not compile, skipping");
                None
            }
        })
        .collect()
}

/// True when `name` matches any of `pats`.
fn matches_any(pats: &[glob::Pattern], name: &str) -> bool {
    pats.iter().any(|p| p.matches(name))
}

/// True when `dir_name` matches a wildcard-free exclude. Literal
/// excludes ("node_modules", ".git") act on directory components;
/// globbed ones never do.
fn is_literal_dir_exclude(dir_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| {
        // A pattern with any wildcard stays a filename matcher.
        let literal = !p.as_str().chars().any(|c| matches!(c, '*' | '?' | '['));
        literal && p.matches(dir_name)
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const STUB_CATALOG: &str = "[catalog]\nid = \"x\"\nname = \"X\"\n";

    fn make_temp_tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        // Candidate catalogue files
        fs::write(root.join("cities.toml"), STUB_CATALOG).expect("write cities.toml");
        fs::write(root.join("wildlife.toml"), STUB_CATALOG).expect("write wildlife.toml");

        // Not a catalogue: wrong extension
        fs::write(root.join("readme.txt"), "Just a readme\n").expect("write readme.txt");

        // Excluded by filename pattern
        fs::write(root.join("cities.toml.bak"), STUB_CATALOG).expect("write .bak");

        // Subdirectory with another candidate
        let sub = root.join("packs");
        fs::create_dir(&sub).expect("mkdir packs");
        fs::write(sub.join("seasonal.toml"), STUB_CATALOG).expect("write seasonal.toml");

        // A directory the exclude list prunes
        let node = root.join("node_modules");
        fs::create_dir(&node).expect("mkdir node_modules");
        fs::write(node.join("dep.toml"), STUB_CATALOG).expect("write dep.toml");

        dir
    }

    #[test]
    fn test_discovers_catalog_files() {
        let dir = make_temp_tree();
        let config = DiscoverConfig::default();
        let (files, warnings, _) = discover_catalog_files(dir.path(), &config).unwrap();

        // Should find cities.toml, wildlife.toml, packs/seasonal.toml
        // NOT readme.txt, NOT cities.toml.bak, NOT node_modules/dep.toml
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert!(
            names.contains(&"cities.toml".to_string()),
            "expected cities.toml, got {names:?}"
        );
        assert!(names.contains(&"wildlife.toml".to_string()));
        assert!(names.contains(&"seasonal.toml".to_string()));
        assert!(
            !names.contains(&"readme.txt".to_string()),
            "txt should not match include patterns"
        );
        assert!(
            !names.contains(&"cities.toml.bak".to_string()),
            "bak should be excluded"
        );
        assert!(
            !names.contains(&"dep.toml".to_string()),
            "node_modules must not be entered"
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_max_depth_zero_finds_no_files() {
        let dir = make_temp_tree();
        // Depth 0 admits the root entry only, so no files at all.
        let config = DiscoverConfig {
            max_depth: 0,
            ..Default::default()
        };
        let (files, _, _) = discover_catalog_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 0);
    }

    #[test]
    fn test_max_depth_1_excludes_subdirs() {
        let dir = make_temp_tree();
        let config = DiscoverConfig {
            max_depth: 1, // root files only, no subdirectory descent
            ..Default::default()
        };
        let (files, _, _) = discover_catalog_files(dir.path(), &config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert!(
            !names.contains(&"seasonal.toml".to_string()),
            "seasonal.toml should be excluded at depth 1"
        );
    }

    /// Finding more files than `max_files` is not an error: exactly
    /// `max_files` entries come back, a warning says so, and the third
    /// tuple element still carries the raw count.
    #[test]
    fn test_max_files_truncates_gracefully() {
        let dir = make_temp_tree(); // creates 3 matching files
        let config = DiscoverConfig {
            max_files: 2,
            ..Default::default()
        };
        let (files, warnings, total_found) = discover_catalog_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 2, "should return exactly max_files entries");
        assert_eq!(
            total_found, 3,
            "total_found should count all 3 matching files"
        );
        assert!(
            !warnings.is_empty(),
            "a truncation warning must be emitted when files are dropped"
        );
        // The warning must cite both the raw count and the cap.
        let warning_text = warnings.join(" ");
        assert!(
            warning_text.contains('3') && warning_text.contains('2'),
            "warning should mention total and limit, got: {warning_text}"
        );
    }

    #[test]
    fn test_root_not_found() {
        let result = discover_catalog_files(
            Path::new("/nonexistent/path/vitrine"),
            &DiscoverConfig::default(),
        );
        assert!(matches!(result, Err(DiscoverError::RootNotFound { .. })));
    }

    #[test]
    fn test_root_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir.toml");
        fs::write(&file, STUB_CATALOG).unwrap();
        let result = discover_catalog_files(&file, &DiscoverConfig::default());
        assert!(matches!(result, Err(DiscoverError::NotADirectory { .. })));
    }

    #[test]
    fn test_file_metadata_collected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("meta.toml"), "hello world").unwrap();
        let (files, _, _) =
            discover_catalog_files(dir.path(), &DiscoverConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 11, "size should match 'hello world'");
        assert!(files[0].modified.is_some(), "modified time should be set");
    }
}
