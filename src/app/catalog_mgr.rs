// Vitrine - app/catalog_mgr.rs
//
// Manages loading of catalogues from both built-in sources (embedded in
// the binary) and user TOML files on disk, plus installing imported
// catalogue files into the user directory.
// User catalogues override built-in catalogues with the same ID.

use crate::core::catalog;
use crate::core::discover::{discover_catalog_files, DiscoverConfig};
use crate::core::model::Catalog;
use crate::util::constants;
use crate::util::error::{CatalogError, VitrineError};
use std::path::Path;

/// Load all available catalogues: built-in first, then user overrides.
///
/// User catalogues with the same ID as a built-in replace the built-in
/// in place, keeping its display position. Invalid catalogues are
/// skipped and reported (non-fatal).
///
/// Returns the merged list and any non-fatal errors encountered.
pub fn load_all_catalogs(user_catalog_dir: Option<&Path>) -> (Vec<Catalog>, Vec<CatalogError>) {
    let mut catalogs = catalog::load_builtin_catalogs();
    let mut errors = Vec::new();

    tracing::info!(builtin_count = catalogs.len(), "Loaded built-in catalogues");

    // Load user catalogues if the directory exists
    if let Some(dir) = user_catalog_dir {
        if dir.is_dir() {
            let (user_catalogs, user_errors) = load_catalogs_from_dir(dir);
            errors.extend(user_errors);

            // Override built-in catalogues with matching user catalogues
            for user_catalog in user_catalogs {
                merge_catalog(&mut catalogs, user_catalog);
            }
        } else {
            tracing::debug!(
                dir = %dir.display(),
                "User catalogue directory does not exist (skipping)"
            );
        }
    }

    // Enforce maximum catalogue count
    if catalogs.len() > constants::MAX_CATALOGS {
        tracing::warn!(
            count = catalogs.len(),
            max = constants::MAX_CATALOGS,
            "Too many catalogues loaded, truncating"
        );
        errors.push(CatalogError::TooManyCatalogs {
            count: catalogs.len(),
            max: constants::MAX_CATALOGS,
        });
        catalogs.truncate(constants::MAX_CATALOGS);
    }

    tracing::info!(total = catalogs.len(), "Catalogue loading complete");

    (catalogs, errors)
}

/// Merge `incoming` into `catalogs`: replace in place when an existing
/// catalogue has the same ID (keeping its display position), append
/// otherwise.
pub fn merge_catalog(catalogs: &mut Vec<Catalog>, incoming: Catalog) {
    if let Some(pos) = catalogs.iter().position(|c| c.id == incoming.id) {
        tracing::info!(
            catalog_id = %incoming.id,
            "Catalogue overrides an existing entry"
        );
        catalogs[pos] = incoming;
    } else {
        tracing::info!(catalog_id = %incoming.id, "Loaded catalogue");
        catalogs.push(incoming);
    }
}

/// Load catalogues from a directory, in filename order so the merged
/// display order is stable across platforms.
pub fn load_catalogs_from_dir(dir: &Path) -> (Vec<Catalog>, Vec<CatalogError>) {
    let mut catalogs: Vec<Catalog> = Vec::new();
    let mut errors = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(CatalogError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return (catalogs, errors);
        }
    };

    let mut paths = Vec::new();
    for entry_result in entries {
        match entry_result {
            Ok(e) => paths.push(e.path()),
            Err(e) => {
                errors.push(CatalogError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
        }
    }
    paths.sort();

    for path in paths {
        // Only process .toml files
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }

        match load_catalog_file(&path) {
            Ok(parsed) => {
                // Two user catalogues with the same ID is an authoring
                // mistake; the first (filename order) wins.
                if let Some(existing) = catalogs.iter().find(|c| c.id == parsed.id) {
                    errors.push(CatalogError::DuplicateId {
                        id: parsed.id.clone(),
                        path1: existing.source.clone(),
                        path2: path.clone(),
                    });
                    continue;
                }
                catalogs.push(parsed);
            }
            Err(e) => errors.push(e),
        }
    }

    (catalogs, errors)
}

/// Read a catalogue file from disk, enforce the size cap, and validate it.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, CatalogError> {
    let metadata = std::fs::metadata(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_CATALOG_FILE_SIZE {
        return Err(CatalogError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_CATALOG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let path_buf = path.to_path_buf();
    catalog::parse_catalog_toml(&content, &path_buf)
        .and_then(|def| catalog::validate_and_build(def, &path_buf, false))
}

/// Validate a catalogue file and install it into the user directory.
///
/// The file is validated BEFORE copying so a broken pack never lands in
/// the user directory. An existing file with the same name is replaced.
/// Returns the validated catalogue (callers still reload to apply the
/// override/merge rules).
pub fn install_catalog(src: &Path, user_dir: &Path) -> Result<Catalog, VitrineError> {
    let parsed = load_catalog_file(src)?;

    std::fs::create_dir_all(user_dir).map_err(|e| VitrineError::Io {
        path: user_dir.to_path_buf(),
        operation: "create catalogue directory",
        source: e,
    })?;

    let file_name = src.file_name().unwrap_or_else(|| "catalog.toml".as_ref());
    let dest = user_dir.join(file_name);
    std::fs::copy(src, &dest).map_err(|e| VitrineError::Io {
        path: dest.clone(),
        operation: "install catalogue",
        source: e,
    })?;

    tracing::info!(
        catalog_id = %parsed.id,
        dest = %dest.display(),
        "Catalogue installed"
    );

    Ok(parsed)
}

/// Walk `root` for catalogue files and install every valid one.
///
/// Per-file validation failures become warnings; only an unusable root
/// is an error. Returns the number of catalogues installed plus the
/// accumulated warnings (traversal warnings and per-file failures).
pub fn import_folder(
    root: &Path,
    user_dir: &Path,
    config: &DiscoverConfig,
) -> Result<(usize, Vec<String>), VitrineError> {
    let (candidates, mut warnings, total_found) = discover_catalog_files(root, config)?;

    tracing::info!(
        root = %root.display(),
        candidates = candidates.len(),
        total_found,
        "Folder import starting"
    );

    let mut installed = 0;
    for candidate in &candidates {
        match install_catalog(&candidate.path, user_dir) {
            Ok(_) => installed += 1,
            Err(e) => warnings.push(format!(
                "Skipped '{}': {e}",
                candidate.path.display()
            )),
        }
    }

    tracing::info!(installed, warnings = warnings.len(), "Folder import complete");

    Ok((installed, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CITY_PACK: &str = r#"
[catalog]
id = "city-pack"
name = "City Pack"

[[items]]
id = 1
category = "Cities"
name = "Lisbon"
summary = "The city of seven hills"
"#;

    const OVERRIDE_SAMPLE: &str = r#"
[catalog]
id = "sample-gallery"
name = "Replaced Sample"

[[items]]
id = 1
category = "Nature"
name = "Aurora"
"#;

    #[test]
    fn test_load_builtins_only() {
        let (catalogs, errors) = load_all_catalogs(None);
        assert!(!catalogs.is_empty());
        assert!(catalogs.iter().all(|c| c.builtin));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_missing_user_dir_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let (catalogs, errors) = load_all_catalogs(Some(&missing));
        assert!(catalogs.iter().all(|c| c.builtin));
        assert!(errors.is_empty());
    }

    /// A user catalogue with a built-in's id replaces it in place.
    #[test]
    fn test_user_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mine.toml"), OVERRIDE_SAMPLE).unwrap();

        let (catalogs, errors) = load_all_catalogs(Some(dir.path()));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");

        let sample = catalogs.iter().find(|c| c.id == "sample-gallery").unwrap();
        assert_eq!(sample.name, "Replaced Sample");
        assert!(!sample.builtin);
        assert_eq!(sample.items.len(), 1);
        // Position preserved: the override sits where the built-in was.
        assert_eq!(catalogs[0].id, "sample-gallery");
    }

    #[test]
    fn test_distinct_user_catalog_appended() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cities.toml"), CITY_PACK).unwrap();

        let (catalogs, errors) = load_all_catalogs(Some(dir.path()));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");

        let pack = catalogs.iter().find(|c| c.id == "city-pack").unwrap();
        assert!(!pack.builtin);
        // Appended after the built-ins.
        assert_eq!(catalogs.last().unwrap().id, "city-pack");
    }

    #[test]
    fn test_invalid_user_file_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.toml"), "not [valid").unwrap();
        fs::write(dir.path().join("cities.toml"), CITY_PACK).unwrap();

        let (catalogs, errors) = load_all_catalogs(Some(dir.path()));
        assert!(catalogs.iter().any(|c| c.id == "city-pack"));
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], CatalogError::TomlParse { .. }));
    }

    #[test]
    fn test_oversize_user_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let big = "#".repeat(constants::MAX_CATALOG_FILE_SIZE as usize + 1);
        fs::write(dir.path().join("big.toml"), big).unwrap();

        let (_, errors) = load_all_catalogs(Some(dir.path()));
        assert!(errors
            .iter()
            .any(|e| matches!(e, CatalogError::FileTooLarge { .. })));
    }

    /// First file (in name order) wins; the duplicate is reported.
    #[test]
    fn test_duplicate_user_ids_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_cities.toml"), CITY_PACK).unwrap();
        fs::write(dir.path().join("b_cities.toml"), CITY_PACK).unwrap();

        let (catalogs, errors) = load_all_catalogs(Some(dir.path()));
        let packs = catalogs.iter().filter(|c| c.id == "city-pack").count();
        assert_eq!(packs, 1);
        assert!(errors
            .iter()
            .any(|e| matches!(e, CatalogError::DuplicateId { .. })));
    }

    /// More catalogues than the cap: the list is truncated and the
    /// overflow is reported.
    #[test]
    fn test_catalog_cap_enforced() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..constants::MAX_CATALOGS {
            let pack = format!(
                "[catalog]\nid = \"pack-{i:03}\"\nname = \"Pack {i}\"\n\n\
                 [[items]]\nid = 1\ncategory = \"Misc\"\nname = \"Entry\"\n"
            );
            fs::write(dir.path().join(format!("pack_{i:03}.toml")), pack).unwrap();
        }

        let (catalogs, errors) = load_all_catalogs(Some(dir.path()));
        assert_eq!(catalogs.len(), constants::MAX_CATALOGS);
        assert!(errors
            .iter()
            .any(|e| matches!(e, CatalogError::TooManyCatalogs { .. })));
    }

    #[test]
    fn test_install_catalog_copies_file() {
        let src_dir = tempfile::tempdir().unwrap();
        let user_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("cities.toml");
        fs::write(&src, CITY_PACK).unwrap();

        let catalog = install_catalog(&src, user_dir.path()).unwrap();
        assert_eq!(catalog.id, "city-pack");
        assert!(user_dir.path().join("cities.toml").is_file());
    }

    /// A broken pack is rejected before anything is written.
    #[test]
    fn test_install_rejects_invalid_without_copying() {
        let src_dir = tempfile::tempdir().unwrap();
        let user_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("broken.toml");
        fs::write(&src, "not [valid").unwrap();

        let result = install_catalog(&src, user_dir.path());
        assert!(result.is_err());
        assert!(!user_dir.path().join("broken.toml").exists());
    }

    #[test]
    fn test_import_folder_installs_valid_warns_invalid() {
        let src_dir = tempfile::tempdir().unwrap();
        let user_dir = tempfile::tempdir().unwrap();
        fs::write(src_dir.path().join("cities.toml"), CITY_PACK).unwrap();
        fs::write(src_dir.path().join("broken.toml"), "not [valid").unwrap();

        let (installed, warnings) =
            import_folder(src_dir.path(), user_dir.path(), &DiscoverConfig::default()).unwrap();

        assert_eq!(installed, 1);
        assert!(user_dir.path().join("cities.toml").is_file());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("broken.toml"));
    }

    #[test]
    fn test_import_folder_bad_root() {
        let user_dir = tempfile::tempdir().unwrap();
        let result = import_folder(
            Path::new("/nonexistent/import/root"),
            user_dir.path(),
            &DiscoverConfig::default(),
        );
        assert!(matches!(result, Err(VitrineError::Discover(_))));
    }
}
