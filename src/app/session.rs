// Vitrine - app/session.rs
//
// Session persistence: save and restore the onboarding flag, filter
// state, and last import location between application restarts.
//
// Ground rules:
// - Writes go to a sibling temp file and are renamed into place, so an
//   interrupted save can never clobber the last good snapshot.
// - Anything wrong at load time (missing file, bad JSON, stale version)
//   silently yields a fresh start; the user never sees a session error.
// - The first save creates the data directory itself.
// - The selection is NOT persisted — every launch starts on the list
//   view, and catalogues are re-loaded from disk so the collection
//   always reflects current pack content.

use crate::core::filter::FilterState;
use crate::util::constants::SESSION_FILE_NAME;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bump whenever `SessionData` changes shape incompatibly; a file
/// carrying any other number is discarded at load.
pub const SESSION_VERSION: u32 = 1;

// =============================================================================
// Persisted shapes
// =============================================================================

/// Everything Vitrine remembers between launches.
///
/// Individual fields all carry serde defaults, so adding a field later
/// does not invalidate old files; only structural breaks need a version
/// bump.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema stamp, checked against `SESSION_VERSION` at load.
    pub version: u32,

    /// Whether the welcome screen has been dismissed. Once true the app
    /// opens straight on the gallery.
    #[serde(default)]
    pub onboarding_complete: bool,

    /// The serialisable subset of the live filter state.
    #[serde(default)]
    pub filter: PersistedFilter,

    /// Directory last used for `File > Import Folder…`, restored as the
    /// starting point of the next import dialog.
    #[serde(default)]
    pub last_import_root: Option<PathBuf>,

    /// When this snapshot was written (informational only).
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

/// The on-disk shape of a filter.
///
/// Only the user-visible, stable fields are persisted. The compiled
/// regex is excluded and re-derived from `regex_pattern` on restore.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedFilter {
    /// Active category whitelist. Empty = all categories shown.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Active catalogue whitelist. Empty = all catalogues shown.
    #[serde(default)]
    pub catalog_ids: Vec<String>,

    /// Text search term.
    #[serde(default)]
    pub text_search: String,

    /// Raw regex pattern string. Re-compiled on restore.
    #[serde(default)]
    pub regex_pattern: String,
}

impl PersistedFilter {
    /// Capture the persistable subset of a live filter state.
    ///
    /// Set fields are sorted so the session file is byte-stable across
    /// saves of the same state.
    pub fn capture(state: &FilterState) -> Self {
        let mut categories: Vec<String> = state.categories.iter().cloned().collect();
        categories.sort();
        let mut catalog_ids: Vec<String> = state.catalog_ids.iter().cloned().collect();
        catalog_ids.sort();

        Self {
            categories,
            catalog_ids,
            text_search: state.text_search.clone(),
            regex_pattern: state
                .regex_search
                .as_ref()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    /// Rebuild a live filter state from this snapshot.
    ///
    /// A regex pattern that no longer compiles (edited file, tightened
    /// limits) is dropped with a warning rather than failing the restore.
    pub fn restore(&self) -> FilterState {
        let mut state = FilterState {
            categories: self.categories.iter().cloned().collect(),
            catalog_ids: self.catalog_ids.iter().cloned().collect(),
            text_search: self.text_search.clone(),
            regex_search: None,
        };

        if !self.regex_pattern.is_empty() {
            if let Err(e) = state.set_regex(&self.regex_pattern) {
                tracing::warn!(
                    pattern = %self.regex_pattern,
                    error = %e,
                    "Persisted regex no longer compiles — dropping it"
                );
            }
        }

        state
    }
}

// =============================================================================
// Save / load
// =============================================================================

/// Where the session snapshot lives under the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path`, temp-file-then-rename.
///
/// Parent directories are created as needed. The error is a plain string
/// for the caller's warn! line; no more structure is warranted since the
/// caller always logs it and moves on.
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    // The data directory may not exist yet on a first save.
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create '{}': {e}", parent.display()))?;
    }

    let json =
        serde_json::to_string_pretty(data).map_err(|e| format!("session not serialisable: {e}"))?;

    // The new snapshot lands beside the target and is renamed into
    // place. An interruption can lose the new snapshot, never the old
    // one (rename is atomic on every supported platform).
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("cannot write '{}': {e}", tmp.display()))?;
    std::fs::rename(&tmp, path).map_err(|e| {
        // A failed rename leaves the temp file behind; remove it quietly.
        let _ = std::fs::remove_file(&tmp);
        format!("cannot replace '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Read a `SessionData` back from `path`.
///
/// Any problem (no file, unparsable JSON, version mismatch) comes back
/// as `None`, which callers treat as a first run.
pub fn load(path: &Path) -> Option<SessionData> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            // A missing file is the normal first run; only other errors
            // rate a log line.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
            return None;
        }
    };

    let data: SessionData = match serde_json::from_str(&content) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed — starting fresh"
            );
            return None;
        }
    };

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Unknown session version, ignoring the file"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session loaded");
    Some(data)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_data() -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            onboarding_complete: true,
            filter: PersistedFilter {
                categories: vec!["Cities".to_string(), "Nature".to_string()],
                catalog_ids: vec!["sample-gallery".to_string()],
                text_search: "paris".to_string(),
                regex_pattern: "^The".to_string(),
            },
            last_import_root: Some(PathBuf::from("/tmp/packs")),
            saved_at: Utc::now(),
        }
    }

    /// Every field survives a save/load cycle.
    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let original = sample_data();

        save(&original, &path).expect("session save");
        let loaded = load(&path).expect("session load");

        assert_eq!(loaded.version, SESSION_VERSION);
        assert!(loaded.onboarding_complete);
        assert_eq!(loaded.filter.categories, vec!["Cities", "Nature"]);
        assert_eq!(loaded.filter.catalog_ids, vec!["sample-gallery"]);
        assert_eq!(loaded.filter.text_search, "paris");
        assert_eq!(loaded.filter.regex_pattern, "^The");
        assert_eq!(loaded.last_import_root, original.last_import_root);
    }

    /// First run: no file yet, load yields None.
    #[test]
    fn test_session_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonexistent.json");
        assert!(load(&path).is_none());
    }

    /// Garbage JSON yields None, never a panic.
    #[test]
    fn test_session_load_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_none());
    }

    /// An unknown version stamp is rejected.
    #[test]
    fn test_session_load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut data = sample_data();
        data.version = 99;
        save(&data, &path).unwrap();
        // save() does not validate the version; only load() checks it.
        assert!(load(&path).is_none());
    }

    /// A leftover temp file from an interrupted save is harmless.
    #[test]
    fn test_session_save_atomic_does_not_corrupt_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        // Start from a good snapshot on disk.
        let original = sample_data();
        save(&original, &path).unwrap();

        // Plant a stale temp file as an interrupted save would leave it.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, b"garbage").unwrap();

        // A fresh save must plough straight through the stale temp file.
        let mut updated = sample_data();
        updated.filter.text_search = "tokyo".to_string();
        save(&updated, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.filter.text_search, "tokyo");
    }

    /// Capture sorts set fields so repeated saves are byte-stable.
    #[test]
    fn test_persisted_filter_capture_restore_round_trip() {
        let mut live = FilterState::default();
        live.categories.insert("Nature".to_string());
        live.categories.insert("Animals".to_string());
        live.text_search = "lion".to_string();
        live.set_regex("king").unwrap();

        let snapshot = PersistedFilter::capture(&live);
        assert_eq!(snapshot.categories, vec!["Animals", "Nature"]);
        assert_eq!(snapshot.regex_pattern, "king");

        let restored = snapshot.restore();
        assert!(restored.categories.contains("Animals"));
        assert!(restored.categories.contains("Nature"));
        assert_eq!(restored.text_search, "lion");
        assert!(restored.regex_search.is_some());
    }

    /// A persisted pattern that fails to compile is dropped, not fatal.
    #[test]
    fn test_restore_drops_bad_regex() {
        let snapshot = PersistedFilter {
            regex_pattern: "([unclosed".to_string(),
            ..Default::default()
        };
        let restored = snapshot.restore();
        assert!(restored.regex_search.is_none());
    }
}
