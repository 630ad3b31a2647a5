// Vitrine - platform/config.rs
//
// Where Vitrine keeps its files on each OS, plus config.toml loading
// with validation at startup.
//
// The `directories` crate supplies the native location per platform:
// XDG on Linux, AppData on Windows, Library on macOS.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Vitrine data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/vitrine/ or %APPDATA%\Vitrine\)
    pub config_dir: PathBuf,

    /// User catalogue directory (e.g. ~/.config/vitrine/catalogs/)
    pub user_catalogs_dir: PathBuf,

    /// Data directory for the session file, logs, caches, etc.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Work out where this platform keeps Vitrine's files.
    ///
    /// When the platform dirs API yields nothing, everything lands in
    /// the current directory instead.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            // Catalogues live one level above config/ so the user-visible path
            // is %APPDATA%\Vitrine\catalogs\ rather than the deeper
            // %APPDATA%\Vitrine\config\catalogs\.
            let user_catalogs_dir = config_dir
                .parent()
                .unwrap_or(&config_dir)
                .join(constants::CATALOGS_DIR_NAME);
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                catalogs = %user_catalogs_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                user_catalogs_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                user_catalogs_dir: fallback.join(constants::CATALOGS_DIR_NAME),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// The shape `config.toml` deserialises into, before validation.
///
/// Every section and key is optional, and unrecognised keys are ignored,
/// so a config written for a newer build still loads in an older one.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub window: WindowSection,
    pub ui: UiSection,
    pub catalogs: CatalogsSection,
    pub import: ImportSection,
    pub logging: LoggingSection,
}

/// Keys under `[window]`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct WindowSection {
    /// Initial window width in points.
    pub width: Option<f32>,
    /// Initial window height in points.
    pub height: Option<f32>,
}

/// Keys under `[ui]`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// "dark" or "light".
    pub theme: Option<String>,
    /// Point size for body text.
    pub font_size: Option<f32>,
}

/// Keys under `[catalogs]`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogsSection {
    /// Additional catalogue directory (overrides the platform default).
    pub user_catalog_directory: Option<String>,
}

/// Keys under `[import]`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// Maximum directory recursion depth for folder imports.
    pub max_depth: Option<usize>,
    /// Maximum files to collect per folder import.
    pub max_files: Option<usize>,
    /// Globs a filename must match to be imported.
    pub include_patterns: Option<Vec<String>>,
    /// Globs that disqualify a file or prune a directory.
    pub exclude_patterns: Option<Vec<String>>,
}

/// Keys under `[logging]`.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// One of "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Application configuration after validation.
///
/// Each field was checked against the ranges in `util::constants`; a bad
/// value never aborts startup, it becomes a warning and the default applies.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // [window]
    /// Initial window width in points.
    pub window_width: f32,
    /// Initial window height in points.
    pub window_height: f32,

    // [ui]
    /// True for the dark palette, false for light.
    pub dark_mode: bool,
    /// Point size for body text.
    pub font_size: f32,

    // [catalogs]
    /// Overridden user catalogue directory, if configured.
    pub user_catalog_directory: Option<PathBuf>,

    // [import]
    /// Maximum directory recursion depth for folder imports.
    pub max_depth: usize,
    /// Maximum files to collect per folder import.
    pub max_files: usize,
    /// Globs a filename must match to be imported.
    pub include_patterns: Vec<String>,
    /// Globs that disqualify a file or prune a directory.
    pub exclude_patterns: Vec<String>,

    // [logging]
    /// Level string handed to the tracing init.
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: constants::DEFAULT_WINDOW_WIDTH,
            window_height: constants::DEFAULT_WINDOW_HEIGHT,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            user_catalog_directory: None,
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
            log_level: None,
        }
    }
}

/// Read and parse config.toml, mapping either failure mode to the
/// warning string the caller pushes.
fn read_raw_config(config_path: &Path) -> Result<RawConfig, String> {
    let content = std::fs::read_to_string(config_path).map_err(|e| {
        format!(
            "Could not read config file '{}': {e}. Using defaults.",
            config_path.display()
        )
    })?;
    toml::from_str(&content).map_err(|e| {
        format!(
            "Failed to parse config file '{}': {e}. Using defaults. \
             See config.example.toml for the expected format.",
            config_path.display()
        )
    })
}

/// Read `config.toml` (resolved relative to `config_dir`) and validate it.
///
/// The result is always usable: a validated `AppConfig` plus any non-fatal
/// warnings collected along the way. A missing file is the normal first-run
/// case (defaults, zero warnings); an unparseable file still starts the
/// application on defaults, with the parse failure surfaced as a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir
        .parent()
        .unwrap_or(config_dir)
        .join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "config.toml absent; defaults apply");
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw_config(&config_path) {
        Ok(r) => r,
        Err(msg) => {
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Field-by-field validation; every bad value is reported, not just
    // the first one hit.
    let mut config = AppConfig::default();

    // [window] width
    if let Some(width) = raw.window.width {
        if (constants::MIN_WINDOW_WIDTH..=constants::MAX_WINDOW_WIDTH).contains(&width) {
            config.window_width = width;
        } else {
            warnings.push(format!(
                "[window] width = {width} is outside {}..{}. Using default ({}).",
                constants::MIN_WINDOW_WIDTH,
                constants::MAX_WINDOW_WIDTH,
                constants::DEFAULT_WINDOW_WIDTH,
            ));
        }
    }

    // [window] height
    if let Some(height) = raw.window.height {
        if (constants::MIN_WINDOW_HEIGHT..=constants::MAX_WINDOW_HEIGHT).contains(&height) {
            config.window_height = height;
        } else {
            warnings.push(format!(
                "[window] height = {height} is outside {}..{}. Using default ({}).",
                constants::MIN_WINDOW_HEIGHT,
                constants::MAX_WINDOW_HEIGHT,
                constants::DEFAULT_WINDOW_HEIGHT,
            ));
        }
    }

    // [ui] theme
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is neither \"dark\" nor \"light\". Using default (dark).",
                ));
            }
        }
    }

    // [ui] font_size
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is outside {}..{}. Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // [catalogs] user_catalog_directory
    if let Some(ref dir) = raw.catalogs.user_catalog_directory {
        if !dir.is_empty() {
            config.user_catalog_directory = Some(PathBuf::from(dir));
        }
    }

    // [import] max_depth
    if let Some(depth) = raw.import.max_depth {
        if (1..=constants::ABSOLUTE_MAX_DEPTH).contains(&depth) {
            config.max_depth = depth;
        } else {
            warnings.push(format!(
                "[import] max_depth = {depth} is outside 1..{}. Using default ({}).",
                constants::ABSOLUTE_MAX_DEPTH,
                constants::DEFAULT_MAX_DEPTH,
            ));
        }
    }

    // [import] max_files
    if let Some(files) = raw.import.max_files {
        if (constants::MIN_MAX_FILES..=constants::ABSOLUTE_MAX_FILES).contains(&files) {
            config.max_files = files;
        } else {
            warnings.push(format!(
                "[import] max_files = {files} is outside {}..{}. Using default ({}).",
                constants::MIN_MAX_FILES,
                constants::ABSOLUTE_MAX_FILES,
                constants::DEFAULT_MAX_FILES,
            ));
        }
    }

    // [import] include_patterns
    if let Some(patterns) = raw.import.include_patterns {
        if patterns.is_empty() {
            warnings.push(
                "[import] include_patterns is empty; a folder import would match nothing. \
                 Using defaults."
                    .to_string(),
            );
        } else {
            config.include_patterns = patterns;
        }
    }

    // [import] exclude_patterns
    if let Some(patterns) = raw.import.exclude_patterns {
        config.exclude_patterns = patterns;
    }

    // [logging] level
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not one of error, warn, info, \
                 debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "config.toml validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Write a config.toml next to a fake config dir the way the loader
    /// resolves it (one level above config_dir).
    fn write_config(root: &Path, content: &str) -> PathBuf {
        let config_dir = root.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(root.join(constants::CONFIG_FILE_NAME), content).unwrap();
        config_dir
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("config");
        fs::create_dir_all(&config_dir).unwrap();

        let (config, warnings) = load_config(&config_dir);
        assert!(warnings.is_empty());
        assert_eq!(config.window_width, constants::DEFAULT_WINDOW_WIDTH);
        assert_eq!(config.max_files, constants::DEFAULT_MAX_FILES);
        assert!(config.dark_mode);
    }

    #[test]
    fn test_valid_values_applied() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = write_config(
            dir.path(),
            r#"
[window]
width = 1280.0
height = 800.0

[ui]
theme = "light"
font_size = 16.0

[import]
max_depth = 4
max_files = 50

[logging]
level = "debug"
"#,
        );

        let (config, warnings) = load_config(&config_dir);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.window_width, 1280.0);
        assert_eq!(config.window_height, 800.0);
        assert!(!config.dark_mode);
        assert_eq!(config.font_size, 16.0);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_files, 50);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    /// Out-of-range values warn and fall back without failing the load.
    #[test]
    fn test_out_of_range_values_warn_and_default() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = write_config(
            dir.path(),
            r#"
[window]
width = 10.0

[ui]
font_size = 900.0

[import]
max_depth = 9999
"#,
        );

        let (config, warnings) = load_config(&config_dir);
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.window_width, constants::DEFAULT_WINDOW_WIDTH);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
        assert_eq!(config.max_depth, constants::DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_unparseable_config_warns_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = write_config(dir.path(), "not [valid toml");

        let (config, warnings) = load_config(&config_dir);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Failed to parse"));
        assert_eq!(config.max_files, constants::DEFAULT_MAX_FILES);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = write_config(
            dir.path(),
            r#"
[window]
width = 1280.0
some_future_knob = true

[brand_new_section]
value = 1
"#,
        );

        let (config, warnings) = load_config(&config_dir);
        assert!(warnings.is_empty());
        assert_eq!(config.window_width, 1280.0);
    }

    #[test]
    fn test_empty_include_patterns_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = write_config(
            dir.path(),
            r#"
[import]
include_patterns = []
"#,
        );

        let (config, warnings) = load_config(&config_dir);
        assert_eq!(warnings.len(), 1);
        assert!(!config.include_patterns.is_empty());
    }

    #[test]
    fn test_user_catalog_directory_override() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = write_config(
            dir.path(),
            r#"
[catalogs]
user_catalog_directory = "/srv/vitrine/packs"
"#,
        );

        let (config, warnings) = load_config(&config_dir);
        assert!(warnings.is_empty());
        assert_eq!(
            config.user_catalog_directory,
            Some(PathBuf::from("/srv/vitrine/packs"))
        );
    }
}
