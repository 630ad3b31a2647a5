// Vitrine - util/constants.rs
//
// Every limit, default, and magic number in one place.

// =============================================================================
// Identity
// =============================================================================

/// Name shown in the title bar and logs.
pub const APP_NAME: &str = "Vitrine";

/// Identifier the platform config/data directories are keyed on.
pub const APP_ID: &str = "Vitrine";

/// Version string straight from Cargo.toml.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Catalogue limits
// =============================================================================

/// Maximum number of catalogues that can be loaded (built-in + user).
pub const MAX_CATALOGS: usize = 64;

/// Maximum size of a catalogue TOML file in bytes.
pub const MAX_CATALOG_FILE_SIZE: u64 = 256 * 1024; // 256 KB

/// Maximum number of items accepted from a single catalogue.
pub const MAX_ITEMS_PER_CATALOG: usize = 10_000;

/// Maximum length of any single text field in a catalogue item.
/// Longer values are rejected at validation so a malformed pack cannot
/// balloon memory or wreck the card layout.
pub const MAX_ITEM_FIELD_LENGTH: usize = 4_096;

// =============================================================================
// Import discovery limits
// =============================================================================

/// Maximum directory recursion depth during folder import.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Hard upper bound on max depth (prevents runaway traversal).
pub const ABSOLUTE_MAX_DEPTH: usize = 32;

/// Floor for the max-files limit; zero would import nothing.
pub const MIN_MAX_FILES: usize = 1;

/// Maximum number of candidate files collected in a single folder import.
pub const DEFAULT_MAX_FILES: usize = 200;

/// Ceiling on max_files that no configuration can exceed.
pub const ABSOLUTE_MAX_FILES: usize = 2_000;

/// Seconds the import preflight waits for root metadata before declaring the
/// path unreachable. Network mounts can stall far longer than local disks.
pub const PREFLIGHT_TIMEOUT_SECS: u64 = 10;

/// Default include glob patterns for catalogue file discovery.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.toml"];

/// Default exclude glob patterns for catalogue file discovery.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "*.bak",
    "*.tmp",
    "node_modules",
    ".git",
    "target",
];

// =============================================================================
// Filtering
// =============================================================================

/// Length cap on the filter regex input.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 1_024;

/// Maximum number of non-fatal warnings accumulated in the UI list.
/// Prevents the warnings Vec from growing without bound when a folder
/// import encounters many unreadable or unparsable files.
pub const MAX_WARNINGS: usize = 200;

// =============================================================================
// Window and font defaults
// =============================================================================

/// Default window width in points.
pub const DEFAULT_WINDOW_WIDTH: f32 = 1_100.0;

/// Default window height in points.
pub const DEFAULT_WINDOW_HEIGHT: f32 = 760.0;

/// Minimum user-configurable window width (points).
pub const MIN_WINDOW_WIDTH: f32 = 640.0;

/// Maximum user-configurable window width (points).
pub const MAX_WINDOW_WIDTH: f32 = 7_680.0;

/// Minimum user-configurable window height (points).
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// Maximum user-configurable window height (points).
pub const MAX_WINDOW_HEIGHT: f32 = 4_320.0;

/// Body font size when config.toml does not say otherwise.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Lower end of the configurable font size range (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Upper end of the configurable font size range (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// File and directory names
// =============================================================================

/// File name of the optional user config.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session file name, kept under the platform data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// User catalogues subdirectory name.
pub const CATALOGS_DIR_NAME: &str = "catalogs";
