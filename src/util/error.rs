// Vitrine - util/error.rs
//
// Hand-rolled error enums, one per subsystem. Each variant carries the
// context needed for a useful message (paths, limits, the offending
// value), and `source()` is implemented throughout so logging can walk
// the causal chain. The core layers never propagate bare strings.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Vitrine operations.
/// One variant per subsystem, so the variant alone names the failing layer.
#[derive(Debug)]
pub enum VitrineError {
    /// Catalogue loading or validation failed.
    Catalog(CatalogError),

    /// Folder import discovery failed.
    Discover(DiscoverError),

    /// A filter could not be built or applied.
    Filter(FilterError),

    /// An export write failed.
    Export(ExportError),

    /// config.toml could not be loaded or validated.
    Config(ConfigError),

    /// Plain I/O failure, tagged with the path and operation involved.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for VitrineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "Catalogue error: {e}"),
            Self::Discover(e) => write!(f, "Import error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export failed: {e}"),
            Self::Config(e) => write!(f, "Config error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "{operation} failed on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for VitrineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::Discover(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Failures while loading or validating a catalogue file.
#[derive(Debug)]
pub enum CatalogError {
    /// The file is not valid TOML.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalogue file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is missing or empty in the catalogue definition.
    MissingField {
        catalog_id: String,
        field: &'static str,
    },

    /// A text field in an item exceeds the maximum allowed length.
    FieldTooLong {
        catalog_id: String,
        item_id: u32,
        field: &'static str,
        length: usize,
        max_length: usize,
    },

    /// A catalogue declares more items than the per-catalogue cap.
    TooManyItems {
        catalog_id: String,
        count: usize,
        max: usize,
    },

    /// Duplicate catalogue ID detected (a user catalogue overriding a
    /// built-in is OK, but two user catalogues with the same ID is an error).
    DuplicateId {
        id: String,
        path1: PathBuf,
        path2: PathBuf,
    },

    /// Maximum number of catalogues exceeded.
    TooManyCatalogs { count: usize, max: usize },

    /// I/O error reading a catalogue file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "TOML parse failure in '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Catalogue '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { catalog_id, field } => {
                write!(
                    f,
                    "Catalogue '{catalog_id}': missing required field '{field}'"
                )
            }
            Self::FieldTooLong {
                catalog_id,
                item_id,
                field,
                length,
                max_length,
            } => write!(
                f,
                "Catalogue '{catalog_id}': item {item_id} field '{field}' is \
                 {length} chars, exceeds maximum of {max_length}"
            ),
            Self::TooManyItems {
                catalog_id,
                count,
                max,
            } => write!(
                f,
                "Catalogue '{catalog_id}' declares {count} items, maximum is {max}"
            ),
            Self::DuplicateId { id, path1, path2 } => write!(
                f,
                "Duplicate catalogue ID '{id}' in '{}' and '{}'",
                path1.display(),
                path2.display()
            ),
            Self::TooManyCatalogs { count, max } => {
                write!(f, "Too many catalogues loaded ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading catalogue '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for VitrineError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// DiscoverError
// ---------------------------------------------------------------------------

/// Errors raised when probing the root of a folder import.
/// Per-file failures below the root degrade to warnings instead.
#[derive(Debug)]
pub enum DiscoverError {
    /// The import root does not exist or is not accessible.
    RootNotFound { path: PathBuf },

    /// The import root is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the import root.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// The root metadata probe did not answer within the preflight timeout.
    Timeout { path: PathBuf, waited_secs: u64 },
}

impl fmt::Display for DiscoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Import path '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Import path '{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(f, "Access denied to '{}': {source}", path.display())
            }
            Self::Timeout { path, waited_secs } => write!(
                f,
                "Import path '{}' did not respond within {waited_secs} s. \
                 Network locations may be unreachable.",
                path.display()
            ),
        }
    }
}

impl std::error::Error for DiscoverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoverError> for VitrineError {
    fn from(e: DiscoverError) -> Self {
        Self::Discover(e)
    }
}

// ---------------------------------------------------------------------------
// FilterError
// ---------------------------------------------------------------------------

/// Failures while compiling a user filter.
#[derive(Debug)]
pub enum FilterError {
    /// The regex the user typed does not compile.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    /// User-provided regex exceeds the maximum allowed length.
    PatternTooLong { length: usize, max_length: usize },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Filter regex '{pattern}' does not compile: {source}")
            }
            Self::PatternTooLong { length, max_length } => write!(
                f,
                "Filter regex is {length} chars; the limit is {max_length}"
            ),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
            Self::PatternTooLong { .. } => None,
        }
    }
}

impl From<FilterError> for VitrineError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// ExportError
// ---------------------------------------------------------------------------

/// Failures while writing an export file.
#[derive(Debug)]
pub enum ExportError {
    /// Creating or writing the output file failed.
    Io { path: PathBuf, source: io::Error },

    /// The csv writer rejected a record.
    Csv { path: PathBuf, source: csv::Error },

    /// serde_json could not serialise the export payload.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot write export '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV failure in '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON failure in '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for VitrineError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Failures while loading config.toml.
#[derive(Debug)]
pub enum ConfigError {
    /// config.toml is not valid TOML.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A value in config.toml fell outside its allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// Reading config.toml failed at the I/O level.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Cannot parse config '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config key '{field}' = '{value}' rejected. Expected {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Cannot read config '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::TomlParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for VitrineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for Vitrine results.
pub type Result<T> = std::result::Result<T, VitrineError>;
