// Vitrine - core/catalog.rs
//
// Catalogue loading and validation.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::catalog_mgr which feeds content here.

use crate::core::model::{Catalog, GalleryItem};
use crate::util::constants;
use crate::util::error::CatalogError;
use serde::Deserialize;
use std::path::PathBuf;

// =============================================================================
// Raw TOML shapes
// =============================================================================

/// Raw TOML catalogue definition as deserialized from a .toml file.
/// This is validated and built into a `Catalog` for runtime use.
#[derive(Debug, Deserialize)]
pub struct CatalogDefinition {
    pub catalog: CatalogMeta,
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogMeta {
    /// Stable identifier; a user pack with the same id overrides a built-in.
    pub id: String,
    /// Title shown in the sidebar catalogue list.
    pub name: String,
    /// Free-form revision string for the pack.
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

fn default_version() -> String {
    String::from("1.0")
}

#[derive(Debug, Deserialize)]
pub struct ItemDefinition {
    pub id: u32,
    pub category: String,
    /// Art key naming the item's visual. Defaults to a slug of the name.
    #[serde(default)]
    pub art: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Catalogue validation
// =============================================================================

/// Parse a TOML string into a `CatalogDefinition`.
///
/// `source_path` only ever appears in error messages; no I/O happens here.
pub fn parse_catalog_toml(
    toml_content: &str,
    source_path: &PathBuf,
) -> Result<CatalogDefinition, CatalogError> {
    toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
        path: source_path.clone(),
        source: e,
    })
}

/// Validate a `CatalogDefinition` and build it into a runtime `Catalog`.
///
/// Validates:
/// - Required fields are present and non-empty
/// - Item count is within the per-catalogue cap
/// - Item text fields are within length limits
///
/// Item ids are deliberately NOT checked for uniqueness: the same id
/// appearing under several categories is valid catalogue content and
/// every occurrence must survive as a distinct entry.
///
/// Returns a `Catalog` whose items are stamped with the catalogue id.
pub fn validate_and_build(
    def: CatalogDefinition,
    source_path: &PathBuf,
    builtin: bool,
) -> Result<Catalog, CatalogError> {
    let id = &def.catalog.id;

    // Required catalogue fields must be present and non-empty.
    if id.is_empty() {
        return Err(CatalogError::MissingField {
            catalog_id: "(empty)".to_string(),
            field: "catalog.id",
        });
    }
    if def.catalog.name.is_empty() {
        return Err(CatalogError::MissingField {
            catalog_id: id.clone(),
            field: "catalog.name",
        });
    }

    if def.items.len() > constants::MAX_ITEMS_PER_CATALOG {
        return Err(CatalogError::TooManyItems {
            catalog_id: id.clone(),
            count: def.items.len(),
            max: constants::MAX_ITEMS_PER_CATALOG,
        });
    }

    let mut items = Vec::with_capacity(def.items.len());
    for item in def.items {
        if item.name.is_empty() {
            return Err(CatalogError::MissingField {
                catalog_id: id.clone(),
                field: "items.name",
            });
        }
        if item.category.is_empty() {
            return Err(CatalogError::MissingField {
                catalog_id: id.clone(),
                field: "items.category",
            });
        }

        check_field_length(id, item.id, "category", &item.category)?;
        check_field_length(id, item.id, "art", &item.art)?;
        check_field_length(id, item.id, "name", &item.name)?;
        check_field_length(id, item.id, "summary", &item.summary)?;
        check_field_length(id, item.id, "description", &item.description)?;

        let art = if item.art.is_empty() {
            slug(&item.name)
        } else {
            item.art
        };

        items.push(GalleryItem {
            id: item.id,
            category: item.category,
            art,
            name: item.name,
            summary: item.summary,
            description: item.description,
            catalog_id: id.clone(),
        });
    }

    tracing::debug!(
        catalog_id = %id,
        items = items.len(),
        source = %source_path.display(),
        "Catalogue validated"
    );

    Ok(Catalog {
        id: id.clone(),
        name: def.catalog.name,
        version: def.catalog.version,
        description: def.catalog.description,
        items,
        builtin,
        source: source_path.clone(),
    })
}

/// Rejects a text field that exceeds the per-field length cap.
fn check_field_length(
    catalog_id: &str,
    item_id: u32,
    field: &'static str,
    value: &str,
) -> Result<(), CatalogError> {
    if value.len() > constants::MAX_ITEM_FIELD_LENGTH {
        return Err(CatalogError::FieldTooLong {
            catalog_id: catalog_id.to_string(),
            item_id,
            field,
            length: value.len(),
            max_length: constants::MAX_ITEM_FIELD_LENGTH,
        });
    }
    Ok(())
}

/// Derives a default art key from an item name: lowercased, alphanumerics
/// kept, runs of anything else collapsed to single hyphens.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_hyphen = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

// =============================================================================
// Built-in catalogues (embedded at compile time)
// =============================================================================

/// Embedded TOML content for built-in catalogues.
/// Tuples of (filename, TOML text).
pub fn builtin_catalog_sources() -> Vec<(&'static str, &'static str)> {
    vec![(
        "sample_gallery.toml",
        include_str!("../../catalogs/sample_gallery.toml"),
    )]
}

/// Load and validate all built-in catalogues.
///
/// Invalid catalogues are logged as errors and skipped (non-fatal).
/// Returns the successfully loaded catalogues.
pub fn load_builtin_catalogs() -> Vec<Catalog> {
    let mut catalogs = Vec::new();

    for (filename, content) in builtin_catalog_sources() {
        let path = PathBuf::from(format!("<builtin>/{filename}"));
        match parse_catalog_toml(content, &path).and_then(|def| validate_and_build(def, &path, true))
        {
            Ok(catalog) => {
                tracing::debug!(catalog_id = %catalog.id, "Loaded built-in catalogue");
                catalogs.push(catalog);
            }
            Err(e) => {
                // A broken built-in is a packaging bug, but degrade gracefully
                tracing::error!(file = filename, error = %e, "Failed to load built-in catalogue");
            }
        }
    }

    catalogs
}

// =============================================================================
// Tests
// =============================================================================
