// Vitrine - core/export.rs
//
// CSV and JSON export of the currently visible gallery items.
// Everything writes through `io::Write`, so tests capture output in memory.

use crate::core::model::GalleryItem;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::PathBuf;

/// Export items to CSV format, in the order given (grouped display order).
///
/// Writes: id, category, art, name, summary, description, catalogue
pub fn export_csv<W: Write>(
    items: &[&GalleryItem],
    writer: W,
    export_path: &PathBuf,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // Column header row
    csv_writer
        .write_record([
            "id",
            "category",
            "art",
            "name",
            "summary",
            "description",
            "catalogue",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.clone(),
            source: e,
        })?;

    let mut count = 0;
    for item in items {
        csv_writer
            .write_record([
                &item.id.to_string(),
                &item.category,
                &item.art,
                &item.name,
                &item.summary,
                &item.description,
                &item.catalog_id,
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.clone(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.clone(),
        source: e,
    })?;

    Ok(count)
}

/// Export items to JSON format (array of objects), in the order given.
pub fn export_json<W: Write>(
    items: &[&GalleryItem],
    writer: W,
    export_path: &PathBuf,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, &items).map_err(|e| ExportError::Json {
        path: export_path.clone(),
        source: e,
    })?;
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: u32, category: &str, name: &str) -> GalleryItem {
        GalleryItem {
            id,
            category: category.to_string(),
            art: name.to_lowercase(),
            name: name.to_string(),
            summary: format!("{name} summary"),
            description: format!("A detailed description of {name}."),
            catalog_id: "sample-gallery".to_string(),
        }
    }

    #[test]
    fn test_csv_export() {
        let a = make_item(5, "Cities", "Paris");
        let b = make_item(7, "Animals", "Lion");
        let items = vec![&a, &b];

        let mut buf = Vec::new();
        let count = export_csv(&items, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("id,category,art,name"));
        assert!(output.contains("5,Cities,paris,Paris"));
        assert!(output.contains("7,Animals,lion,Lion"));
    }

    /// Rows come out in the order given, which is grouped display order.
    #[test]
    fn test_csv_preserves_order() {
        let a = make_item(9, "Nature", "Dolphin");
        let b = make_item(9, "Animals", "Dolphin");
        let items = vec![&a, &b];

        let mut buf = Vec::new();
        export_csv(&items, &mut buf, &PathBuf::from("out.csv")).unwrap();

        let output = String::from_utf8(buf).unwrap();
        let nature = output.find("9,Nature").unwrap();
        let animals = output.find("9,Animals").unwrap();
        assert!(nature < animals);
    }

    #[test]
    fn test_csv_export_empty() {
        let items: Vec<&GalleryItem> = Vec::new();
        let mut buf = Vec::new();
        let count = export_csv(&items, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 0);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("id,category"));
    }

    #[test]
    fn test_json_export() {
        let a = make_item(5, "Cities", "Paris");
        let items = vec![&a];

        let mut buf = Vec::new();
        let count = export_json(&items, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("\"name\": \"Paris\""));
        assert!(output.contains("\"catalog_id\": \"sample-gallery\""));
    }
}
