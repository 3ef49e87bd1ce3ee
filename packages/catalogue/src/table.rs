//! Reading and writing the entry table.
//!
//! The table is a CSV file with a header row and one row per entry, columns
//! in the order of [`COLUMNS`]. Multi-line fields are quoted, so titles keep
//! their line breaks.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::CatalogueEntry;

/// Column names, in output order.
pub const COLUMNS: [&str; 17] = [
    "key",
    "city",
    "year",
    "title",
    "colophon",
    "imprint",
    "format",
    "books",
    "author",
    "language",
    "title_EN",
    "colophon_EN",
    "imprint_EN",
    "language_v2",
    "publisher",
    "title_verbs",
    "title_features",
];

/// Serialize entries, header row first, to any writer.
///
/// The header is written even when there are no entries.
pub fn write_entries_to<W: Write>(writer: W, entries: &[CatalogueEntry]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(COLUMNS)?;
    for entry in entries {
        csv.serialize(entry)?;
    }
    csv.flush()?;
    Ok(())
}

/// Render entries as CSV text.
pub fn entries_to_csv_string(entries: &[CatalogueEntry]) -> Result<String> {
    let mut buffer = Vec::new();
    write_entries_to(&mut buffer, entries)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write the table to `path`.
///
/// Uses atomic write pattern: writes to a temp file beside the target,
/// syncs to disk, then renames. A failed run never leaves a truncated table.
pub fn write_entries(path: &Path, entries: &[CatalogueEntry]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "entries.csv".to_string());
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        write_entries_to(&mut file, entries)?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::info!(path = %path.display(), rows = entries.len(), "Wrote entry table");
    Ok(())
}

/// Parse entries from any reader producing table CSV.
pub fn read_entries_from<R: Read>(reader: R) -> Result<Vec<CatalogueEntry>> {
    let mut csv = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut entries = Vec::new();
    for record in csv.deserialize() {
        entries.push(record?);
    }
    Ok(entries)
}

/// Read a table written by [`write_entries`].
pub fn read_entries(path: &Path) -> Result<Vec<CatalogueEntry>> {
    let file = File::open(path)?;
    let entries = read_entries_from(file)?;
    tracing::debug!(path = %path.display(), rows = entries.len(), "Read entry table");
    Ok(entries)
}
