//! JSON view document writer.
//!
//! Writes ViewDocument structs to JSON files with proper formatting.

use crate::utils::error::OutputError;
use crate::view::ViewDocument;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a view document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `document` - View document to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_view(
    document: &ViewDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing view to: {}", output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path)
        .map_err(OutputError::WriteFailed)?;

    let writer = BufWriter::new(file);

    // Serialize to JSON with pretty printing
    serde_json::to_writer_pretty(writer, document)
        .map_err(OutputError::SerializationFailed)?;

    info!("View written successfully ({} bytes)",
          calculate_file_size(output_path));

    Ok(())
}

/// Serialize a view document to a pretty JSON string
pub fn view_to_string(document: &ViewDocument) -> Result<String, OutputError> {
    serde_json::to_string_pretty(document)
        .map_err(OutputError::SerializationFailed)
}

/// Read a view document from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_view(input_path: impl AsRef<Path>) -> Result<ViewDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading view from: {}", input_path.display());

    let file = File::open(input_path)
        .map_err(OutputError::WriteFailed)?;

    let document: ViewDocument = serde_json::from_reader(file)
        .map_err(OutputError::SerializationFailed)?;

    debug!("View loaded: version {}, generated at {}",
           document.version,
           document.generated_at);

    Ok(document)
}

/// Validate that output path is writable
///
/// **Crate** - shared with the HTML writer
pub(crate) fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of `path`
pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                )))?;
        }
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path)
        .map(|m| m.len())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::HourBuckets;
    use crate::view::{assemble, to_document};
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn create_test_document() -> ViewDocument {
        let mut buckets = HourBuckets::new();
        buckets.insert("2024-01-01 10:00:00".to_string(), 3);

        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        to_document(assemble(1000, 100, buckets), 6, at)
    }

    #[test]
    fn test_write_and_read_view() {
        let document = create_test_document();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_view(&document, path).unwrap();

        let loaded = read_view(path).unwrap();

        assert_eq!(loaded, document);
    }

    #[test]
    fn test_view_to_string() {
        let json = view_to_string(&create_test_document()).unwrap();
        assert!(json.contains("\"latest_block_height\": 1000"));
        assert!(json.contains("\"2024-01-01 10:00:00\": 3"));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/view.json");

        write_view(&create_test_document(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_view_rejects_garbage() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "{\"version\": 1}").unwrap();

        assert!(matches!(read_view(temp_file.path()), Err(OutputError::SerializationFailed(_))));
    }
}
