//! Dataset manifest parsing.
//!
//! The manifest is a CSV table with one row per patient. Its header row
//! carries two column groups: a `Paths` group (destination sub-paths)
//! followed by a `Files` group (recording basename prefixes). The group
//! boundaries are positional: `Paths` columns run from the `Paths` header
//! up to the `Files` header, `Files` columns run from there to the end of
//! the row.

use std::path::Path;

use crate::error::ManifestError;

/// One patient row: destination sub-paths and recording basename prefixes.
///
/// Empty cells are preserved as empty strings so that file and destination
/// columns keep their positional correspondence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub destinations: Vec<String>,
    pub files: Vec<String>,
}

/// Parse the dataset manifest at `path`.
pub fn read_manifest(path: &Path) -> Result<Vec<PatientRecord>, ManifestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| ManifestError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = reader
        .headers()
        .map_err(|source| ManifestError::Row { source })?
        .clone();

    let paths_index = headers
        .iter()
        .position(|header| header == "Paths")
        .ok_or(ManifestError::MissingColumn("Paths"))?;
    let files_index = headers
        .iter()
        .position(|header| header == "Files")
        .ok_or(ManifestError::MissingColumn("Files"))?;
    if files_index < paths_index {
        return Err(ManifestError::ColumnOrder);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| ManifestError::Row { source })?;
        let cell = |index: usize| row.get(index).unwrap_or("").trim().to_string();

        records.push(PatientRecord {
            destinations: (paths_index..files_index).map(cell).collect(),
            files: (files_index..row.len()).map(cell).collect(),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn splits_column_groups() {
        let file = write_manifest(
            "Patient,Paths,Paths2,Files,Files2\n\
             p1,sub/a,,L001,L002\n\
             p2,sub/b,alt,L003,\n",
        );

        let records = read_manifest(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].destinations, vec!["sub/a", ""]);
        assert_eq!(records[0].files, vec!["L001", "L002"]);
        assert_eq!(records[1].destinations, vec!["sub/b", "alt"]);
        assert_eq!(records[1].files, vec!["L003", ""]);
    }

    #[test]
    fn missing_files_column_is_fatal() {
        let file = write_manifest("Patient,Paths\np1,sub/a\n");
        assert!(matches!(
            read_manifest(file.path()),
            Err(ManifestError::MissingColumn("Files"))
        ));
    }

    #[test]
    fn files_before_paths_is_fatal() {
        let file = write_manifest("Files,Paths\nL001,sub/a\n");
        assert!(matches!(
            read_manifest(file.path()),
            Err(ManifestError::ColumnOrder)
        ));
    }
}
