use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::HeaderError;
use crate::header::{Field, RecordingHeader, HEADER_SIZE};

/// Read exactly the first [`HEADER_SIZE`] bytes of the recording at `path`.
///
/// The rest of the file is never read; recordings can be multiple
/// gigabytes and only the header matters here. A file shorter than the
/// header is structurally incomplete and rejected.
pub fn read_header(path: &Path) -> Result<RecordingHeader, HeaderError> {
    let mut file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => HeaderError::NotFound(path.to_path_buf()),
        _ => HeaderError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut bytes = [0u8; HEADER_SIZE];
    if let Err(source) = file.read_exact(&mut bytes) {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            let len = file.metadata().map(|meta| meta.len()).unwrap_or(0);
            return Err(HeaderError::Truncated {
                path: path.to_path_buf(),
                len,
            });
        }
        return Err(HeaderError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(RecordingHeader::from_bytes(bytes))
}

/// The seven identity fields of one recording, decoded for audit display.
#[derive(Debug, Clone)]
pub struct FieldReport {
    values: [String; 7],
}

impl FieldReport {
    pub fn from_header(header: &RecordingHeader) -> FieldReport {
        FieldReport {
            values: Field::ALL.map(|field| header.decode_field(field)),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }
}

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in Field::ALL {
            writeln!(f, "{}: \"{}\"", field, self.get(field).trim_end_matches('\0'))?;
        }
        Ok(())
    }
}

/// Decode the seven identity fields of the recording at `path`.
pub fn read_fields(path: &Path) -> Result<FieldReport, HeaderError> {
    let header = read_header(path)?;
    Ok(FieldReport::from_header(&header))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_displays_one_line_per_field() {
        let mut bytes = [0u8; HEADER_SIZE];
        let range = Field::Name.range();
        bytes[range.start..range.start + 3].copy_from_slice(b"Doe");

        let report = FieldReport::from_header(&RecordingHeader::from_bytes(bytes));
        let rendered = report.to_string();

        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.contains("Name: \"Doe\""));
        assert!(rendered.contains("Sex: \"\""));
    }
}
