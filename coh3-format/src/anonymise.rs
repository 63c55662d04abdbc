use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::edit::{write_field, DEFAULT_FILLER};
use crate::error::AnonymiseError;
use crate::header::{Field, RecordingHeader};
use crate::reader::read_header;

/// Replacement values for the seven identity fields.
///
/// `None` leaves a field's bytes untouched; they are copied through
/// verbatim from the source. `Some(value)` overwrites the field with the
/// ASCII bytes of `value`, zero-padded to the field width.
#[derive(Debug, Clone, Default)]
pub struct FieldEdits {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub birthdate: Option<String>,
    pub sex: Option<String>,
    pub folder: Option<String>,
    pub centre: Option<String>,
    pub comment: Option<String>,
}

impl FieldEdits {
    /// Clear all seven fields.
    pub fn blank() -> FieldEdits {
        FieldEdits {
            name: Some(String::new()),
            surname: Some(String::new()),
            birthdate: Some(String::new()),
            sex: Some(String::new()),
            folder: Some(String::new()),
            centre: Some(String::new()),
            comment: Some(String::new()),
        }
    }

    /// Leave every field untouched; the destination becomes a byte-exact
    /// copy of the source.
    pub fn passthrough() -> FieldEdits {
        FieldEdits::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> FieldEdits {
        self.name = Some(name.into());
        self
    }

    fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Surname => self.surname.as_deref(),
            Field::Birthdate => self.birthdate.as_deref(),
            Field::Sex => self.sex.as_deref(),
            Field::Folder => self.folder.as_deref(),
            Field::Centre => self.centre.as_deref(),
            Field::Comment => self.comment.as_deref(),
        }
    }
}

/// Anonymise one recording.
///
/// Reads the source header, patches the requested fields, then
/// materializes the result at `destination`:
///
/// 1. If the destination does not exist yet, the source is copied
///    byte-for-byte to `<destination>.part` and the part file is renamed
///    into place. Any observer of the filesystem sees either no
///    destination or a complete pre-anonymisation copy, never a partial
///    file.
/// 2. The destination is then opened read+write and the first
///    [`crate::HEADER_SIZE`] bytes are overwritten with the patched
///    header. Everything beyond the header is left as-is.
///
/// The expensive full copy happens only once; a retry after a transient
/// failure repeats only the cheap header patch.
pub fn anonymise(
    source: &Path,
    destination: &Path,
    edits: &FieldEdits,
) -> Result<(), AnonymiseError> {
    let mut header = read_header(source)?;

    for field in Field::ALL {
        let Some(value) = edits.value(field) else {
            continue;
        };

        if !value.is_ascii() {
            return Err(AnonymiseError::NonAscii {
                field,
                value: value.to_string(),
            });
        }

        if !write_field(&mut header, field, value.as_bytes(), DEFAULT_FILLER) {
            tracing::warn!(
                %field,
                width = field.width(),
                len = value.len(),
                "field value truncated to field width"
            );
        }
    }

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| AnonymiseError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    materialize(source, destination, &header)
}

fn materialize(
    source: &Path,
    destination: &Path,
    header: &RecordingHeader,
) -> Result<(), AnonymiseError> {
    if !destination.is_file() {
        let part = part_path(destination);
        fs::copy(source, &part).map_err(|error| AnonymiseError::Copy {
            original: source.to_path_buf(),
            path: part.clone(),
            source: error,
        })?;
        fs::rename(&part, destination).map_err(|error| AnonymiseError::Rename {
            from: part,
            to: destination.to_path_buf(),
            source: error,
        })?;
    }

    let patch_error = |error| AnonymiseError::Patch {
        path: destination.to_path_buf(),
        source: error,
    };

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(destination)
        .map_err(patch_error)?;
    file.seek(SeekFrom::Start(0)).map_err(patch_error)?;
    file.write_all(header.as_bytes()).map_err(patch_error)?;

    Ok(())
}

fn part_path(destination: &Path) -> PathBuf {
    let mut path = OsString::from(destination.as_os_str());
    path.push(".part");
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("out/rec.eeg")),
            PathBuf::from("out/rec.eeg.part")
        );
    }

    #[test]
    fn blank_edits_touch_every_field() {
        let edits = FieldEdits::blank();
        for field in Field::ALL {
            assert_eq!(edits.value(field), Some(""));
        }
    }

    #[test]
    fn passthrough_edits_touch_nothing() {
        let edits = FieldEdits::passthrough();
        for field in Field::ALL {
            assert_eq!(edits.value(field), None);
        }
    }
}
