use std::io;
use std::path::PathBuf;

use crate::header::{Field, HEADER_SIZE};

/// Failure to read the identity header of a recording.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("recording not found: `{}`", .0.display())]
    NotFound(PathBuf),

    #[error(
        "truncated header in `{}`: {} byte(s), expected at least {}",
        .path.display(),
        .len,
        HEADER_SIZE
    )]
    Truncated { path: PathBuf, len: u64 },

    #[error("cannot read header of `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to anonymise a single recording.
#[derive(Debug, thiserror::Error)]
pub enum AnonymiseError {
    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error("value for field {field} is not ASCII: {value:?}")]
    NonAscii { field: Field, value: String },

    #[error("cannot create destination directory `{}`", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot copy `{}` to `{}`", .original.display(), .path.display())]
    Copy {
        original: PathBuf,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot rename `{}` to `{}`", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot patch header of `{}`", .path.display())]
    Patch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnonymiseError {
    /// Whether this failure was a transient allocation/resource condition
    /// worth retrying once.
    pub fn is_resource_exhaustion(&self) -> bool {
        self.io_source()
            .map(|error| error.kind() == io::ErrorKind::OutOfMemory)
            .unwrap_or(false)
    }

    fn io_source(&self) -> Option<&io::Error> {
        match self {
            AnonymiseError::Header(HeaderError::Io { source, .. }) => Some(source),
            AnonymiseError::CreateDirectory { source, .. }
            | AnonymiseError::Copy { source, .. }
            | AnonymiseError::Rename { source, .. }
            | AnonymiseError::Patch { source, .. } => Some(source),
            AnonymiseError::Header(_) | AnonymiseError::NonAscii { .. } => None,
        }
    }
}

/// Failure to parse the dataset manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot open manifest `{}`", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("manifest has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("manifest `Paths` columns must precede the `Files` columns")]
    ColumnOrder,

    #[error("cannot read manifest row")]
    Row {
        #[source]
        source: csv::Error,
    },
}

/// Failure to drive the external EDF converter.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("converter executable not found: `{}`", .0.display())]
    MissingExecutable(PathBuf),

    #[error("cannot launch converter `{}`", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("conversion of `{}` failed after {attempts} attempt(s)", .path.display())]
    Failed { path: PathBuf, attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch_error(kind: io::ErrorKind) -> AnonymiseError {
        AnonymiseError::Patch {
            path: PathBuf::from("rec.eeg"),
            source: io::Error::new(kind, "boom"),
        }
    }

    #[test]
    fn out_of_memory_is_resource_exhaustion() {
        assert!(patch_error(io::ErrorKind::OutOfMemory).is_resource_exhaustion());
    }

    #[test]
    fn other_io_kinds_are_not_resource_exhaustion() {
        assert!(!patch_error(io::ErrorKind::PermissionDenied).is_resource_exhaustion());
        assert!(!patch_error(io::ErrorKind::UnexpectedEof).is_resource_exhaustion());
    }

    #[test]
    fn errors_without_an_io_source_are_not_resource_exhaustion() {
        let error = AnonymiseError::NonAscii {
            field: Field::Name,
            value: "Müller".to_string(),
        };
        assert!(!error.is_resource_exhaustion());

        let error = AnonymiseError::Header(HeaderError::NotFound(PathBuf::from("rec.eeg")));
        assert!(!error.is_resource_exhaustion());
    }
}
