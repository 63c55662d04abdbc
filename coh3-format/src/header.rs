use std::fmt;
use std::ops::Range;

/// Size of the fixed-layout identity header at the start of every
/// Coherence 3 recording.
///
/// The seven identity fields live in `[314, 719)`; everything else in the
/// header is recording metadata and is never touched by anonymisation.
/// Byte 719 sits between the comment field and the signal data and is
/// preserved verbatim.
pub const HEADER_SIZE: usize = 720;

/// A named, fixed byte-offset range within the identity header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Surname,
    Birthdate,
    Sex,
    Folder,
    Centre,
    Comment,
}

impl Field {
    /// All seven fields, in header order.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Surname,
        Field::Birthdate,
        Field::Sex,
        Field::Folder,
        Field::Centre,
        Field::Comment,
    ];

    /// The `[start, stop)` byte range of this field within the header.
    pub const fn range(self) -> Range<usize> {
        match self {
            Field::Name => 314..364,
            Field::Surname => 364..394,
            Field::Birthdate => 394..404,
            Field::Sex => 404..405,
            Field::Folder => 405..425,
            Field::Centre => 425..464,
            Field::Comment => 464..719,
        }
    }

    /// Width of the field in bytes.
    pub const fn width(self) -> usize {
        let range = self.range();
        range.end - range.start
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Surname => 1,
            Field::Birthdate => 2,
            Field::Sex => 3,
            Field::Folder => 4,
            Field::Centre => 5,
            Field::Comment => 6,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "Name",
            Field::Surname => "Surname",
            Field::Birthdate => "Birthdate",
            Field::Sex => "Sex",
            Field::Folder => "Folder",
            Field::Centre => "Centre",
            Field::Comment => "Comment",
        };
        f.write_str(name)
    }
}

/// In-memory copy of the identity header of one recording.
///
/// Created fresh per anonymisation call, mutated field by field, then
/// written out exactly once. Never shared across files.
#[derive(Clone)]
pub struct RecordingHeader {
    bytes: [u8; HEADER_SIZE],
}

impl RecordingHeader {
    pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> RecordingHeader {
        RecordingHeader { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.bytes
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8; HEADER_SIZE] {
        &mut self.bytes
    }

    /// The raw bytes of one field.
    pub fn field_bytes(&self, field: Field) -> &[u8] {
        &self.bytes[field.range()]
    }

    /// Decode one field as ASCII, dropping any non-ASCII bytes.
    ///
    /// Padding bytes are kept; a freshly blanked field decodes to a run of
    /// NUL characters.
    pub fn decode_field(&self, field: Field) -> String {
        self.field_bytes(field)
            .iter()
            .filter(|byte| byte.is_ascii())
            .map(|&byte| byte as char)
            .collect()
    }
}

impl fmt::Debug for RecordingHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingHeader")
            .field("len", &self.bytes.len())
            .field("name", &self.decode_field(Field::Name))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_ranges_are_contiguous() {
        let mut expected_start = 314;
        for field in Field::ALL {
            let range = field.range();
            assert_eq!(range.start, expected_start, "{field} start");
            expected_start = range.end;
        }
        // Byte 719 is outside every field.
        assert_eq!(expected_start, HEADER_SIZE - 1);
    }

    #[test]
    fn field_widths() {
        assert_eq!(Field::Name.width(), 50);
        assert_eq!(Field::Surname.width(), 30);
        assert_eq!(Field::Birthdate.width(), 10);
        assert_eq!(Field::Sex.width(), 1);
        assert_eq!(Field::Folder.width(), 20);
        assert_eq!(Field::Centre.width(), 39);
        assert_eq!(Field::Comment.width(), 255);
    }

    #[test]
    fn decode_drops_non_ascii() {
        let mut bytes = [0u8; HEADER_SIZE];
        let range = Field::Sex.range();
        bytes[range.start] = b'M';
        let name = Field::Name.range();
        bytes[name.start..name.start + 5].copy_from_slice(b"Jo\xffhn");

        let header = RecordingHeader::from_bytes(bytes);
        assert_eq!(header.decode_field(Field::Sex), "M");
        assert!(header.decode_field(Field::Name).starts_with("John"));
    }
}
