use crate::header::{Field, RecordingHeader};

/// Default padding byte for unused trailing bytes within a field.
pub const DEFAULT_FILLER: u8 = 0x00;

/// Overwrite one field of the header in place.
///
/// Every byte of the field's range is written: positions covered by
/// `content` take the content byte, the remainder takes `filler`. Content
/// longer than the field is silently truncated to the field width.
///
/// Returns whether the field was wide enough to hold all of `content`.
pub fn write_field(
    header: &mut RecordingHeader,
    field: Field,
    content: &[u8],
    filler: u8,
) -> bool {
    let range = field.range();
    let width = range.end - range.start;
    let slot = &mut header.as_bytes_mut()[range];

    for (offset, byte) in slot.iter_mut().enumerate() {
        *byte = if offset < content.len() {
            content[offset]
        } else {
            filler
        };
    }

    width >= content.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_SIZE;

    fn junk_header() -> RecordingHeader {
        let mut bytes = [0u8; HEADER_SIZE];
        for (index, byte) in bytes.iter_mut().enumerate() {
            *byte = (index % 251) as u8;
        }
        RecordingHeader::from_bytes(bytes)
    }

    #[test]
    fn short_content_is_zero_padded() {
        let mut header = junk_header();
        let fits = write_field(&mut header, Field::Name, b"ANON", DEFAULT_FILLER);

        assert!(fits);
        let bytes = header.field_bytes(Field::Name);
        assert_eq!(&bytes[..4], b"ANON");
        assert!(bytes[4..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn long_content_is_truncated_and_reported() {
        let mut header = junk_header();
        let content = vec![b'x'; Field::Sex.width() + 3];
        let fits = write_field(&mut header, Field::Sex, &content, DEFAULT_FILLER);

        assert!(!fits);
        assert_eq!(header.field_bytes(Field::Sex), b"x");
        // Bytes past the field boundary are untouched.
        let after = Field::Sex.range().end;
        assert_eq!(header.as_bytes()[after], (after % 251) as u8);
    }

    #[test]
    fn content_exactly_field_width_fits() {
        let mut header = junk_header();
        let content = vec![b'd'; Field::Birthdate.width()];
        let fits = write_field(&mut header, Field::Birthdate, &content, DEFAULT_FILLER);

        assert!(fits);
        assert_eq!(header.field_bytes(Field::Birthdate), content.as_slice());
    }

    #[test]
    fn custom_filler_is_used() {
        let mut header = junk_header();
        write_field(&mut header, Field::Folder, b"f", b' ');

        let bytes = header.field_bytes(Field::Folder);
        assert_eq!(bytes[0], b'f');
        assert!(bytes[1..].iter().all(|&b| b == b' '));
    }

    #[test]
    fn empty_content_blanks_the_field() {
        let mut header = junk_header();
        let fits = write_field(&mut header, Field::Comment, b"", DEFAULT_FILLER);

        assert!(fits);
        assert!(header
            .field_bytes(Field::Comment)
            .iter()
            .all(|&b| b == 0x00));
    }
}
