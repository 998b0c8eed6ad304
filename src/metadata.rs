//! Name lookup in the metadata footer of a workshop package.
//!
//! The footer has no documented layout. The name is found in two passes over
//! the raw bytes:
//!
//! 1. the metadata block starts at the last `INDEX` in the file and runs to
//!    the end of it;
//! 2. inside that block the `\x04name` field marker is located, and the name
//!    itself starts [`NAME_PAYLOAD_OFFSET`] bytes after the start of the
//!    marker. It runs until the first byte outside printable ASCII.
//!
//! The two bytes between the marker and the payload are not interpreted.

use crate::error::ExtractError;

pub const INDEX_MARKER: &[u8; 5] = b"INDEX";
pub const NAME_MARKER: &[u8; 5] = b"\x04name";
pub const NAME_PAYLOAD_OFFSET: usize = 7;

/// Which `\x04name` marker to use when a metadata block holds several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatch {
    #[default]
    Last,
    First,
}

pub fn extract_name(bytes: &[u8]) -> Result<String, ExtractError> {
    extract_name_with(bytes, NameMatch::Last)
}

pub fn extract_name_with(bytes: &[u8], policy: NameMatch) -> Result<String, ExtractError> {
    let block = metadata_block(bytes).ok_or(ExtractError::MetadataNotFound)?;
    let offset = name_offset(block, policy).ok_or(ExtractError::NameFieldNotFound)?;
    trace!(
        "metadata block of {} bytes, name payload at block offset {}",
        block.len(),
        offset
    );

    let run = printable_run(block, offset);
    std::str::from_utf8(run)
        .ok()
        .filter(|name| name.is_ascii())
        .map(str::to_owned)
        .ok_or(ExtractError::Decode { offset })
}

pub fn metadata_block(bytes: &[u8]) -> Option<&[u8]> {
    rfind(bytes, INDEX_MARKER).map(|start| &bytes[start..])
}

/// May point at or past the end of `block`, the name is empty then.
pub fn name_offset(block: &[u8], policy: NameMatch) -> Option<usize> {
    let start = match policy {
        NameMatch::Last => rfind(block, NAME_MARKER),
        NameMatch::First => find(block, NAME_MARKER),
    };
    start.map(|start| start + NAME_PAYLOAD_OFFSET)
}

fn printable_run(block: &[u8], offset: usize) -> &[u8] {
    let tail = block.get(offset..).unwrap_or_default();
    let len = tail
        .iter()
        .position(|&b| !is_printable(b))
        .unwrap_or(tail.len());
    &tail[..len]
}

// 0x20..=0x7E
pub fn is_printable(b: u8) -> bool {
    b.is_ascii_graphic() || b == b' '
}

// `windows` never yields a window shorter than the needle, so a marker cut
// off by the end of the buffer cannot match.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(name: &[u8]) -> Vec<u8> {
        let mut bytes = b"asset data INDEX is not here\x00\x01".to_vec();
        bytes.extend_from_slice(b"INDEX\x00\x00\x00\x02\x10\x11");
        bytes.extend_from_slice(b"\x04name\x00\x09");
        bytes.extend_from_slice(name);
        bytes.extend_from_slice(b"\x00trailing");
        bytes
    }

    #[test]
    fn reads_name_up_to_first_unprintable() {
        let bytes = package(b"MyMod Name!");
        assert_eq!(extract_name(&bytes).unwrap(), "MyMod Name!");
    }

    #[test]
    fn layout_with_filler_between_markers() {
        let bytes = b"junkINDEX123456\x04name1234567MyMod Name!\x00trailing";
        // payload starts 7 bytes after the marker start, so two filler bytes
        // are skipped and the rest becomes part of the name
        assert_eq!(extract_name(bytes).unwrap(), "34567MyMod Name!");
    }

    #[test]
    fn no_index_marker() {
        assert!(matches!(
            extract_name(b"no markers here"),
            Err(ExtractError::MetadataNotFound)
        ));
    }

    #[test]
    fn empty_buffer() {
        assert!(matches!(
            extract_name(b""),
            Err(ExtractError::MetadataNotFound)
        ));
    }

    #[test]
    fn truncated_index_marker_at_end() {
        assert!(matches!(
            extract_name(b"\x04name\x00\x00abcINDE"),
            Err(ExtractError::MetadataNotFound)
        ));
    }

    #[test]
    fn index_marker_alone() {
        assert!(matches!(
            extract_name(b"INDEX"),
            Err(ExtractError::NameFieldNotFound)
        ));
    }

    #[test]
    fn name_marker_before_last_index_is_ignored() {
        let bytes = b"INDEX..\x04name\x00\x00Hidden\x00INDEX\x00\x00\x00";
        assert!(matches!(
            extract_name(bytes),
            Err(ExtractError::NameFieldNotFound)
        ));
    }

    #[test]
    fn last_index_marker_starts_the_block() {
        let bytes = b"INDEX\x04name\x00\x00Old\x00INDEX\x04name\x00\x00New\x00";
        let block = metadata_block(bytes).unwrap();
        assert_eq!(&block[..5], INDEX_MARKER);
        assert_eq!(block.len(), 16);
        assert_eq!(extract_name(bytes).unwrap(), "New");
    }

    #[test]
    fn last_name_marker_wins_by_default() {
        let bytes = b"INDEX\x04name\x00\x00First\x00\x04name\x00\x00Second\x00";
        assert_eq!(extract_name(bytes).unwrap(), "Second");
        assert_eq!(
            extract_name_with(bytes, NameMatch::First).unwrap(),
            "First"
        );
    }

    #[test]
    fn name_offset_past_end_gives_empty_name() {
        assert_eq!(extract_name(b"INDEX\x04name").unwrap(), "");
        assert_eq!(extract_name(b"INDEX\x04name\x00").unwrap(), "");
        assert_eq!(extract_name(b"INDEX\x04name\x00\x00").unwrap(), "");
    }

    #[test]
    fn unprintable_first_byte_gives_empty_name() {
        assert_eq!(extract_name(b"INDEX\x04name\x00\x00\x01Name").unwrap(), "");
    }

    #[test]
    fn non_ascii_byte_ends_the_name() {
        assert_eq!(
            extract_name(b"INDEX\x04name\x00\x00Caf\xc3\xa9").unwrap(),
            "Caf"
        );
    }

    #[test]
    fn name_runs_to_end_of_buffer() {
        assert_eq!(
            extract_name(b"INDEX\x04name\x00\x00Tail ~{}").unwrap(),
            "Tail ~{}"
        );
    }

    #[test]
    fn printable_set_is_full_printable_ascii() {
        let count = (0u8..=255).filter(|&b| is_printable(b)).count();
        assert_eq!(count, 95);
        assert!(is_printable(b' '));
        assert!(is_printable(b'~'));
        assert!(!is_printable(b'\t'));
        assert!(!is_printable(0x7f));
    }
}
