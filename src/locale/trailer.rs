//! Description trailer appended to translated help files.
//!
//! Layout, from the end of the file backwards:
//!
//! ```text
//! { original help file bytes ... }
//! payload  - `len` bytes, Windows-1252, no terminator
//! len      - u32 little-endian
//! sig      - u32 little-endian, HELP_MARKER_SIG
//! ```
//!
//! The trailer is trusted only when the final four bytes carry the
//! signature; a short file, a bad signature or a truncated payload all mean
//! "no description", never an error.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use tracing::debug;

use crate::model::constants::*;

/// Read the language description embedded in a marked help file.
/// Returns an empty string when the file is missing, too short or unmarked.
pub fn read_help_description(path: &Path) -> String {
    match try_read_description(path) {
        Ok(Some(descr)) => descr,
        Ok(None) => String::new(),
        Err(err) => {
            debug!("help trailer unreadable in {}: {}", path.display(), err);
            String::new()
        }
    }
}

fn try_read_description(path: &Path) -> std::io::Result<Option<String>> {
    let mut file = File::open(path)?;
    let file_len = file.metadata()?.len();
    if file_len < HELP_TRAILER_SUFFIX {
        return Ok(None);
    }

    // Fixed fields first: [len:u32][sig:u32] at the absolute end of file.
    let mut suffix = [0u8; HELP_TRAILER_SUFFIX as usize];
    file.seek(SeekFrom::End(-(HELP_TRAILER_SUFFIX as i64)))?;
    file.read_exact(&mut suffix)?;
    let mut fields = &suffix[..];
    let len = fields.read_u32::<LittleEndian>()?;
    let sig = fields.read_u32::<LittleEndian>()?;
    if sig != HELP_MARKER_SIG {
        return Ok(None);
    }

    // Payload must fit between the start of file and the fixed fields.
    let len = len as u64;
    if len > file_len - HELP_TRAILER_SUFFIX {
        return Ok(None);
    }

    let mut payload = vec![0u8; len as usize];
    file.seek(SeekFrom::End(-((HELP_TRAILER_SUFFIX + len) as i64)))?;
    file.read_exact(&mut payload)?;
    Ok(Some(decode_windows_1252(&payload)))
}

// C1 range 0x80..=0x9f of Windows-1252; every other byte maps straight to
// the Unicode code point of the same value.
const CP1252_C1: [char; 32] = [
    '\u{20ac}', '\u{81}', '\u{201a}', '\u{192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{2c6}', '\u{2030}', '\u{160}', '\u{2039}', '\u{152}', '\u{8d}', '\u{17d}', '\u{8f}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{2dc}', '\u{2122}', '\u{161}', '\u{203a}', '\u{153}', '\u{9d}', '\u{17e}', '\u{178}',
];

/// Decode the trailer's legacy single-byte text.
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9f => CP1252_C1[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ascii_passes_through() {
        assert_eq!(decode_windows_1252(b"Nederlands"), "Nederlands");
    }

    #[test]
    fn decode_maps_high_range_like_latin1() {
        // "Français" in Windows-1252
        let bytes = [0x46, 0x72, 0x61, 0x6e, 0xe7, 0x61, 0x69, 0x73];
        assert_eq!(decode_windows_1252(&bytes), "Fran\u{e7}ais");
    }

    #[test]
    fn decode_maps_c1_range_to_windows_codepoints() {
        // 0x80 is the euro sign in Windows-1252, not a C1 control
        assert_eq!(decode_windows_1252(&[0x80]), "\u{20ac}");
        assert_eq!(decode_windows_1252(&[0x99]), "\u{2122}");
    }

    #[test]
    fn decode_empty_is_empty() {
        assert_eq!(decode_windows_1252(&[]), "");
    }
}
