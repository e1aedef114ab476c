//! Loading text files in the encodings shipped with the game
//!

use byteorder::{ByteOrder, LittleEndian};
use std::{borrow::Cow, path::Path};
use tracing::{debug, instrument};
use widestring::U16Str;

use crate::error::Result;

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Raw text as read from disk or memory
///
/// Language files ship as UTF-16 little endian with a byte order mark, most
/// other game files as UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFile {
    buffer: Vec<u8>,
}

impl TextFile {
    /// Read a whole file into memory
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<TextFile> {
        let buffer = std::fs::read(path)?;
        debug!(len = buffer.len(), "read text file");
        Ok(TextFile { buffer })
    }

    /// Wrap bytes already in memory
    pub fn from_bytes(buffer: Vec<u8>) -> TextFile {
        TextFile { buffer }
    }

    /// Wrap a string already in memory
    pub fn from_text(text: impl Into<String>) -> TextFile {
        TextFile {
            buffer: text.into().into_bytes(),
        }
    }

    /// Raw bytes of the file
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of raw bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the file has no bytes
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether the file starts with a UTF-16 little endian byte order mark
    pub fn has_utf16_le_bom(&self) -> bool {
        self.buffer.starts_with(&UTF16_LE_BOM)
    }

    /// Re-encode UTF-16 little endian content as UTF-8 in place.
    ///
    /// A leading byte order mark is dropped, as is an odd trailing byte. Unpaired
    /// surrogates become U+FFFD.
    pub fn convert_utf16_to_utf8(&mut self) {
        let body = self
            .buffer
            .strip_prefix(&UTF16_LE_BOM)
            .unwrap_or(&self.buffer);

        let mut units = vec![0u16; body.len() / 2];
        LittleEndian::read_u16_into(&body[..units.len() * 2], &mut units);

        self.buffer = U16Str::from_slice(&units).to_string_lossy().into_bytes();
    }

    /// Decode the content as UTF-8 text.
    ///
    /// UTF-16 content is detected by its byte order mark and transcoded first.
    /// A UTF-8 byte order mark is dropped and invalid sequences become U+FFFD.
    pub fn into_string(mut self) -> String {
        if self.has_utf16_le_bom() {
            self.convert_utf16_to_utf8();
        }
        if self.buffer.starts_with(&UTF8_BOM) {
            self.buffer.drain(..UTF8_BOM.len());
        }

        match String::from_utf8(self.buffer) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    /// Borrow the content as text, replacing invalid UTF-8 sequences
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    /// Iterate over the lines of the file.
    ///
    /// Lines end at `\n`, a trailing `\r` is not part of the line.
    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.split_inclusive(|b| *b == b'\n').map(|line| {
            let line = line.strip_suffix(b"\n").unwrap_or(line);
            line.strip_suffix(b"\r").unwrap_or(line)
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::TextFile;

    fn utf16(text: &str, bom: bool) -> Vec<u8> {
        let mut bytes = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn detect_bom() {
        assert!(TextFile::from_bytes(utf16("x", true)).has_utf16_le_bom());
        assert!(!TextFile::from_bytes(utf16("x", false)).has_utf16_le_bom());
        assert!(!TextFile::from_bytes(vec![0xFF]).has_utf16_le_bom());
        assert!(!TextFile::from_text("\"lang\"").has_utf16_le_bom());
    }

    #[test]
    fn transcode_utf16() {
        let mut file = TextFile::from_bytes(utf16("\"Tokens\" \"Äpfel 🍎\"", true));
        file.convert_utf16_to_utf8();
        assert_eq!(file.bytes(), "\"Tokens\" \"Äpfel 🍎\"".as_bytes());
    }

    #[test]
    fn transcode_without_bom() {
        let mut file = TextFile::from_bytes(utf16("plain", false));
        file.convert_utf16_to_utf8();
        assert_eq!(file.into_string(), "plain");
    }

    #[test]
    fn transcode_unpaired_surrogate() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in [0x0061u16, 0xD800, 0x0062] {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        // odd trailing byte
        bytes.push(0x63);

        assert_eq!(TextFile::from_bytes(bytes).into_string(), "a\u{FFFD}b");
    }

    #[test]
    fn into_string_detects_encoding() {
        assert_eq!(
            TextFile::from_bytes(utf16("ü", true)).into_string(),
            "ü"
        );
        assert_eq!(
            TextFile::from_bytes(vec![0xEF, 0xBB, 0xBF, b'o', b'k']).into_string(),
            "ok"
        );
        assert_eq!(TextFile::from_text("ok").into_string(), "ok");
    }

    #[test]
    fn split_lines() {
        let file = TextFile::from_text("first\r\nsecond\n\nlast");
        let lines: Vec<&[u8]> = file.lines().collect();
        assert_eq!(
            lines,
            vec![&b"first"[..], &b"second"[..], &b""[..], &b"last"[..]]
        );

        let file = TextFile::from_text("trailing\n");
        assert_eq!(file.lines().count(), 1);
        assert_eq!(TextFile::default().lines().count(), 0);
    }
}
