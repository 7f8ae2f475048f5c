//! Lossless single-byte text codec
//!
//! Solution files are read and written under a legacy 8-bit encoding. Each byte
//! maps to the code point of the same value (ISO-8859-1), so any input decodes
//! and re-encodes to exactly the same bytes, and ordinal comparison of decoded
//! text matches byte comparison of the original.

use crate::{Error, Result};

/// UTF-8 byte-order mark, kept aside so it never ends up inside the first line.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decoded file content plus the byte-order mark it was stored with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceText {
    /// Whether the file started with a UTF-8 byte-order mark
    pub bom: bool,
    /// Remaining content, one char per byte
    pub text: String,
}

impl SourceText {
    /// Create source text without a byte-order mark.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            bom: false,
            text: text.into(),
        }
    }

    /// Same byte-order mark as `self`, different content.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            bom: self.bom,
            text: text.into(),
        }
    }

    /// Decode raw file bytes.
    pub fn decode(bytes: &[u8]) -> Self {
        match bytes.strip_prefix(UTF8_BOM) {
            Some(rest) => Self {
                bom: true,
                text: decode_bytes(rest),
            },
            None => Self {
                bom: false,
                text: decode_bytes(bytes),
            },
        }
    }

    /// Encode back to raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unencodable`] if the text holds a char above `U+00FF`.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.text.len() + UTF8_BOM.len());
        if self.bom {
            out.extend_from_slice(UTF8_BOM);
        }
        out.extend(encode_str(&self.text)?);
        Ok(out)
    }
}

/// Decode bytes one char per byte.
pub fn decode_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode text one byte per char.
pub fn encode_str(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| Error::Unencodable { character: c }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_keeps_high_bytes() {
        let source = SourceText::decode(&[b'a', 0xE9, 0x81, b'\r', b'\n']);
        assert!(!source.bom);
        assert_eq!(source.text, "a\u{e9}\u{81}\r\n");
    }

    #[test]
    fn bom_is_split_off_and_restored() {
        let bytes = [0xEF, 0xBB, 0xBF, b'x', b'\n'];
        let source = SourceText::decode(&bytes);
        assert!(source.bom);
        assert_eq!(source.text, "x\n");
        assert_eq!(source.encode().unwrap(), bytes);
    }

    #[test]
    fn partial_bom_is_plain_content() {
        let source = SourceText::decode(&[0xEF, 0xBB, b'x']);
        assert!(!source.bom);
        assert_eq!(source.text.chars().count(), 3);
    }

    #[test]
    fn wide_char_is_rejected() {
        let err = SourceText::new("snow \u{2603}").encode().unwrap_err();
        assert!(matches!(err, Error::Unencodable { character: '\u{2603}' }));
    }

    #[test]
    fn decoded_order_matches_byte_order() {
        let low = decode_bytes(&[0x7F]);
        let high = decode_bytes(&[0x80]);
        assert!(low < high);
    }
}
